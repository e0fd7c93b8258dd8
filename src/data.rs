use crate::verdict::{CheckError, FileRole};

const TOKEN_PREVIEW: usize = 32;

/// Whitespace-delimited integer reader over a whole file's contents.
pub struct Tokens<'a> {
    rest: &'a [u8],
    position: usize,
    role: FileRole,
}

impl<'a> Tokens<'a> {
    pub fn new(role: FileRole, data: &'a [u8]) -> Self {
        Self {
            rest: data,
            position: 0,
            role,
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        let Some(start) = self.rest.iter().position(|b| !b.is_ascii_whitespace()) else {
            self.rest = &[];
            return None;
        };
        let rest = &self.rest[start..];
        let end = rest
            .iter()
            .position(u8::is_ascii_whitespace)
            .unwrap_or(rest.len());
        self.rest = &rest[end..];
        self.position += 1;
        Some(&rest[..end])
    }

    /// `Ok(None)` means the stream is exhausted; a token that is not an integer
    /// is an error rather than an absent value.
    pub fn next_int(&mut self) -> Result<Option<i64>, CheckError> {
        let Some(token) = self.next_token() else {
            return Ok(None);
        };
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Some)
            .ok_or_else(|| CheckError::MalformedToken {
                role: self.role,
                position: self.position,
                token: preview(token),
            })
    }
}

fn preview(token: &[u8]) -> String {
    let text = String::from_utf8_lossy(token);
    let cut = text.char_indices().nth(TOKEN_PREVIEW).map(|(at, _)| at);
    match cut {
        Some(cut) => format!("{}...", &text[..cut]),
        None => text.into_owned(),
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ProblemInput {
    pub count: i64,
    pub on: Vec<i64>,
    pub off: Vec<i64>,
    pub capacity: i64,
}

/// Reads fields in a fixed order. In lenient mode the first missing or
/// malformed token fails the stream and every later read yields zero.
struct FieldReader<'t, 'a> {
    tokens: &'t mut Tokens<'a>,
    strict: bool,
    failed: bool,
}

impl FieldReader<'_, '_> {
    fn read(&mut self, what: &'static str) -> Result<i64, CheckError> {
        if self.failed {
            return Ok(0);
        }
        match self.tokens.next_int() {
            Ok(Some(value)) => Ok(value),
            Ok(None) if self.strict => Err(CheckError::TruncatedInput { what }),
            Err(CheckError::MalformedToken {
                position, token, ..
            }) if self.strict => Err(CheckError::BadInputToken { position, token }),
            Err(err) if self.strict => Err(err),
            Ok(None) => {
                log::warn!("problem input ends before {what}, reading zeros from here");
                self.failed = true;
                Ok(0)
            }
            Err(err) => {
                log::warn!("{err}, reading zeros from here");
                self.failed = true;
                Ok(0)
            }
        }
    }

    fn read_seq(&mut self, len: usize, what: &'static str) -> Result<Vec<i64>, CheckError> {
        let mut values = Vec::new();
        for _ in 0..len {
            if self.failed {
                break;
            }
            values.push(self.read(what)?);
        }
        Ok(values)
    }
}

impl ProblemInput {
    pub fn parse(tokens: &mut Tokens<'_>, strict: bool) -> Result<Self, CheckError> {
        let mut reader = FieldReader {
            tokens,
            strict,
            failed: false,
        };
        let count = reader.read("the stop count")?;
        let len = match usize::try_from(count) {
            Ok(len) => len,
            Err(_) if strict => return Err(CheckError::NegativeCount(count)),
            Err(_) => {
                log::warn!("problem input declares a negative count {count}, treating it as zero");
                0
            }
        };
        let on = reader.read_seq(len, "a boarding count")?;
        let off = reader.read_seq(len, "an alighting count")?;
        let capacity = reader.read("the capacity")?;
        if strict && reader.tokens.next_token().is_some() {
            return Err(CheckError::TrailingInput);
        }
        Ok(Self {
            count,
            on,
            off,
            capacity,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    pub max_value: i64,
    pub index: Option<i64>,
}

impl Answer {
    /// Parses the reference answer: the index is present exactly when a second
    /// integer follows the maximum.
    pub fn reference(tokens: &mut Tokens<'_>) -> Result<Self, CheckError> {
        let max_value = tokens.next_int()?.ok_or(CheckError::MissingMax {
            role: FileRole::Reference,
        })?;
        let index = tokens.next_int()?;
        Ok(Self { max_value, index })
    }
}
