use std::{fmt::Display, io, path::PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Which of the three files a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Input,
    Reference,
    Submitted,
}

impl Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FileRole::Input => "problem input",
            FileRole::Reference => "reference output",
            FileRole::Submitted => "contestant output",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Max,
    Index,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Field::Max => "max",
            Field::Index => "index",
        })
    }
}

/// Every way a run can end in rejection. The `Display` text is the diagnostic
/// line written to stderr.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{0}")]
    Usage(String),
    #[error("File open error: {role} {}: {source}", path.display())]
    FileOpen {
        role: FileRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} missing first number", capitalize(*role))]
    MissingMax { role: FileRole },
    #[error("Expected an index in output")]
    MissingIndex,
    #[error("Expected {field}={expected} but got {actual}")]
    Mismatch {
        field: Field,
        expected: i64,
        actual: i64,
    },
    #[error("{role}: expected an integer at token {position}, found `{token}`")]
    MalformedToken {
        role: FileRole,
        position: usize,
        token: String,
    },
    #[error("problem input: expected an integer at token {position}, found `{token}`")]
    BadInputToken { position: usize, token: String },
    #[error("problem input truncated: missing {what}")]
    TruncatedInput { what: &'static str },
    #[error("problem input declares a negative count {0}")]
    NegativeCount(i64),
    #[error("problem input has trailing data after the capacity")]
    TrailingInput,
}

fn capitalize(role: FileRole) -> String {
    let text = role.to_string();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => text,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    FileOpen,
    MissingField,
    Mismatch,
    MalformedToken,
    MalformedInput,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Usage => "usage",
            ErrorKind::FileOpen => "file-open",
            ErrorKind::MissingField => "missing-field",
            ErrorKind::Mismatch => "mismatch",
            ErrorKind::MalformedToken => "malformed-token",
            ErrorKind::MalformedInput => "malformed-input",
        }
    }
}

impl CheckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckError::Usage(_) => ErrorKind::Usage,
            CheckError::FileOpen { .. } => ErrorKind::FileOpen,
            CheckError::MissingMax { .. } | CheckError::MissingIndex => ErrorKind::MissingField,
            CheckError::Mismatch { .. } => ErrorKind::Mismatch,
            CheckError::MalformedToken { .. } => ErrorKind::MalformedToken,
            CheckError::TruncatedInput { .. }
            | CheckError::BadInputToken { .. }
            | CheckError::NegativeCount(_)
            | CheckError::TrailingInput => ErrorKind::MalformedInput,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Accepted,
    Rejected,
}

impl Score {
    pub fn value(self) -> f64 {
        match self {
            Score::Accepted => 1.0,
            Score::Rejected => 0.0,
        }
    }
}

// exact literals the harness reads from stdout
impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Score::Accepted => "1.0",
            Score::Rejected => "0.0",
        })
    }
}

#[derive(Debug)]
pub struct Verdict {
    pub score: Score,
    pub kind: Option<ErrorKind>,
    pub message: String,
}

impl Verdict {
    pub fn accept() -> Self {
        Self {
            score: Score::Accepted,
            kind: None,
            message: "Output correct".into(),
        }
    }

    pub fn reject(err: &CheckError) -> Self {
        Self {
            score: Score::Rejected,
            kind: Some(err.kind()),
            message: err.to_string(),
        }
    }

    pub fn report(&self) -> Report<'_> {
        Report {
            score: self.score.value(),
            status: self.kind.map_or("accepted", ErrorKind::as_str),
            message: &self.message,
        }
    }
}

impl From<Result<(), CheckError>> for Verdict {
    fn from(result: Result<(), CheckError>) -> Self {
        match result {
            Ok(()) => Self::accept(),
            Err(err) => Self::reject(&err),
        }
    }
}

/// Machine-readable form of a verdict, written by `--report`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub score: f64,
    pub status: &'static str,
    pub message: &'a str,
}
