use std::{
    fs::File,
    io::Read as _,
    path::{Path, PathBuf},
};

use crate::{
    data::{Answer, ProblemInput, Tokens},
    verdict::{CheckError, Field, FileRole},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    pub strict_input: bool,
}

#[derive(Debug, Clone)]
pub struct Paths {
    pub input: PathBuf,
    pub reference: PathBuf,
    pub submitted: PathBuf,
}

fn open(role: FileRole, path: &Path) -> Result<File, CheckError> {
    File::open(path).map_err(|source| CheckError::FileOpen {
        role,
        path: path.to_owned(),
        source,
    })
}

fn read_all(role: FileRole, path: &Path, mut file: File) -> Result<Vec<u8>, CheckError> {
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|source| CheckError::FileOpen {
            role,
            path: path.to_owned(),
            source,
        })?;
    Ok(data)
}

/// Grades one submission. `Ok(())` is the only accepting outcome.
pub fn run(paths: &Paths, options: Options) -> Result<(), CheckError> {
    // all three must open before anything is parsed
    let input = open(FileRole::Input, &paths.input)?;
    let reference = open(FileRole::Reference, &paths.reference)?;
    let submitted = open(FileRole::Submitted, &paths.submitted)?;

    let input = read_all(FileRole::Input, &paths.input, input)?;
    let reference = read_all(FileRole::Reference, &paths.reference, reference)?;
    let submitted = read_all(FileRole::Submitted, &paths.submitted, submitted)?;

    let problem = ProblemInput::parse(
        &mut Tokens::new(FileRole::Input, &input),
        options.strict_input,
    )?;
    log::debug!(
        "problem input: {} stops ({} boarding, {} alighting values read), capacity {}",
        problem.count,
        problem.on.len(),
        problem.off.len(),
        problem.capacity
    );

    let reference = Answer::reference(&mut Tokens::new(FileRole::Reference, &reference))?;
    log::debug!("reference answer: {reference:?}");

    compare(&reference, &mut Tokens::new(FileRole::Submitted, &submitted))
}

/// Reads the submitted answer lazily: the index is only consumed when the
/// reference carries one, and anything after it is ignored.
pub fn compare(reference: &Answer, submitted: &mut Tokens<'_>) -> Result<(), CheckError> {
    let max_value = submitted.next_int()?.ok_or(CheckError::MissingMax {
        role: FileRole::Submitted,
    })?;
    if max_value != reference.max_value {
        return Err(CheckError::Mismatch {
            field: Field::Max,
            expected: reference.max_value,
            actual: max_value,
        });
    }

    if let Some(expected) = reference.index {
        let index = submitted.next_int()?.ok_or(CheckError::MissingIndex)?;
        if index != expected {
            return Err(CheckError::Mismatch {
                field: Field::Index,
                expected,
                actual: index,
            });
        }
    }
    Ok(())
}
