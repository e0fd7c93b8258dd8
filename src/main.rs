use std::{
    ffi::OsString,
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;

mod check;
mod data;
mod verdict;

use verdict::{CheckError, Verdict};

/// Output checker for the judging system.
///
/// Prints `1.0` or `0.0` on stdout, a diagnostic on stderr, and always exits
/// with status 0.
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// Problem input file
    input: PathBuf,
    /// Reference (correct) output file
    correct_output: PathBuf,
    /// Contestant output file
    user_output: PathBuf,
    #[arg(hide = true)]
    ignored: Vec<OsString>,
    /// Reject truncated or malformed problem input instead of reading zeros
    #[arg(long, env = "CHECKER_STRICT_INPUT")]
    strict_input: bool,
    /// Also write the verdict as JSON to this file
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

impl Args {
    fn paths(&self) -> check::Paths {
        check::Paths {
            input: self.input.clone(),
            reference: self.correct_output.clone(),
            submitted: self.user_output.clone(),
        }
    }
}

fn write_report(path: &Path, verdict: &Verdict) -> anyhow::Result<()> {
    let mut report_file = BufWriter::new(
        File::create(path).with_context(|| format!("create report {}", path.display()))?,
    );
    serde_json::to_writer(&mut report_file, &verdict.report())?;
    writeln!(&mut report_file)?;
    report_file.flush()?;
    Ok(())
}

fn main() {
    env_logger::init();

    let verdict = match Args::try_parse() {
        Ok(args) => {
            if !args.ignored.is_empty() {
                log::debug!("ignoring {} extra arguments", args.ignored.len());
            }
            let options = check::Options {
                strict_input: args.strict_input,
            };
            let verdict = Verdict::from(check::run(&args.paths(), options));
            if let Some(path) = &args.report {
                if let Err(err) = write_report(path, &verdict) {
                    log::warn!("{err:#}");
                }
            }
            verdict
        }
        Err(err) => {
            let usage = err.render().to_string();
            Verdict::reject(&CheckError::Usage(usage.trim_end().to_owned()))
        }
    };

    eprintln!("{}", verdict.message);
    println!("{}", verdict.score);
}
