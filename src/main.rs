//! Salary File CLI
//!
//! Reads a JSON batch description and writes the fixed-width salary file
//! next to it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- [--strict] [--output <path>] salaries.json
//! ```
//!
//! Without `--output` the result is written to `salaries.in.txt`.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity
//! - `SALARY_FILE_STRICT`: Set to `1` or `true` to fail on oversized fields
//!   instead of truncating them

use log::debug;
use salary_file::{OverflowPolicy, Result, SalaryFile, SalaryFileError};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;

const STRICT_ENV: &str = "SALARY_FILE_STRICT";

/// Command-line options.
#[derive(Debug)]
struct Options {
    input: PathBuf,
    output: PathBuf,
    policy: OverflowPolicy,
}

impl Options {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut input = None;
        let mut output = None;
        let mut strict = env::var(STRICT_ENV)
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--strict" => strict = true,
                "-o" | "--output" => {
                    output = Some(PathBuf::from(
                        args.next().ok_or(SalaryFileError::MissingArgument)?,
                    ))
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(SalaryFileError::UnknownOption(flag.to_string()))
                }
                _ if input.is_none() => input = Some(PathBuf::from(&arg)),
                _ => return Err(SalaryFileError::UnknownOption(arg.clone())),
            }
        }

        let input = input.ok_or(SalaryFileError::MissingArgument)?;
        let output = output.unwrap_or_else(|| default_output(&input));
        let policy = if strict {
            OverflowPolicy::Reject
        } else {
            OverflowPolicy::Truncate
        };

        Ok(Options {
            input,
            output,
            policy,
        })
    }
}

/// `salaries.json` becomes `salaries.in.txt` in the same directory.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("in.txt")
}

fn main() {
    env_logger::init();

    match run() {
        Ok(output) => println!("File '{}' has been successfully created.", output.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<PathBuf> {
    let options = Options::parse(env::args().skip(1))?;
    debug!("{:?}", options);

    let file = File::open(&options.input)?;
    let salary_file = SalaryFile::from_json(BufReader::new(file), options.policy)?;
    salary_file.save(&options.output)?;

    Ok(options.output)
}
