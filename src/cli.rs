//! Command-line interface module for dirsort.
//!
//! This module handles:
//! - Flag definitions (`-dir`, `-dry-run`)
//! - Accepting single-dash long flags alongside the `--` forms
//! - Building the run options and starting the sorter

use crate::file_category::RuleTable;
use crate::file_organizer::{SortResult, SortSummary, Sorter};
use crate::output::Report;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// Sort the files of a directory into category subfolders.
#[derive(Debug, Parser)]
#[command(name = "dirsort", version, about)]
pub struct Args {
    /// Directory path to sort files
    #[arg(long = "dir", value_name = "PATH", default_value = ".")]
    pub dir: OsString,

    /// Dry run - show what would be done without actually moving files
    #[arg(
        long = "dry-run",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub dry_run: bool,
}

impl Args {
    /// Parses arguments, accepting `-dir`/`-dry-run` as well as `--dir`/`--dry-run`.
    pub fn parse_normalized<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_args(args))
    }

    /// Like [`Args::parse_normalized`] but returns clap's error instead of exiting.
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Rewrites single-dash long flags (`-dir`, `-dry-run=true`) to their
/// double-dash form. Short flags, values and everything after `--` are kept.
///
/// The word after a bare `-dir` is always its value, even if it starts
/// with a dash, so `-dir -inbox` sorts a directory named `-inbox`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    let mut dir_value_next = false;
    let mut normalized = Vec::new();

    for (i, arg) in args.into_iter().map(Into::into).enumerate() {
        if i == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        if dir_value_next {
            dir_value_next = false;
            // `--dir=<value>` keeps clap from reading a dashed value as a flag.
            let mut value = OsString::from("--dir=");
            value.push(&arg);
            normalized.pop();
            normalized.push(value);
            continue;
        }
        let Some(text) = arg.to_str().map(str::to_owned) else {
            normalized.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }
        if text == "-dir" || text == "--dir" {
            dir_value_next = true;
            normalized.push(OsString::from("--dir"));
            continue;
        }
        let name = text.split('=').next().unwrap_or(&text);
        let is_single_dash_long =
            name.len() > 2 && name.starts_with('-') && !name.starts_with("--");
        if is_single_dash_long {
            normalized.push(OsString::from(format!("-{text}")));
        } else {
            normalized.push(arg);
        }
    }
    normalized
}

/// Options for one sorting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptions {
    /// Directory whose immediate files are sorted.
    pub directory: PathBuf,
    /// If true, report the moves without making changes.
    pub dry_run: bool,
}

impl From<Args> for SortOptions {
    fn from(args: Args) -> Self {
        Self {
            directory: PathBuf::from(args.dir),
            dry_run: args.dry_run,
        }
    }
}

/// Runs a sorting pass with the default category table.
///
/// # Examples
///
/// ```no_run
/// use dirsort::cli::{SortOptions, run_cli};
/// use std::path::PathBuf;
///
/// let options = SortOptions { directory: PathBuf::from("/path/to/downloads"), dry_run: true };
/// match run_cli(&options, std::io::stdout()) {
///     Ok(summary) => println!("{} files would move", summary.planned),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli<W: Write>(options: &SortOptions, out: W) -> SortResult<SortSummary> {
    let rules = RuleTable::default();
    let mut report = Report::new(out);
    Sorter::new(&rules, options.dry_run).run(&options.directory, &mut report)
}
