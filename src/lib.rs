//! dirsort - sort a directory's files into category subfolders
//!
//! This library classifies files by extension against a fixed category table
//! and moves each file directly under a directory into `<dir>/<Category>/`,
//! or reports the moves without touching anything in dry-run mode.

pub mod cli;
pub mod file_category;
pub mod file_organizer;
pub mod output;

pub use file_category::{CategoryRule, FALLBACK_CATEGORY, RuleTable};
pub use file_organizer::{FileOrganizer, PlannedMove, SortError, SortSummary, Sorter};
pub use output::Report;

pub use cli::{SortOptions, run_cli};
