//! Sorting files into category subfolders.
//!
//! [`Sorter`] lists the immediate entries of one directory, classifies every
//! non-directory entry by extension and either reports the planned move
//! (dry run) or performs it through [`FileOrganizer`]. Per-file failures are
//! logged and skipped; only resolving and listing the directory are fatal.

use crate::file_category::{RuleTable, extension_of};
use crate::output::Report;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error};

/// Errors that can occur while sorting a directory.
#[derive(Debug, Error)]
pub enum SortError {
    /// No directory was given.
    #[error("Please specify a directory path with -dir flag")]
    EmptyPath,

    /// The directory could not be turned into an absolute path.
    #[error("Error getting absolute path for {}: {source}", path.display())]
    PathResolution { path: PathBuf, source: io::Error },

    /// The directory could not be listed.
    #[error("Error reading directory {}: {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    /// Two categories claim the same extension.
    #[error("Extension {extension} is listed under both {first} and {second}")]
    DuplicateExtension {
        extension: String,
        first: String,
        second: String,
    },

    /// A category folder could not be created.
    #[error("Error creating folder {}: {source}", path.display())]
    CreateFolder { path: PathBuf, source: io::Error },

    /// A file could not be moved into its category folder.
    #[error("Error moving file {} -> {}: {source}", from.display(), to.display())]
    MoveFile {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// The console report could not be written.
    #[error("Error writing output: {0}")]
    Output(#[from] io::Error),
}

impl SortError {
    /// Returns true for errors that abort the whole run.
    ///
    /// Folder creation and move failures only affect a single entry.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::CreateFolder { .. } | Self::MoveFile { .. })
    }
}

/// Result type for sorting operations.
pub type SortResult<T> = Result<T, SortError>;

/// Where a single file belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub file_name: OsString,
    pub category: &'static str,
    /// `<root>/<file_name>`
    pub source: PathBuf,
    /// `<root>/<category>/<file_name>`
    pub destination: PathBuf,
}

impl PlannedMove {
    /// Computes the placement of `file_name` found directly under `root`.
    pub fn new(root: &Path, file_name: &OsStr, rules: &RuleTable) -> Self {
        let category = rules.classify(&extension_of(&file_name.to_string_lossy()));
        Self {
            file_name: file_name.to_os_string(),
            category,
            source: root.join(file_name),
            destination: root.join(category).join(file_name),
        }
    }

    /// The category folder the file is moved into.
    pub fn folder(&self) -> &Path {
        self.destination.parent().unwrap_or(&self.destination)
    }
}

/// Filesystem side of sorting: folder creation and moves.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Creates `folder` and any missing parents. An existing folder is not an error.
    pub fn ensure_folder(folder: &Path) -> SortResult<()> {
        fs::create_dir_all(folder).map_err(|source| SortError::CreateFolder {
            path: folder.to_path_buf(),
            source,
        })
    }

    /// Ensures the category folder exists, then renames the file into it.
    ///
    /// The move is a single rename attempt; whether an existing destination is
    /// replaced is up to the platform.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::file_category::RuleTable;
    /// use dirsort::file_organizer::{FileOrganizer, PlannedMove};
    /// use std::ffi::OsStr;
    /// use std::path::Path;
    ///
    /// let rules = RuleTable::default();
    /// let planned = PlannedMove::new(Path::new("/tmp/inbox"), OsStr::new("song.mp3"), &rules);
    /// match FileOrganizer::apply(&planned) {
    ///     Ok(()) => println!("moved to {}", planned.destination.display()),
    ///     Err(e) => eprintln!("{e}"),
    /// }
    /// ```
    pub fn apply(planned: &PlannedMove) -> SortResult<()> {
        Self::ensure_folder(planned.folder())?;
        fs::rename(&planned.source, &planned.destination).map_err(|source| {
            SortError::MoveFile {
                from: planned.source.clone(),
                to: planned.destination.clone(),
                source,
            }
        })
    }
}

/// Outcome counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSummary {
    /// Files actually moved.
    pub moved: usize,
    /// Files reported in dry-run mode.
    pub planned: usize,
    /// Entries skipped because of a recoverable error.
    pub failed: usize,
    /// Subdirectories left in place.
    pub skipped_dirs: usize,
}

/// Sorts the immediate files of a directory into category folders.
pub struct Sorter<'a> {
    rules: &'a RuleTable,
    dry_run: bool,
}

impl<'a> Sorter<'a> {
    pub fn new(rules: &'a RuleTable, dry_run: bool) -> Self {
        Self { rules, dry_run }
    }

    /// Runs one sorting pass over `directory`, writing progress to `report`.
    ///
    /// # Errors
    ///
    /// Fails if `directory` is empty, cannot be made absolute or cannot be
    /// listed, or if the report cannot be written. Failures on individual
    /// files are logged and counted in [`SortSummary::failed`] instead.
    pub fn run<W: Write>(
        &self,
        directory: &Path,
        report: &mut Report<W>,
    ) -> SortResult<SortSummary> {
        let root = resolve(directory)?;

        report.started(&root)?;
        if self.dry_run {
            report.dry_run_notice()?;
        }

        let entries = fs::read_dir(&root).map_err(|source| SortError::ReadDir {
            path: root.clone(),
            source,
        })?;

        let mut summary = SortSummary::default();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    error!(path = %root.display(), error = %e, "Error reading directory entry");
                    summary.failed += 1;
                    continue;
                }
            };

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    error!(path = %entry.path().display(), error = %e, "Error reading file type");
                    summary.failed += 1;
                    continue;
                }
            };

            if file_type.is_dir() {
                debug!(path = %entry.path().display(), "Skipping directory");
                summary.skipped_dirs += 1;
                continue;
            }

            let planned = PlannedMove::new(&root, &entry.file_name(), self.rules);
            debug!(
                file = %planned.file_name.to_string_lossy(),
                category = planned.category,
                "Classified file"
            );

            if self.dry_run {
                report.would_move(&planned.source, &planned.destination)?;
                summary.planned += 1;
                continue;
            }

            match FileOrganizer::apply(&planned) {
                Ok(()) => {
                    report.moved(&planned.source, &planned.destination)?;
                    summary.moved += 1;
                }
                Err(e) => {
                    error!(path = %planned.source.display(), "{e}");
                    summary.failed += 1;
                }
            }
        }

        report.completed()?;
        Ok(summary)
    }
}

/// Turns `directory` into a clean absolute path without touching the filesystem.
fn resolve(directory: &Path) -> SortResult<PathBuf> {
    if directory.as_os_str().is_empty() {
        return Err(SortError::EmptyPath);
    }
    let absolute = std::path::absolute(directory).map_err(|source| SortError::PathResolution {
        path: directory.to_path_buf(),
        source,
    })?;
    Ok(clean(&absolute))
}

/// Lexically removes `.` and `..` components and any trailing separator.
///
/// `..` at the root stays at the root. Symlinks are not consulted, so
/// `link/..` is the directory containing `link`.
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if cleaned.parent().is_some() {
                    cleaned.pop();
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet_report() -> Report<Vec<u8>> {
        colored::control::set_override(false);
        Report::new(Vec::new())
    }

    #[test]
    fn test_planned_move_paths() {
        let rules = RuleTable::default();
        let planned = PlannedMove::new(Path::new("/data"), OsStr::new("clip.MKV"), &rules);
        assert_eq!(planned.category, "Videos");
        assert_eq!(planned.source, PathBuf::from("/data/clip.MKV"));
        assert_eq!(planned.destination, PathBuf::from("/data/Videos/clip.MKV"));
        assert_eq!(planned.folder(), Path::new("/data/Videos"));
    }

    #[test]
    fn test_planned_move_without_extension() {
        let rules = RuleTable::default();
        let planned = PlannedMove::new(Path::new("/data"), OsStr::new("Makefile"), &rules);
        assert_eq!(planned.category, "Other");
        assert_eq!(planned.destination, PathBuf::from("/data/Other/Makefile"));
    }

    #[test]
    fn test_apply_creates_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("report.pdf"), "test content").expect("write file");

        let planned = PlannedMove::new(base_path, OsStr::new("report.pdf"), &RuleTable::default());
        FileOrganizer::apply(&planned).expect("Failed to move file");

        assert!(base_path.join("Documents").is_dir());
        assert!(!base_path.join("report.pdf").exists());
        assert!(base_path.join("Documents/report.pdf").is_file());
    }

    #[test]
    fn test_apply_uses_existing_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::create_dir(base_path.join("Pictures")).expect("create folder");
        fs::write(base_path.join("Pictures/old.png"), "old").expect("write file");
        fs::write(base_path.join("new.png"), "new").expect("write file");

        let planned = PlannedMove::new(base_path, OsStr::new("new.png"), &RuleTable::default());
        FileOrganizer::apply(&planned).expect("Failed to move file");

        assert!(base_path.join("Pictures/old.png").is_file());
        assert!(base_path.join("Pictures/new.png").is_file());
    }

    #[test]
    fn test_apply_missing_source_is_recoverable() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let planned = PlannedMove::new(
            temp_dir.path(),
            OsStr::new("gone.zip"),
            &RuleTable::default(),
        );

        let err = FileOrganizer::apply(&planned).expect_err("source does not exist");
        assert!(matches!(err, SortError::MoveFile { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_ensure_folder_blocked_by_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let blocker = temp_dir.path().join("Music");
        fs::write(&blocker, "not a folder").expect("write file");

        let err = FileOrganizer::ensure_folder(&blocker).expect_err("file in the way");
        assert!(matches!(err, SortError::CreateFolder { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_resolve_rejects_empty_path() {
        let err = resolve(Path::new("")).expect_err("empty path");
        assert!(matches!(err, SortError::EmptyPath));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_resolve_makes_relative_path_absolute() {
        let resolved = resolve(Path::new("some/dir")).expect("resolvable");
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/dir"));
    }

    #[test]
    fn test_resolve_drops_parent_components() {
        let resolved = resolve(Path::new("/srv/ghost/../inbox")).expect("resolvable");
        assert_eq!(resolved, PathBuf::from("/srv/inbox"));

        let resolved = resolve(Path::new("a/../b")).expect("resolvable");
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("b"));
        assert!(!resolved.components().any(|c| c == Component::ParentDir));
    }

    #[test]
    fn test_resolve_drops_trailing_separator_and_dots() {
        let resolved = resolve(Path::new("/tmp/downloads/")).expect("resolvable");
        assert_eq!(resolved.as_os_str(), "/tmp/downloads");

        let resolved = resolve(Path::new("/tmp/./downloads/.")).expect("resolvable");
        assert_eq!(resolved.as_os_str(), "/tmp/downloads");
    }

    #[test]
    fn test_clean_stops_at_root() {
        assert_eq!(clean(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(clean(Path::new("/a/b/../../..")), PathBuf::from("/"));
    }

    #[test]
    fn test_run_through_missing_parent_component() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let inbox = temp_dir.path().join("inbox");
        fs::create_dir(&inbox).expect("create dir");
        fs::write(inbox.join("a.jpg"), "a").expect("write file");

        let rules = RuleTable::default();
        let mut report = quiet_report();
        let summary = Sorter::new(&rules, true)
            .run(&temp_dir.path().join("ghost/../inbox"), &mut report)
            .expect("ghost/.. is resolved lexically");

        assert_eq!(summary.planned, 1);
        let output = String::from_utf8(report.into_inner()).expect("utf-8 output");
        assert!(output.starts_with(&format!("Sorting files in: {}\n", inbox.display())));
    }

    #[test]
    fn test_run_counts_outcomes() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("a.jpg"), "a").expect("write file");
        fs::write(base_path.join("b.txt"), "b").expect("write file");
        fs::create_dir(base_path.join("nested")).expect("create dir");

        let rules = RuleTable::default();
        let mut report = quiet_report();
        let summary = Sorter::new(&rules, false)
            .run(base_path, &mut report)
            .expect("run succeeds");

        assert_eq!(
            summary,
            SortSummary {
                moved: 2,
                planned: 0,
                failed: 0,
                skipped_dirs: 1,
            }
        );
    }

    #[test]
    fn test_run_missing_directory_is_fatal() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("does-not-exist");

        let rules = RuleTable::default();
        let mut report = quiet_report();
        let err = Sorter::new(&rules, false)
            .run(&missing, &mut report)
            .expect_err("directory is missing");

        assert!(matches!(err, SortError::ReadDir { .. }));
        assert!(err.is_fatal());
        assert!(!missing.exists());
    }
}
