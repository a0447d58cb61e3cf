//! Console report for a sorting run.
//!
//! All user-facing progress lines go through [`Report`], which writes to any
//! `io::Write` so the same lines can be sent to stdout or captured in tests.
//! Errors are not part of the report; they are logged to the diagnostic
//! stream by the caller.

use colored::*;
use std::io::{self, Write};
use std::path::Path;

/// Line-oriented writer for the run's console output.
pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Prints the directory being sorted.
    pub fn started(&mut self, directory: &Path) -> io::Result<()> {
        writeln!(self.out, "Sorting files in: {}", directory.display())
    }

    /// Prints the dry-run banner in yellow.
    pub fn dry_run_notice(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "{}",
            "DRY RUN MODE - No files will be actually moved".yellow()
        )
    }

    /// Prints a move that would happen outside of dry-run mode.
    pub fn would_move(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        writeln!(
            self.out,
            "[Dry Run] Would move: {} -> {}",
            from.display(),
            to.display()
        )
    }

    /// Prints a completed move.
    pub fn moved(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        writeln!(self.out, "Moved: {} -> {}", from.display(), to.display())
    }

    /// Prints the completion message in green.
    pub fn completed(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "File sorting completed!".green())?;
        self.out.flush()
    }

    /// Consumes the report, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(f: impl FnOnce(&mut Report<Vec<u8>>) -> io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut report = Report::new(Vec::new());
        f(&mut report).expect("write to buffer");
        String::from_utf8(report.into_inner()).expect("utf-8 output")
    }

    #[test]
    fn test_started_line() {
        let out = capture(|r| r.started(Path::new("/tmp/downloads")));
        assert_eq!(out, "Sorting files in: /tmp/downloads\n");
    }

    #[test]
    fn test_dry_run_lines() {
        let out = capture(|r| {
            r.dry_run_notice()?;
            r.would_move(Path::new("/d/a.jpg"), Path::new("/d/Pictures/a.jpg"))
        });
        assert_eq!(
            out,
            "DRY RUN MODE - No files will be actually moved\n\
             [Dry Run] Would move: /d/a.jpg -> /d/Pictures/a.jpg\n"
        );
    }

    #[test]
    fn test_moved_and_completed_lines() {
        let out = capture(|r| {
            r.moved(Path::new("/d/b.mp4"), Path::new("/d/Videos/b.mp4"))?;
            r.completed()
        });
        assert_eq!(
            out,
            "Moved: /d/b.mp4 -> /d/Videos/b.mp4\nFile sorting completed!\n"
        );
    }
}
