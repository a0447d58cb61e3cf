//! File categorization by extension.
//!
//! Categories are described by an ordered table of [`CategoryRule`]s. A file's
//! extension is matched against the rules in order and the first rule that
//! lists it names the destination folder; anything unmatched goes to
//! [`FALLBACK_CATEGORY`].
//!
//! # Examples
//!
//! ```
//! use dirsort::file_category::{RuleTable, extension_of};
//!
//! let rules = RuleTable::default();
//! assert_eq!(rules.classify(&extension_of("holiday.JPG")), "Pictures");
//! assert_eq!(rules.classify(&extension_of("notes")), "Other");
//! ```

use crate::file_organizer::SortError;

/// Category for files whose extension matches no rule.
pub const FALLBACK_CATEGORY: &str = "Other";

/// A named category and the extensions that belong to it.
///
/// Extensions are lowercase and include the leading dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    /// Folder name files of this category are moved into.
    pub name: &'static str,
    /// Extensions, e.g. `".jpg"`.
    pub extensions: &'static [&'static str],
}

const DEFAULT_RULES: &[CategoryRule] = &[
    CategoryRule {
        name: "Pictures",
        extensions: &[
            ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp", ".svg",
        ],
    },
    CategoryRule {
        name: "Videos",
        extensions: &[".mp4", ".mov", ".avi", ".mkv", ".flv", ".wmv", ".webm"],
    },
    CategoryRule {
        name: "Music",
        extensions: &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".wma"],
    },
    CategoryRule {
        name: "Documents",
        extensions: &[
            ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".txt", ".rtf",
        ],
    },
    CategoryRule {
        name: "Archives",
        extensions: &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2"],
    },
    CategoryRule {
        name: "Programs",
        extensions: &[".exe", ".msi", ".dmg", ".pkg", ".deb", ".rpm"],
    },
];

/// Ordered, immutable set of category rules.
///
/// Built once at startup and handed to the sorter by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
}

impl RuleTable {
    /// Builds a table from `rules`, rejecting any extension listed under
    /// more than one category.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::DuplicateExtension`] naming the extension and both
    /// categories that claim it.
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self, SortError> {
        for (i, rule) in rules.iter().enumerate() {
            for ext in rule.extensions {
                let claimed_later = rules[i + 1..]
                    .iter()
                    .find(|other| other.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
                if let Some(other) = claimed_later {
                    return Err(SortError::DuplicateExtension {
                        extension: ext.to_lowercase(),
                        first: rule.name.to_string(),
                        second: other.name.to_string(),
                    });
                }
            }
        }
        Ok(Self { rules })
    }

    /// Returns the category name for `extension`.
    ///
    /// Matching is exact on the full extension including the dot, after
    /// lowercasing. Unknown and empty extensions map to [`FALLBACK_CATEGORY`].
    pub fn classify(&self, extension: &str) -> &'static str {
        let extension = extension.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.extensions.iter().any(|ext| *ext == extension))
            .map_or(FALLBACK_CATEGORY, |rule| rule.name)
    }

    /// Category names in table order, excluding the fallback.
    pub fn categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }

    /// The rules in match order.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
        }
    }
}

/// Extracts the lowercased extension of a file name.
///
/// The extension runs from the last `.` to the end of the name, dot included.
/// Names without a dot have an empty extension; a dotfile such as `.bashrc`
/// is its own extension.
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rfind('.')
        .map(|idx| file_name[idx..].to_lowercase())
        .unwrap_or_default()
}
