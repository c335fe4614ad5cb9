use std::path::PathBuf;

use ignore::WalkBuilder;
use serde::Serialize;

use crate::error::Result;

/// Reason why a file was skipped during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// File content is not valid UTF-8.
    NonUtf8,
    /// IO error while reading the file.
    IoError,
    /// No title heuristic produced a name and filename.
    UnresolvedTitle,
}

impl SkipReason {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NonUtf8 => "non_utf8",
            SkipReason::IoError => "io_error",
            SkipReason::UnresolvedTitle => "unresolved_title",
        }
    }
}

/// A markdown file selected for processing.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Path relative to the scan root (forward slashes).
    pub relative_path: String,
    /// Bare file name, used by the title fallback.
    pub file_name: String,
}

/// Recursive markdown loader filtering by name suffix and exclusion substring.
pub struct Scanner {
    root: PathBuf,
    suffix: String,
    exclude: String,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>, suffix: impl Into<String>, exclude: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
            exclude: exclude.into(),
        }
    }

    /// Whether a file name passes the suffix and exclusion filters.
    #[must_use]
    pub fn accepts(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix)
            && (self.exclude.is_empty() || !file_name.contains(&self.exclude))
    }

    /// Walk the root directory and return matching files sorted by relative path.
    ///
    /// A missing root is not an error: it is logged and yields no files.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        if !self.root.is_dir() {
            tracing::warn!(root = %self.root.display(), "source directory does not exist");
            return Ok(Vec::new());
        }

        let mut files: Vec<ScannedFile> = WalkBuilder::new(&self.root)
            .hidden(true)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .follow_links(false)
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .filter_map(|e| {
                let file_name = e.file_name().to_string_lossy().into_owned();
                if !self.accepts(&file_name) {
                    return None;
                }
                let path = e.into_path();
                let relative_path = path
                    .strip_prefix(&self.root)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .replace('\\', "/");
                Some(ScannedFile {
                    path,
                    relative_path,
                    file_name,
                })
            })
            .collect();

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        tracing::debug!(count = files.len(), root = %self.root.display(), "scanned source files");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner(root: &std::path::Path) -> Scanner {
        Scanner::new(root, ".md", "summary")
    }

    #[test]
    fn accepts_applies_suffix_and_exclusion() {
        let s = Scanner::new("/tmp", ".md", "summary");
        assert!(s.accepts("01_dev_scheduler_analysis.md"));
        assert!(!s.accepts("notes.txt"));
        assert!(!s.accepts("00_summary.md"));
    }

    #[test]
    fn empty_exclusion_excludes_nothing() {
        let s = Scanner::new("/tmp", ".md", "");
        assert!(s.accepts("summary.md"));
    }

    #[test]
    fn scanner_recurses_and_filters() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("core").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("b_analysis.md"), "# B").unwrap();
        fs::write(nested.join("a_analysis.md"), "# A").unwrap();
        fs::write(tmp.path().join("overall_summary.md"), "# S").unwrap();
        fs::write(tmp.path().join("image.png"), "binary").unwrap();

        let files = scanner(tmp.path()).scan().unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["b_analysis.md", "core/deep/a_analysis.md"]);
        assert_eq!(files[1].file_name, "a_analysis.md");
    }

    #[test]
    fn scanner_skips_hidden_dirs() {
        let tmp = TempDir::new().unwrap();
        let hidden = tmp.path().join(".cache");
        fs::create_dir_all(&hidden).unwrap();
        fs::write(hidden.join("x.md"), "# X").unwrap();
        fs::write(tmp.path().join("y.md"), "# Y").unwrap();

        let files = scanner(tmp.path()).scan().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "y.md");
    }

    #[test]
    fn missing_root_yields_empty() {
        let tmp = TempDir::new().unwrap();
        let files = scanner(&tmp.path().join("nope")).scan().unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn skip_reason_names() {
        assert_eq!(SkipReason::UnresolvedTitle.as_str(), "unresolved_title");
        assert_eq!(
            serde_json::to_string(&SkipReason::NonUtf8).unwrap(),
            "\"non_utf8\""
        );
    }
}
