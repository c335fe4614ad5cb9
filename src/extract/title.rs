//! Name and module filename resolution for device analyses.
//!
//! Strategies are tried in a fixed order and the first one that produces an
//! identity wins.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DocgenError, Result};
use crate::models::document::TitleStrategy;

static BACKTICK_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]+Analysis[ \t]*\(`([^`]+)`\)").expect("backtick heading regex")
});
static PLAIN_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]+Analysis[ \t]*\(([^)`]+)\)").expect("plain heading regex")
});
static MODULE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#[ \t]+(.+?)(?:[ \t]+Module)?[ \t]+Analysis[ \t\r]*$")
        .expect("module heading regex")
});

// Filename tokens, matched against lower-cased text.
static QUOTED_MODULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`((?:dev|hb|ar)_[a-z0-9_]+)(?:\.erl)?`").expect("quoted module regex")
});
static MODULE_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"module:\**[ \t]*`?([a-z][a-z0-9_]*)").expect("module annotation regex")
});
static BARE_MODULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b((?:dev|hb|ar)_[a-z0-9_]+)\b").expect("bare module regex")
});
static NUMERIC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[_\-. ]*").expect("numeric prefix regex"));

/// Resolved display name and module filename of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub filename: String,
    pub strategy: TitleStrategy,
}

impl Identity {
    /// Stable identifier: the filename without its extension.
    #[must_use]
    pub fn id(&self) -> String {
        Path::new(&self.filename)
            .file_stem()
            .map_or_else(|| self.filename.clone(), |s| s.to_string_lossy().into_owned())
    }
}

type Strategy = fn(&str, &str) -> Option<(String, String)>;

/// Title strategies in priority order.
const STRATEGIES: &[(TitleStrategy, Strategy)] = &[
    (TitleStrategy::BacktickHeading, from_backtick_heading),
    (TitleStrategy::PlainHeading, from_plain_heading),
    (TitleStrategy::ModuleHeading, from_module_heading),
    (TitleStrategy::FileName, from_file_name),
];

/// Resolve `(name, filename)` for a document.
///
/// `file_name` is the markdown file's own name, used by the last fallback.
pub fn resolve(source: &str, file_name: &str) -> Result<Identity> {
    STRATEGIES
        .iter()
        .find_map(|(strategy, f)| {
            f(source, file_name).map(|(name, filename)| Identity {
                name,
                filename,
                strategy: *strategy,
            })
        })
        .ok_or_else(|| DocgenError::UnresolvedTitle {
            path: file_name.to_string(),
        })
}

fn from_backtick_heading(source: &str, _file_name: &str) -> Option<(String, String)> {
    let caps = BACKTICK_HEADING.captures(source)?;
    Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
}

fn from_plain_heading(source: &str, _file_name: &str) -> Option<(String, String)> {
    let caps = PLAIN_HEADING.captures(source)?;
    let filename = caps[2].trim();
    if filename.is_empty() {
        return None;
    }
    Some((caps[1].trim().to_string(), filename.to_string()))
}

fn from_module_heading(source: &str, _file_name: &str) -> Option<(String, String)> {
    let caps = MODULE_HEADING.captures(source)?;
    let name = caps[1].trim().to_string();
    let module = find_module_token(&source.to_lowercase())?;
    Some((name, format!("{module}.erl")))
}

/// First module token in the text: quoted, then annotated, then bare.
fn find_module_token(lower: &str) -> Option<String> {
    [&*QUOTED_MODULE, &*MODULE_ANNOTATION, &*BARE_MODULE]
        .iter()
        .find_map(|re| re.captures(lower).map(|c| c[1].to_string()))
}

fn from_file_name(_source: &str, file_name: &str) -> Option<(String, String)> {
    let stem = Path::new(file_name).file_stem()?.to_string_lossy();
    let stem = NUMERIC_PREFIX.replace(&stem, "");
    let stem: &str = if stem.eq_ignore_ascii_case("analysis") {
        ""
    } else {
        stem.strip_suffix("_analysis").unwrap_or(&stem)
    };

    let words: Vec<String> = stem
        .split('_')
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect();
    if words.is_empty() || !stem.chars().any(char::is_alphanumeric) {
        return None;
    }
    Some((words.join(" "), format!("{stem}.erl")))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backtick_heading_captures_exactly() {
        let src = "# Scheduler Analysis (`dev_scheduler.erl`)\n\n## Overview\n";
        let id = resolve(src, "whatever.md").unwrap();
        assert_eq!(id.name, "Scheduler");
        assert_eq!(id.filename, "dev_scheduler.erl");
        assert_eq!(id.strategy, TitleStrategy::BacktickHeading);
        assert_eq!(id.id(), "dev_scheduler");
    }

    #[test]
    fn backtick_heading_keeps_multiword_name() {
        let src = "# Process Module Analysis (`dev_process.erl`)\n";
        let id = resolve(src, "x.md").unwrap();
        assert_eq!(id.name, "Process Module");
        assert_eq!(id.filename, "dev_process.erl");
    }

    #[test]
    fn plain_heading() {
        let src = "# Message Analysis (dev_message.erl)\n";
        let id = resolve(src, "x.md").unwrap();
        assert_eq!(id.name, "Message");
        assert_eq!(id.filename, "dev_message.erl");
        assert_eq!(id.strategy, TitleStrategy::PlainHeading);
    }

    #[test]
    fn module_heading_with_quoted_token() {
        let src = "# Relay Module Analysis\n\nThe `dev_relay.erl` device forwards `hb_http` calls.\n";
        let id = resolve(src, "x.md").unwrap();
        assert_eq!(id.name, "Relay");
        assert_eq!(id.filename, "dev_relay.erl");
        assert_eq!(id.strategy, TitleStrategy::ModuleHeading);
    }

    #[test]
    fn module_heading_with_crlf_line_endings() {
        let src = "# Relay Module Analysis\r\n\r\nThe `dev_relay.erl` device.\r\n";
        let id = resolve(src, "notes.md").unwrap();
        assert_eq!(id.name, "Relay");
        assert_eq!(id.filename, "dev_relay.erl");
        assert_eq!(id.strategy, TitleStrategy::ModuleHeading);
    }

    #[test]
    fn module_heading_prefers_quoted_over_annotation() {
        let src = "# Cache Analysis\n\nModule: hb_store\n\nSee `hb_cache`.\n";
        let id = resolve(src, "x.md").unwrap();
        assert_eq!(id.filename, "hb_cache.erl");
    }

    #[test]
    fn module_heading_with_annotation() {
        let src = "# Lua Analysis\n\n**Module:** lua_runtime\n";
        let id = resolve(src, "x.md").unwrap();
        assert_eq!(id.name, "Lua");
        assert_eq!(id.filename, "lua_runtime.erl");
    }

    #[test]
    fn module_heading_with_bare_token_in_lowercased_text() {
        let src = "# Router Analysis\n\nImplemented in DEV_ROUTER.\n";
        let id = resolve(src, "x.md").unwrap();
        assert_eq!(id.filename, "dev_router.erl");
    }

    #[test]
    fn module_heading_without_token_falls_back_to_file_name() {
        let src = "# Something Analysis\n\nNo module named here.\n";
        let id = resolve(src, "07_dev_cron_analysis.md").unwrap();
        assert_eq!(id.strategy, TitleStrategy::FileName);
        assert_eq!(id.name, "Dev Cron");
        assert_eq!(id.filename, "dev_cron.erl");
    }

    #[test]
    fn file_name_fallback_strips_prefix_and_suffix() {
        let id = resolve("no heading at all", "12_hb_ao_analysis.md").unwrap();
        assert_eq!(id.name, "Hb Ao");
        assert_eq!(id.filename, "hb_ao.erl");
        assert_eq!(id.id(), "hb_ao");
    }

    #[test]
    fn unresolvable_document_is_rejected() {
        let err = resolve("nothing useful", "01_analysis.md").unwrap_err();
        assert!(matches!(err, DocgenError::UnresolvedTitle { .. }));
        assert!(resolve("", "___.md").is_err());
    }

    #[test]
    fn second_level_headings_do_not_count() {
        let src = "## Scheduler Analysis (`dev_scheduler.erl`)\n";
        let id = resolve(src, "dev_other.md").unwrap();
        assert_eq!(id.strategy, TitleStrategy::FileName);
    }
}
