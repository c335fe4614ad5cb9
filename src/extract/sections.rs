//! Heading-delimited section extraction.
//!
//! A section is the text between a heading whose title contains the wanted
//! name and the next heading of equal or higher level. Headings inside
//! fenced code blocks are not headings.

use crate::models::document::Sections;

/// A markdown heading found in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 0-based line index.
    pub line: usize,
    /// Number of leading `#`.
    pub level: usize,
    /// Heading text without the markers.
    pub text: String,
}

/// Parse a single line as an ATX heading.
#[must_use]
pub fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = strip_closing_sequence(rest.trim());
    if text.is_empty() {
        return None;
    }
    Some((level, text))
}

/// Drop a closing `#` run, but only when whitespace separates it from the
/// text (`## Using C#` keeps its `#`).
fn strip_closing_sequence(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.len() == text.len() {
        return text;
    }
    if without.is_empty() {
        return without;
    }
    if without.ends_with(char::is_whitespace) {
        without.trim_end()
    } else {
        text
    }
}

/// Whether a line opens or closes a fenced code block.
#[must_use]
pub fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// Collect all headings outside fenced code blocks.
#[must_use]
pub fn scan_headings(lines: &[&str]) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut in_fence = false;
    for (i, line) in lines.iter().enumerate() {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some((level, text)) = parse_heading(line) {
            headings.push(Heading {
                line: i,
                level,
                text: text.to_string(),
            });
        }
    }
    headings
}

/// Extract the body of the first heading (any level) containing `title`.
///
/// Matching is case-insensitive. Returns an empty string when no heading
/// matches.
#[must_use]
pub fn extract_section(source: &str, title: &str) -> String {
    extract(source, title, None)
}

/// Like [`extract_section`] but only headings of exactly `depth` match.
#[must_use]
pub fn extract_section_at(source: &str, title: &str, depth: usize) -> String {
    extract(source, title, Some(depth))
}

fn extract(source: &str, title: &str, depth: Option<usize>) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let headings = scan_headings(&lines);
    let needle = title.to_lowercase();

    let Some(idx) = headings.iter().position(|h| {
        depth.is_none_or(|d| h.level == d) && h.text.to_lowercase().contains(&needle)
    }) else {
        return String::new();
    };

    let start = &headings[idx];
    let end = headings[idx + 1..]
        .iter()
        .find(|h| h.level <= start.level)
        .map_or(lines.len(), |h| h.line);

    lines[start.line + 1..end].join("\n").trim().to_string()
}

/// A named section and the heading titles it may appear under.
struct SectionDef {
    key: &'static str,
    titles: &'static [&'static str],
    depth: usize,
}

const SECTION_DEFS: &[SectionDef] = &[
    SectionDef {
        key: "overview",
        titles: &["Overview"],
        depth: 2,
    },
    SectionDef {
        key: "keyCharacteristics",
        titles: &["Key Characteristics", "Key Features"],
        depth: 2,
    },
    SectionDef {
        key: "dependencies",
        titles: &["Dependencies"],
        depth: 2,
    },
    SectionDef {
        key: "implementationDetails",
        titles: &["Implementation Details", "Implementation"],
        depth: 2,
    },
    SectionDef {
        key: "integration",
        titles: &["Integration"],
        depth: 2,
    },
    SectionDef {
        key: "architecturalSignificance",
        titles: &["Architectural Significance", "Significance"],
        depth: 2,
    },
    // Subsections live under "Observations" but are looked up across the
    // whole document, not inside their parent.
    SectionDef {
        key: "strengths",
        titles: &["Strengths"],
        depth: 3,
    },
    SectionDef {
        key: "designPatterns",
        titles: &["Design Patterns"],
        depth: 3,
    },
    SectionDef {
        key: "challenges",
        titles: &["Challenges", "Limitations"],
        depth: 3,
    },
];

/// Extract every known section and subsection from an analysis.
#[must_use]
pub fn extract_sections(source: &str) -> Sections {
    let mut sections = Sections::default();
    for def in SECTION_DEFS {
        let body = def
            .titles
            .iter()
            .map(|title| extract_section_at(source, title, def.depth))
            .find(|body| !body.is_empty())
            .unwrap_or_default();
        if let Some(slot) = sections.slot_mut(def.key) {
            *slot = body;
        }
    }
    sections
}
