use std::sync::LazyLock;

use regex::Regex;

use crate::models::document::{Metadata, Sections, TitleStrategy, SECTION_COUNT};

/// Sections with at most this many characters count as missing.
const MIN_SECTION_CHARS: usize = 20;

static DEPENDENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`((?:dev|hb|ar)_[A-Za-z0-9_]+)(?:\.erl)?`").expect("dependency regex")
});

/// Percentage of sections with more than 20 characters, rounded to the
/// nearest integer.
#[must_use]
pub fn completeness(sections: &Sections) -> u8 {
    let filled = sections
        .values()
        .iter()
        .filter(|v| v.chars().count() > MIN_SECTION_CHARS)
        .count();
    ((filled * 100) as f64 / SECTION_COUNT as f64).round() as u8
}

/// Backtick-quoted module names in the dependencies section, in first-seen order.
#[must_use]
pub fn dependencies(section: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in DEPENDENCY.captures_iter(section) {
        let name = caps[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

/// Derive document metadata from its sections and raw content.
#[must_use]
pub fn derive(sections: &Sections, content: &str, strategy: TitleStrategy) -> Metadata {
    let lower = content.to_lowercase();
    Metadata {
        completeness: completeness(sections),
        dependencies: dependencies(&sections.dependencies),
        // Plain substring check; mentions like "untested" count too.
        has_tests: lower.contains("test"),
        has_code_examples: content.contains("```"),
        word_count: content.split_whitespace().count(),
        title_strategy: strategy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long(s: &str) -> String {
        format!("{s} with enough characters to count")
    }

    #[test]
    fn completeness_empty_is_zero() {
        assert_eq!(completeness(&Sections::default()), 0);
    }

    const KEYS: [&str; SECTION_COUNT] = [
        "overview",
        "keyCharacteristics",
        "dependencies",
        "implementationDetails",
        "integration",
        "architecturalSignificance",
        "strengths",
        "designPatterns",
        "challenges",
    ];

    #[test]
    fn completeness_full_is_hundred() {
        let mut sections = Sections::default();
        for key in KEYS {
            *sections.slot_mut(key).unwrap() = long(key);
        }
        assert_eq!(completeness(&sections), 100);
    }

    #[test]
    fn completeness_rounds_to_nearest() {
        for n in 0..=SECTION_COUNT {
            let mut sections = Sections::default();
            for key in &KEYS[..n] {
                *sections.slot_mut(key).unwrap() = long(key);
            }
            let expected = (100.0 * n as f64 / 9.0).round() as u8;
            let got = completeness(&sections);
            assert_eq!(got, expected);
            assert!(got <= 100);
        }
        // 1/9 = 11.1 -> 11, 5/9 = 55.6 -> 56
        let mut sections = Sections::default();
        sections.overview = long("overview");
        assert_eq!(completeness(&sections), 11);
    }

    #[test]
    fn short_sections_do_not_count() {
        let sections = Sections {
            overview: "Handles task scheduling.".into(),
            strengths: "exactly twenty chars".into(),
            ..Default::default()
        };
        assert_eq!("exactly twenty chars".len(), 20);
        assert_eq!(completeness(&sections), 11);
    }

    #[test]
    fn dependencies_dedup_in_order() {
        let deps = dependencies("- `hb_ao` for resolution\n- `dev_message.erl`\n- `hb_ao` again\n- `lists`");
        assert_eq!(deps, vec!["hb_ao".to_string(), "dev_message".to_string()]);
    }

    #[test]
    fn derive_flags() {
        let content = "# X\n\nThe EUnit Tests cover it.\n\n```erlang\nok.\n```\n";
        let meta = derive(&Sections::default(), content, TitleStrategy::FileName);
        assert!(meta.has_tests);
        assert!(meta.has_code_examples);
        assert_eq!(meta.title_strategy, TitleStrategy::FileName);
        assert!(meta.word_count > 5);

        let plain = derive(&Sections::default(), "nothing here", TitleStrategy::FileName);
        assert!(!plain.has_tests);
        assert!(!plain.has_code_examples);
    }
}
