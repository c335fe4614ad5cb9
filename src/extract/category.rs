use crate::models::document::Category;

/// A category and the keywords that select it.
struct CategoryRule {
    category: Category,
    /// Substrings looked for in the lower-cased module filename.
    filename: &'static [&'static str],
    /// Substrings looked for in the lower-cased content.
    content: &'static [&'static str],
}

impl CategoryRule {
    fn matches(&self, filename: &str, content: &str) -> bool {
        self.filename.iter().any(|k| filename.contains(k))
            || self.content.iter().any(|k| content.contains(k))
    }
}

/// Rules in priority order. A document matching several rules takes the
/// first one listed.
const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Scheduler,
        filename: &["scheduler", "cron", "queue"],
        content: &["task scheduling", "scheduler device"],
    },
    CategoryRule {
        category: Category::Payment,
        filename: &["p4", "faff", "pay", "ledger"],
        content: &["payment", "pricing"],
    },
    CategoryRule {
        category: Category::Routing,
        filename: &["router", "relay", "route", "gateway"],
        content: &["routing", "load balanc"],
    },
    CategoryRule {
        category: Category::Runtime,
        filename: &["wasm", "wasi", "lua", "json_iface", "genesis"],
        content: &["webassembly", "execution environment"],
    },
    CategoryRule {
        category: Category::Security,
        filename: &["snp", "green_zone", "httpsig", "hmac", "auth"],
        content: &["attestation", "trusted execution", "cryptographic verification"],
    },
    CategoryRule {
        category: Category::Core,
        filename: &["hb_ao", "dev_message", "dev_process", "dev_stack", "dev_meta", "hb_converge"],
        content: &["core protocol", "message resolution"],
    },
];

/// Assign a category from the module filename and document content.
///
/// Deterministic: the same inputs always yield the same label.
#[must_use]
pub fn categorize(filename: &str, content: &str) -> Category {
    let filename = filename.to_lowercase();
    let content = content.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&filename, &content))
        .map_or(Category::Utility, |rule| rule.category)
}
