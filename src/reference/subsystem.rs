use std::sync::LazyLock;

use regex::Regex;

use crate::models::reference::{ModuleRecord, SubsystemRecord};

/// Bucket for modules no pattern claims.
pub const OTHER: &str = "other";

/// A named subsystem and the module-name patterns that belong to it.
pub struct Subsystem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    patterns: Vec<Regex>,
}

impl Subsystem {
    fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        patterns: &[&str],
    ) -> Self {
        Self {
            id,
            name,
            description,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("subsystem pattern"))
                .collect(),
        }
    }

    #[must_use]
    pub fn matches(&self, module: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(module))
    }
}

/// Subsystems in classification order; the first match wins, so narrower
/// prefixes (`dev_codec_`) come before broader ones (`dev_`).
static SUBSYSTEMS: LazyLock<Vec<Subsystem>> = LazyLock::new(|| {
    vec![
        Subsystem::new(
            "codecs",
            "Codecs",
            "Message encoding and decoding between wire formats.",
            &[r"^dev_codec_", r"^hb_structured_fields$", r"^hb_json$", r"^hb_escape$"],
        ),
        Subsystem::new(
            "storage",
            "Storage",
            "Content-addressed caching and pluggable store backends.",
            &[r"^hb_store", r"^hb_cache", r"^hb_persistent$"],
        ),
        Subsystem::new(
            "network",
            "Networking",
            "HTTP server, client, gateway access and request routing.",
            &[r"^hb_http", r"^hb_client$", r"^hb_gateway", r"^dev_router$", r"^dev_relay$", r"^hb_name$"],
        ),
        Subsystem::new(
            "arweave",
            "Arweave",
            "Arweave data structures, wallets and bundling.",
            &[r"^ar_"],
        ),
        Subsystem::new(
            "core",
            "Core Protocol",
            "AO-Core message resolution and the message model.",
            &[r"^hb_ao", r"^hb_message$", r"^hb_converge$", r"^hb_path$", r"^hb_private$", r"^hb_singleton$", r"^hb$"],
        ),
        Subsystem::new(
            "devices",
            "Devices",
            "Device implementations exposed through AO-Core.",
            &[r"^dev_"],
        ),
        Subsystem::new(
            "utilities",
            "Utilities",
            "Configuration, logging, debugging and helper modules.",
            &[r"^hb_util$", r"^hb_opts$", r"^hb_features$", r"^hb_debugger$", r"^hb_event$", r"^hb_logger$", r"^hb_test_utils$"],
        ),
    ]
});

/// Subsystem id for a module name. Always succeeds: unmatched names map to
/// [`OTHER`].
#[must_use]
pub fn classify(module: &str) -> &'static str {
    SUBSYSTEMS
        .iter()
        .find(|s| s.matches(module))
        .map_or(OTHER, |s| s.id)
}

/// Group modules by subsystem, in classification order with `other` last.
/// Subsystems without modules are left out.
#[must_use]
pub fn group(modules: Vec<ModuleRecord>) -> Vec<SubsystemRecord> {
    let mut groups: Vec<SubsystemRecord> = SUBSYSTEMS
        .iter()
        .map(|s| SubsystemRecord {
            id: s.id.to_string(),
            name: s.name.to_string(),
            description: s.description.to_string(),
            modules: Vec::new(),
        })
        .collect();
    groups.push(SubsystemRecord {
        id: OTHER.to_string(),
        name: "Other".to_string(),
        description: "Modules not assigned to a known subsystem.".to_string(),
        modules: Vec::new(),
    });

    for module in modules {
        let idx = groups
            .iter()
            .position(|g| g.id == module.subsystem)
            .unwrap_or(groups.len() - 1);
        groups[idx].modules.push(module);
    }

    groups.retain(|g| !g.modules.is_empty());
    groups
}
