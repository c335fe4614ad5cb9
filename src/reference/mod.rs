pub mod parser;
pub mod subsystem;

use serde::Serialize;

use crate::models::reference::SubsystemRecord;

pub use parser::{parse_reference, parse_signature};
pub use subsystem::{classify, group};

/// Row of the function reference `index.json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsystemIndexEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub modules: Vec<String>,
    pub function_count: usize,
}

/// Per-subsystem counts in `stats.json`.
#[derive(Debug, Clone, Serialize)]
pub struct SubsystemCount {
    pub id: String,
    pub modules: usize,
    pub functions: usize,
}

/// Aggregate statistics over a parsed function reference.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceStats {
    pub total_subsystems: usize,
    pub total_modules: usize,
    pub total_functions: usize,
    pub functions_with_examples: usize,
    pub functions_with_params: usize,
    pub by_subsystem: Vec<SubsystemCount>,
}

#[must_use]
pub fn build_index(subsystems: &[SubsystemRecord]) -> Vec<SubsystemIndexEntry> {
    subsystems
        .iter()
        .map(|s| SubsystemIndexEntry {
            id: s.id.clone(),
            name: s.name.clone(),
            description: s.description.clone(),
            modules: s.modules.iter().map(|m| m.name.clone()).collect(),
            function_count: s.function_count(),
        })
        .collect()
}

#[must_use]
pub fn build_stats(subsystems: &[SubsystemRecord]) -> ReferenceStats {
    let functions = || {
        subsystems
            .iter()
            .flat_map(|s| &s.modules)
            .flat_map(|m| &m.functions)
    };

    ReferenceStats {
        total_subsystems: subsystems.len(),
        total_modules: subsystems.iter().map(|s| s.modules.len()).sum(),
        total_functions: functions().count(),
        functions_with_examples: functions().filter(|f| !f.examples.is_empty()).count(),
        functions_with_params: functions().filter(|f| !f.params.is_empty()).count(),
        by_subsystem: subsystems
            .iter()
            .map(|s| SubsystemCount {
                id: s.id.clone(),
                modules: s.modules.len(),
                functions: s.function_count(),
            })
            .collect(),
    }
}
