use serde::Serialize;

/// A documented function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    pub description: String,
}

/// A fenced code example attached to a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    /// Info string of the fence (`erlang`, `bash`, ...), empty if none.
    pub language: String,
    pub code: String,
}

/// One `####` entry of the function reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub function_name: String,
    pub arity: Option<u32>,
    /// Heading text with markup removed.
    pub signature: String,
    pub description: String,
    pub params: Vec<Param>,
    pub returns: String,
    pub related_functions: Vec<String>,
    pub usage_notes: String,
    pub examples: Vec<Example>,
}

/// One `###` module of the function reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    pub name: String,
    pub description: String,
    pub subsystem: String,
    pub functions: Vec<FunctionRecord>,
}

/// Modules grouped under a named subsystem.
#[derive(Debug, Clone, Serialize)]
pub struct SubsystemRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub modules: Vec<ModuleRecord>,
}

impl SubsystemRecord {
    #[must_use]
    pub fn function_count(&self) -> usize {
        self.modules.iter().map(|m| m.functions.len()).sum()
    }
}
