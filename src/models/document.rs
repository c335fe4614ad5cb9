use std::fmt;

use serde::Serialize;

/// Coarse classification label for a device analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Scheduler,
    Payment,
    Routing,
    Runtime,
    Security,
    Core,
    Utility,
}

impl Category {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduler => "scheduler",
            Self::Payment => "payment",
            Self::Routing => "routing",
            Self::Runtime => "runtime",
            Self::Security => "security",
            Self::Core => "core",
            Self::Utility => "utility",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which title heuristic produced a document's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TitleStrategy {
    /// `# Name Analysis (`file.erl`)`
    BacktickHeading,
    /// `# Name Analysis (file.erl)`
    PlainHeading,
    /// `# Name Module Analysis` plus a filename token elsewhere.
    ModuleHeading,
    /// Derived from the markdown file's own name.
    FileName,
}

/// Number of sections a complete analysis carries.
pub const SECTION_COUNT: usize = 9;

/// Extracted section bodies. Missing sections are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sections {
    pub overview: String,
    pub key_characteristics: String,
    pub dependencies: String,
    pub implementation_details: String,
    pub integration: String,
    pub architectural_significance: String,
    pub strengths: String,
    pub design_patterns: String,
    pub challenges: String,
}

impl Sections {
    /// All section bodies in declaration order.
    #[must_use]
    pub fn values(&self) -> [&str; SECTION_COUNT] {
        [
            &self.overview,
            &self.key_characteristics,
            &self.dependencies,
            &self.implementation_details,
            &self.integration,
            &self.architectural_significance,
            &self.strengths,
            &self.design_patterns,
            &self.challenges,
        ]
    }

    /// Mutable slot for a section key (camelCase, as serialized).
    pub fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        let slot = match key {
            "overview" => &mut self.overview,
            "keyCharacteristics" => &mut self.key_characteristics,
            "dependencies" => &mut self.dependencies,
            "implementationDetails" => &mut self.implementation_details,
            "integration" => &mut self.integration,
            "architecturalSignificance" => &mut self.architectural_significance,
            "strengths" => &mut self.strengths,
            "designPatterns" => &mut self.design_patterns,
            "challenges" => &mut self.challenges,
            _ => return None,
        };
        Some(slot)
    }
}

/// Facts derived from a document's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Percentage of sections present and non-trivial, 0..=100.
    pub completeness: u8,
    /// Module names referenced in the dependencies section.
    pub dependencies: Vec<String>,
    /// Crude substring check for test coverage being discussed.
    pub has_tests: bool,
    pub has_code_examples: bool,
    pub word_count: usize,
    pub title_strategy: TitleStrategy,
}

/// One parsed device analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub filename: String,
    pub category: Category,
    pub sections: Sections,
    pub metadata: Metadata,
    /// Source markdown path relative to the source root.
    pub source_path: String,
    pub raw_content: String,
}

impl Document {
    #[must_use]
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            filename: self.filename.clone(),
            category: self.category,
            completeness: self.metadata.completeness,
        }
    }

    #[must_use]
    pub fn category_entry(&self) -> CategoryEntry {
        CategoryEntry {
            id: self.id.clone(),
            name: self.name.clone(),
            filename: self.filename.clone(),
        }
    }
}

/// Row of `index.json`.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub name: String,
    pub filename: String,
    pub category: Category,
    pub completeness: u8,
}

/// Row of a category list in `categories.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
    pub filename: String,
}
