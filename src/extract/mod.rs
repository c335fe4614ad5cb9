pub mod category;
pub mod metadata;
pub mod sections;
pub mod title;

use crate::error::Result;
use crate::models::document::Document;

pub use category::categorize;
pub use sections::{extract_section, extract_section_at, extract_sections};
pub use title::{resolve, Identity};

/// Build a [`Document`] from one analysis file.
///
/// `file_name` is the bare markdown file name and `source_path` its path
/// relative to the source root. Fails only when no title strategy applies.
pub fn parse_document(source: &str, file_name: &str, source_path: &str) -> Result<Document> {
    let identity = title::resolve(source, file_name)?;
    let sections = sections::extract_sections(source);
    let category = category::categorize(&identity.filename, source);
    let metadata = metadata::derive(&sections, source, identity.strategy);

    Ok(Document {
        id: identity.id(),
        name: identity.name,
        filename: identity.filename,
        category,
        sections,
        metadata,
        source_path: source_path.to_string(),
        raw_content: source.to_string(),
    })
}
