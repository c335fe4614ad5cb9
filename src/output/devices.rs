use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::document::{Category, CategoryEntry, Document, DocumentSummary};
use crate::output::JsonWriter;

/// Per-document files live here, relative to the output directory.
pub const DEVICES_DIR: &str = "devices";
pub const DEVICES_FILE: &str = "devices.json";
pub const INDEX_FILE: &str = "index.json";
pub const CATEGORIES_FILE: &str = "categories.json";

/// What a device serialization pass wrote.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DevicesWritten {
    /// Per-document writes (duplicate ids overwrite, so this may
    /// exceed the number of distinct files on disk).
    pub documents: usize,
    pub categories: BTreeMap<Category, usize>,
}

/// Map each category to its documents, in processing order. Categories
/// without documents are absent.
#[must_use]
pub fn build_category_index(docs: &[Document]) -> BTreeMap<Category, Vec<CategoryEntry>> {
    let mut index: BTreeMap<Category, Vec<CategoryEntry>> = BTreeMap::new();
    for doc in docs {
        index.entry(doc.category).or_default().push(doc.category_entry());
    }
    index
}

/// Write one file per document plus the aggregate, index and category files.
///
/// Documents sharing an id are written in order, so the later one's file
/// replaces the earlier one. Both stay in the aggregate array.
pub fn write_devices(writer: &JsonWriter, out_dir: &Path, docs: &[Document]) -> Result<DevicesWritten> {
    let docs_dir = out_dir.join(DEVICES_DIR);
    std::fs::create_dir_all(&docs_dir)?;

    for doc in docs {
        writer.write(&docs_dir.join(format!("{}.json", doc.id)), doc)?;
    }

    writer.write(&out_dir.join(DEVICES_FILE), docs)?;

    let summaries: Vec<DocumentSummary> = docs.iter().map(Document::summary).collect();
    writer.write(&out_dir.join(INDEX_FILE), &summaries)?;

    let categories = build_category_index(docs);
    writer.write(&out_dir.join(CATEGORIES_FILE), &categories)?;

    Ok(DevicesWritten {
        documents: docs.len(),
        categories: categories.iter().map(|(c, entries)| (*c, entries.len())).collect(),
    })
}
