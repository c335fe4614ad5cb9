use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::error::{DocgenError, Result};
use crate::extract::parse_document;
use crate::ingest::{read_source, Scanner, SkipReason};
use crate::models::document::{Category, Document};
use crate::models::reference::ModuleRecord;
use crate::output::{write_devices, write_reference, JsonWriter};
use crate::reference::{group, parse_reference};

/// Statistics from a device analysis run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DevicesResult {
    pub files_scanned: usize,
    pub documents_written: usize,
    /// Total files skipped (sum of all skip categories).
    pub files_skipped: usize,
    pub skipped_io_error: usize,
    pub skipped_non_utf8: usize,
    /// Files no title strategy could name.
    pub unresolved_titles: usize,
    pub categories: BTreeMap<Category, usize>,
}

impl DevicesResult {
    fn skip(&mut self, reason: SkipReason) {
        self.files_skipped += 1;
        match reason {
            SkipReason::IoError => self.skipped_io_error += 1,
            SkipReason::NonUtf8 => self.skipped_non_utf8 += 1,
            SkipReason::UnresolvedTitle => self.unresolved_titles += 1,
        }
    }
}

/// Statistics from a function reference run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FunctionsResult {
    /// False when the reference file was missing.
    pub source_found: bool,
    pub subsystems: usize,
    pub modules: usize,
    pub functions: usize,
}

/// Combined result of `build`.
#[derive(Debug, Clone, Serialize)]
pub struct BuildResult {
    pub devices: DevicesResult,
    pub functions: FunctionsResult,
}

/// Scan, parse and serialize every device analysis under the source dir.
pub fn run_devices(config: &Config) -> Result<DevicesResult> {
    let source = &config.settings.source;
    let scanner = Scanner::new(&config.source_dir, &source.suffix, &source.exclude);
    let scanned = scanner.scan()?;

    let mut result = DevicesResult {
        files_scanned: scanned.len(),
        ..Default::default()
    };

    let mut docs: Vec<Document> = Vec::with_capacity(scanned.len());
    for file in &scanned {
        let text = match read_source(&file.path) {
            Ok(text) => text,
            Err(reason) => {
                result.skip(reason);
                continue;
            }
        };

        match parse_document(&text, &file.file_name, &file.relative_path) {
            Ok(doc) => {
                tracing::debug!(
                    path = %file.relative_path,
                    id = %doc.id,
                    category = %doc.category,
                    completeness = doc.metadata.completeness,
                    "parsed analysis"
                );
                docs.push(doc);
            }
            Err(DocgenError::UnresolvedTitle { .. }) => {
                tracing::warn!(path = %file.relative_path, "no title or module name found, skipping");
                result.skip(SkipReason::UnresolvedTitle);
            }
            Err(e) => return Err(e),
        }
    }

    let writer = JsonWriter::new(config.settings.output.pretty);
    let written = write_devices(&writer, &config.output_dir, &docs)?;
    result.documents_written = written.documents;
    result.categories = written.categories;

    tracing::info!(
        scanned = result.files_scanned,
        written = result.documents_written,
        skipped = result.files_skipped,
        "device analyses processed"
    );
    Ok(result)
}

/// Parse the function reference and write its JSON tree.
///
/// A missing reference file is logged and produces empty outputs.
pub fn run_functions(config: &Config) -> Result<FunctionsResult> {
    let modules = match load_reference(&config.reference_path)? {
        Some(modules) => modules,
        None => {
            tracing::warn!(
                path = %config.reference_path.display(),
                "function reference not found, writing empty outputs"
            );
            let writer = JsonWriter::new(config.settings.output.pretty);
            write_reference(&writer, &config.functions_output_dir(), &[])?;
            return Ok(FunctionsResult::default());
        }
    };

    let subsystems = group(modules);
    let writer = JsonWriter::new(config.settings.output.pretty);
    let written = write_reference(&writer, &config.functions_output_dir(), &subsystems)?;

    tracing::info!(
        modules = written.modules,
        functions = written.functions,
        "function reference processed"
    );
    Ok(FunctionsResult {
        source_found: true,
        subsystems: written.subsystems,
        modules: written.modules,
        functions: written.functions,
    })
}

/// Run both pipelines.
pub fn run_build(config: &Config) -> Result<BuildResult> {
    Ok(BuildResult {
        devices: run_devices(config)?,
        functions: run_functions(config)?,
    })
}

/// Parse one analysis file without writing anything.
pub fn inspect_document(path: &Path) -> Result<Document> {
    let text = read_text(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_document(&text, &file_name, &file_name)
}

/// Parse a function reference file without writing anything.
pub fn inspect_reference(path: &Path, module: Option<&str>) -> Result<Vec<ModuleRecord>> {
    let mut modules = parse_reference(&read_text(path)?);
    if let Some(name) = module {
        modules.retain(|m| m.name == name);
        if modules.is_empty() {
            return Err(DocgenError::NotFound {
                what: format!("module {name}"),
            });
        }
    }
    Ok(modules)
}

fn load_reference(path: &Path) -> Result<Option<Vec<ModuleRecord>>> {
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(parse_reference(&read_text(path)?)))
}

fn read_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(DocgenError::NotFound {
            what: path.display().to_string(),
        });
    }
    read_source(path).map_err(|reason| DocgenError::Parse {
        path: path.display().to_string(),
        detail: reason.as_str().to_string(),
    })
}
