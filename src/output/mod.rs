pub mod devices;
pub mod functions;

use std::path::Path;

use serde::Serialize;

use crate::error::Result;

pub use devices::{build_category_index, write_devices, DevicesWritten};
pub use functions::{write_reference, ReferenceWritten};

/// Serializes values to JSON files, creating parent directories as needed.
#[derive(Debug, Clone, Copy)]
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    #[must_use]
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Write `value` to `path`, overwriting any existing file.
    pub fn write<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "wrote json");
        Ok(())
    }
}
