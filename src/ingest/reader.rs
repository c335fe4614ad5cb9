use std::path::Path;

use crate::ingest::scanner::SkipReason;

/// Read a source file as UTF-8 text, classifying failures as skip reasons.
pub fn read_source(path: &Path) -> std::result::Result<String, SkipReason> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(path = %path.display(), "cannot read file: {e}");
            return Err(SkipReason::IoError);
        }
    };

    String::from_utf8(bytes).map_err(|_| {
        tracing::warn!(path = %path.display(), "file is not valid UTF-8");
        SkipReason::NonUtf8
    })
}
