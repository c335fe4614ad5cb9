use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::reference::SubsystemRecord;
use crate::output::JsonWriter;
use crate::reference::{build_index, build_stats, ReferenceStats};

pub const SUBSYSTEMS_DIR: &str = "subsystems";
pub const MODULES_DIR: &str = "modules";
pub const INDEX_FILE: &str = "index.json";
pub const STATS_FILE: &str = "stats.json";

/// What a function reference serialization pass wrote.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReferenceWritten {
    pub subsystems: usize,
    pub modules: usize,
    pub functions: usize,
}

/// Write per-subsystem and per-module files plus the index and stats.
pub fn write_reference(
    writer: &JsonWriter,
    out_dir: &Path,
    subsystems: &[SubsystemRecord],
) -> Result<ReferenceWritten> {
    std::fs::create_dir_all(out_dir.join(SUBSYSTEMS_DIR))?;
    std::fs::create_dir_all(out_dir.join(MODULES_DIR))?;

    for subsystem in subsystems {
        writer.write(
            &out_dir.join(SUBSYSTEMS_DIR).join(format!("{}.json", subsystem.id)),
            subsystem,
        )?;
        for module in &subsystem.modules {
            writer.write(
                &out_dir.join(MODULES_DIR).join(format!("{}.json", module.name)),
                module,
            )?;
        }
    }

    writer.write(&out_dir.join(INDEX_FILE), &build_index(subsystems))?;

    let stats: ReferenceStats = build_stats(subsystems);
    writer.write(&out_dir.join(STATS_FILE), &stats)?;

    Ok(ReferenceWritten {
        subsystems: stats.total_subsystems,
        modules: stats.total_modules,
        functions: stats.total_functions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{group, parse_reference};
    use tempfile::TempDir;

    fn read(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn writes_reference_tree() {
        let tmp = TempDir::new().unwrap();
        let groups = group(parse_reference(
            "### hb_ao\n\n#### get_field/2\n\n**Parameters**:\n- `Msg`: message\n- `Key`: key\n\n### mystery\n\n#### go/0\n",
        ));
        let written = write_reference(&JsonWriter::new(true), tmp.path(), &groups).unwrap();
        assert_eq!(written.subsystems, 2);
        assert_eq!(written.modules, 2);
        assert_eq!(written.functions, 2);

        let module = read(&tmp.path().join("modules/hb_ao.json"));
        assert_eq!(module["functions"][0]["functionName"], "get_field");
        assert_eq!(module["functions"][0]["arity"], 2);
        assert_eq!(module["functions"][0]["params"][1]["name"], "Key");

        let other = read(&tmp.path().join("subsystems/other.json"));
        assert_eq!(other["modules"][0]["name"], "mystery");

        let index = read(&tmp.path().join(INDEX_FILE));
        assert_eq!(index[0]["id"], "core");
        assert_eq!(index[0]["functionCount"], 1);

        let stats = read(&tmp.path().join(STATS_FILE));
        assert_eq!(stats["totalFunctions"], 2);
        assert_eq!(stats["functionsWithParams"], 1);
    }

    #[test]
    fn empty_reference_still_writes_index_and_stats() {
        let tmp = TempDir::new().unwrap();
        let written = write_reference(&JsonWriter::new(false), tmp.path(), &[]).unwrap();
        assert_eq!(written.functions, 0);
        assert_eq!(std::fs::read_to_string(tmp.path().join(INDEX_FILE)).unwrap(), "[]");
        assert!(tmp.path().join(STATS_FILE).exists());
    }
}
