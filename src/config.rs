use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DocgenError, Result};

/// Config filename, looked up in the project root.
const CONFIG_FILE: &str = "docgen.toml";

/// Project-level configuration resolved from the working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory all relative settings are resolved against.
    pub project_root: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Directory tree holding the device analysis markdown files.
    pub source_dir: PathBuf,
    /// Flat function reference markdown file.
    pub reference_path: PathBuf,
    /// Directory the JSON data is written to.
    pub output_dir: PathBuf,
    /// User settings loaded from docgen.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from docgen.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Device analysis source settings.
    pub source: SourceSettings,
    /// Function reference settings.
    pub reference: ReferenceSettings,
    /// Output configuration.
    pub output: OutputSettings,
}

/// Where device analyses live and which files count.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Source directory (relative to the project root).
    pub dir: String,
    /// Only files whose name ends with this suffix are loaded.
    pub suffix: String,
    /// Files whose name contains this substring are skipped.
    pub exclude: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            dir: "analysis".into(),
            suffix: ".md".into(),
            exclude: "summary".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferenceSettings {
    /// Function reference file (relative to the project root).
    pub file: String,
}

impl Default for ReferenceSettings {
    fn default() -> Self {
        Self {
            file: "function_reference.md".into(),
        }
    }
}

/// Output-related settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output directory (relative to the project root).
    pub dir: String,
    /// Pretty-print written JSON files.
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: "data".into(),
            pretty: true,
        }
    }
}

impl Config {
    /// Create config for a given project root.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let config_path = project_root.join(CONFIG_FILE);

        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self::with_settings(project_root, config_path, settings)
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| DocgenError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    fn with_settings(project_root: PathBuf, config_path: PathBuf, settings: UserSettings) -> Self {
        let source_dir = project_root.join(&settings.source.dir);
        let reference_path = project_root.join(&settings.reference.file);
        let output_dir = project_root.join(&settings.output.dir);
        Self {
            project_root,
            config_path,
            source_dir,
            reference_path,
            output_dir,
            settings,
        }
    }

    /// Load settings from docgen.toml if it exists.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), "ignoring invalid config: {e}");
                None
            }
        }
    }

    /// Override the analysis source directory (relative paths resolve against the root).
    #[must_use]
    pub fn with_source_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.source_dir = self.project_root.join(dir);
        self
    }

    /// Override the function reference file.
    #[must_use]
    pub fn with_reference_path(mut self, file: impl AsRef<Path>) -> Self {
        self.reference_path = self.project_root.join(file);
        self
    }

    /// Override the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = self.project_root.join(dir);
        self
    }

    /// Directory holding per-function-reference outputs.
    #[must_use]
    pub fn functions_output_dir(&self) -> PathBuf {
        self.output_dir.join("functions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_new_sets_paths() {
        let cfg = Config::new("/tmp/project");
        assert_eq!(cfg.project_root, PathBuf::from("/tmp/project"));
        assert_eq!(cfg.config_path, PathBuf::from("/tmp/project/docgen.toml"));
        assert_eq!(cfg.source_dir, PathBuf::from("/tmp/project/analysis"));
        assert_eq!(
            cfg.reference_path,
            PathBuf::from("/tmp/project/function_reference.md")
        );
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/project/data"));
        assert_eq!(
            cfg.functions_output_dir(),
            PathBuf::from("/tmp/project/data/functions")
        );
    }

    #[test]
    fn overrides_resolve_against_root() {
        let cfg = Config::new("/tmp/project")
            .with_source_dir("docs/devices")
            .with_output_dir("/abs/out")
            .with_reference_path("ref.md");
        assert_eq!(cfg.source_dir, PathBuf::from("/tmp/project/docs/devices"));
        assert_eq!(cfg.output_dir, PathBuf::from("/abs/out"));
        assert_eq!(cfg.reference_path, PathBuf::from("/tmp/project/ref.md"));
    }

    #[test]
    fn load_settings_from_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            "[source]\ndir = \"notes\"\nexclude = \"draft\"\n\n[output]\npretty = false\n",
        )
        .unwrap();

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.settings.source.dir, "notes");
        assert_eq!(cfg.settings.source.exclude, "draft");
        assert!(!cfg.settings.output.pretty);
        assert_eq!(cfg.source_dir, tmp.path().join("notes"));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "[output]\ndir = \"public/data\"\n").unwrap();

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.output_dir, tmp.path().join("public/data"));
        assert!(cfg.settings.output.pretty);
        assert_eq!(cfg.settings.source.suffix, ".md");
    }

    #[test]
    fn default_settings() {
        let settings = UserSettings::default();
        assert_eq!(settings.source.dir, "analysis");
        assert_eq!(settings.source.suffix, ".md");
        assert_eq!(settings.source.exclude, "summary");
        assert_eq!(settings.reference.file, "function_reference.md");
        assert_eq!(settings.output.dir, "data");
        assert!(settings.output.pretty);
    }

    #[test]
    fn load_invalid_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "invalid toml {{{{").unwrap();

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.settings.source.dir, "analysis");
        assert_eq!(cfg.settings.output.dir, "data");
    }
}
