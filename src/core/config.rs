//! Layered configuration
//!
//! Layers, lowest first:
//! 1. built-in defaults
//! 2. `<config_dir>/config.yaml` (global)
//! 3. `.spc.yaml` in the current directory (project)
//! 4. `SPC_LSL` / `SPC_USL` environment overrides
//!
//! An explicit `--config` file (or `SPC_CONFIG`) replaces layers 2 and 3.
//! Each file only needs the keys it changes.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File name of the per-project config
pub const PROJECT_FILE: &str = ".spc.yaml";

/// Errors loading configuration
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(spc::config::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    #[diagnostic(
        code(spc::config::parse),
        help("config files are YAML; see `spec_limits`, `output` and `log_level`")
    )]
    Parse { path: String, message: String },

    #[error("Invalid value for {key}: {value:?}")]
    #[diagnostic(code(spc::config::value))]
    InvalidValue { key: String, value: String },
}

/// Default specification limits for curves without indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecLimits {
    /// Lower specification limit
    pub lsl: f64,

    /// Upper specification limit
    pub usl: f64,
}

impl Default for SpecLimits {
    fn default() -> Self {
        Self {
            lsl: 85.0,
            usl: 115.0,
        }
    }
}

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format name (auto, text, json, yaml, tsv, csv)
    pub format: String,

    /// Decimal places for numbers in text output
    pub decimals: usize,

    /// Colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "auto".to_string(),
            decimals: 3,
            color: true,
        }
    }
}

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub spec_limits: SpecLimits,

    pub output: OutputConfig,

    /// Log filter used when neither `SPC_LOG` nor `-v` is given
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spec_limits: SpecLimits::default(),
            output: OutputConfig::default(),
            log_level: "warn".to_string(),
        }
    }
}

/// One config file; absent keys leave the lower layer alone
#[derive(Debug, Default, Deserialize)]
struct ConfigLayer {
    #[serde(default)]
    spec_limits: Option<SpecLimitsLayer>,

    #[serde(default)]
    output: Option<OutputLayer>,

    #[serde(default)]
    log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SpecLimitsLayer {
    lsl: Option<f64>,
    usl: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OutputLayer {
    format: Option<String>,
    decimals: Option<usize>,
    color: Option<bool>,
}

impl Config {
    /// Location of the global config file
    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "spc").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Load every layer; `explicit` replaces the global and project files
    ///
    /// A discovered file that fails to load is skipped and returned alongside
    /// the config so the caller can warn once logging is up. An explicit file
    /// or a bad `SPC_LSL` / `SPC_USL` is an error.
    pub fn load_from(explicit: Option<&Path>) -> Result<(Self, Vec<ConfigError>), ConfigError> {
        let discovered = match explicit {
            Some(_) => Vec::new(),
            None => Self::discovered_paths(),
        };
        Self::load_layers(explicit, &discovered, |key| std::env::var(key).ok())
    }

    /// Global then project file, whichever exist
    fn discovered_paths() -> Vec<PathBuf> {
        Self::global_path()
            .into_iter()
            .chain(std::iter::once(PathBuf::from(PROJECT_FILE)))
            .filter(|p| p.exists())
            .collect()
    }

    /// Apply `explicit`, then each discovered file, then the environment
    pub fn load_layers(
        explicit: Option<&Path>,
        discovered: &[PathBuf],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, Vec<ConfigError>), ConfigError> {
        let mut config = Config::default();
        let mut skipped = Vec::new();

        if let Some(path) = explicit {
            config.merge_file(path)?;
        }
        for path in discovered {
            if let Err(e) = config.merge_file(path) {
                debug!(path = %path.display(), "config layer skipped");
                skipped.push(e);
            }
        }

        config.apply_env_with(lookup)?;
        Ok((config, skipped))
    }

    /// Merge one YAML file over the current values
    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.merge_str(&content, &path.display().to_string())?;
        debug!(path = %path.display(), "config layer applied");
        Ok(())
    }

    /// Merge YAML text over the current values
    pub fn merge_str(&mut self, content: &str, origin: &str) -> Result<(), ConfigError> {
        if content.trim().is_empty() {
            return Ok(());
        }
        let layer: ConfigLayer = serde_yml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        self.apply(layer);
        Ok(())
    }

    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(limits) = layer.spec_limits {
            if let Some(lsl) = limits.lsl {
                self.spec_limits.lsl = lsl;
            }
            if let Some(usl) = limits.usl {
                self.spec_limits.usl = usl;
            }
        }
        if let Some(output) = layer.output {
            if let Some(format) = output.format {
                self.output.format = format;
            }
            if let Some(decimals) = output.decimals {
                self.output.decimals = decimals;
            }
            if let Some(color) = output.color {
                self.output.color = color;
            }
        }
        if let Some(level) = layer.log_level {
            self.log_level = level;
        }
    }

    /// Apply `SPC_LSL` / `SPC_USL` from a variable lookup
    pub fn apply_env_with(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        for (key, slot) in [
            ("SPC_LSL", &mut self.spec_limits.lsl),
            ("SPC_USL", &mut self.spec_limits.usl),
        ] {
            if let Some(raw) = lookup(key) {
                *slot = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or(ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: raw.clone(),
                    })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.spec_limits.lsl, 85.0);
        assert_eq!(config.spec_limits.usl, 115.0);
        assert_eq!(config.output.format, "auto");
        assert_eq!(config.output.decimals, 3);
        assert!(config.output.color);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_layer_keeps_other_keys() {
        let mut config = Config::default();
        config
            .merge_str("spec_limits:\n  usl: 120\noutput:\n  color: false\n", "test.yaml")
            .unwrap();
        assert_eq!(config.spec_limits.lsl, 85.0);
        assert_eq!(config.spec_limits.usl, 120.0);
        assert!(!config.output.color);
        assert_eq!(config.output.decimals, 3);
    }

    #[test]
    fn test_layers_stack_in_order() {
        let mut config = Config::default();
        config.merge_str("log_level: info\n", "global").unwrap();
        config.merge_str("log_level: debug\n", "project").unwrap();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "spec_limits: [not, a, map").unwrap();
        let err = Config::default().merge_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_with(|key| (key == "SPC_LSL").then(|| "90.5".to_string()))
            .unwrap();
        assert_eq!(config.spec_limits.lsl, 90.5);
        assert_eq!(config.spec_limits.usl, 115.0);

        let err = config
            .apply_env_with(|key| (key == "SPC_USL").then(|| "wide".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_explicit_file_replaces_discovery() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output:\n  decimals: 5").unwrap();
        let (config, skipped) = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.output.decimals, 5);
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_broken_discovered_file_keeps_other_layers() {
        let dir = tempfile::TempDir::new().unwrap();
        let global = dir.path().join("config.yaml");
        let project = dir.path().join(PROJECT_FILE);
        std::fs::write(&global, "output:\n  decimals: 4\n").unwrap();
        std::fs::write(&project, "spec_limits: [not, a, map\n").unwrap();

        let (config, skipped) = Config::load_layers(None, &[global, project.clone()], |key| {
            (key == "SPC_LSL").then(|| "50".to_string())
        })
        .unwrap();

        assert_eq!(config.output.decimals, 4);
        assert_eq!(config.spec_limits.lsl, 50.0);
        assert_eq!(config.spec_limits.usl, 115.0);
        assert_eq!(skipped.len(), 1);
        assert!(matches!(skipped[0], ConfigError::Parse { .. }));
        assert!(skipped[0].to_string().contains(&project.display().to_string()));
    }

    #[test]
    fn test_bad_env_value_is_fatal_without_explicit_file() {
        let err = Config::load_layers(None, &[], |key| (key == "SPC_USL").then(|| "wide".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
