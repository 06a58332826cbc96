//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level repair-pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The `edge`/`test_id`/line-range knobs of spec.md §4.5.
    pub pipeline: PipelineSettings,
    /// Which sinks run and where they write (spec.md §6 persisted layout).
    pub output: OutputSettings,
    /// Verbosity and log-level knobs, independent of pipeline behaviour.
    pub runtime: RuntimeSettings,
}

/// Controller options, serialized for reuse across runs (spec.md §4.5).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    /// Enables Stage2's edge-extension rule.
    pub edge: bool,
    /// Empty disables the evaluation harness.
    pub test_id: String,
    /// Per-camera harness blanking range, DF..DA order, `<= 0` skips a camera.
    pub first_line: [i32; 9],
    pub last_line: [i32; 9],
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            edge: false,
            test_id: String::new(),
            first_line: [0; 9],
            last_line: [0; 9],
        }
    }
}

impl PipelineSettings {
    /// Converts to the pipeline crate's own option type at the call
    /// boundary, so `rccm-pipeline` need not carry `serde` derives solely
    /// for configuration round-tripping.
    pub fn to_pipeline_options(&self) -> rccm_pipeline::PipelineOptions {
        rccm_pipeline::PipelineOptions {
            edge: self.edge,
            test_id: self.test_id.clone(),
            first_line: self.first_line,
            last_line: self.last_line,
        }
    }
}

/// Which sinks to persist through and where (spec.md §6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSettings {
    pub log: bool,
    pub save: bool,
    pub map: bool,
    pub log_dir: PathBuf,
    pub save_dir: PathBuf,
    pub map_dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            log: false,
            save: false,
            map: false,
            log_dir: PathBuf::from("./logs"),
            save_dir: PathBuf::from("./saves"),
            map_dir: PathBuf::from("./maps"),
        }
    }
}

impl OutputSettings {
    pub fn to_output_options(&self) -> rccm_pipeline::OutputOptions {
        rccm_pipeline::OutputOptions {
            log: self.log,
            save: self.save,
            map: self.map,
        }
    }
}

/// Verbosity/debug knobs, passed to `rccm_log::init_logging`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeSettings {
    pub verbose: bool,
    pub debug: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            verbose: false,
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
