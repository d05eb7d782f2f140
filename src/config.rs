//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/pathtree/pathtree.toml`
//! 3. Local config: a TOML file passed to [`Settings::load`]
//! 4. Environment variables: `PATHTREE__*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{TreeError, TreeResult};

/// Text rendering options, see [`crate::TreeNodeConvert`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Label used for a node whose value renders as an empty string
    pub empty_label: String,
    /// Prefix every label with the node's path, e.g. `/0/1 leaf1-b`
    pub show_paths: bool,
    /// Deepest level rendered (root is 0); None renders everything
    pub max_depth: Option<usize>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            empty_label: "<empty>".into(),
            show_paths: false,
            max_depth: None,
        }
    }
}

/// Raw render settings for intermediate parsing (None → field not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderSettings {
    pub empty_label: Option<String>,
    pub show_paths: Option<bool>,
    pub max_depth: Option<usize>,
}

impl RenderSettings {
    /// Overlay wins wherever it specifies a value.
    pub fn merge(&self, overlay: &RawRenderSettings) -> Self {
        Self {
            empty_label: overlay
                .empty_label
                .clone()
                .unwrap_or_else(|| self.empty_label.clone()),
            show_paths: overlay.show_paths.unwrap_or(self.show_paths),
            max_depth: overlay.max_depth.or(self.max_depth),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub initial_capacity: Option<usize>,
    #[serde(default)]
    pub render: RawRenderSettings,
}

/// Unified configuration for pathtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Number of node slots reserved up front by [`crate::Tree::with_settings`]
    pub initial_capacity: usize,
    /// Text rendering options
    pub render: RenderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            render: RenderSettings::default(),
        }
    }
}

/// Get the XDG config directory for pathtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pathtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("pathtree.toml"))
}

fn config_err(e: ConfigError) -> TreeError {
    TreeError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> TreeResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| TreeError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| TreeError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base); overlay wins if specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            initial_capacity: overlay.initial_capacity.unwrap_or(self.initial_capacity),
            render: self.render.merge(&overlay.render),
        }
    }

    /// Parse a TOML document on top of the compiled defaults.
    pub fn from_toml_str(content: &str) -> TreeResult<Self> {
        let raw: RawSettings = toml::from_str(content).map_err(|e| TreeError::Config {
            message: format!("parse: {}", e),
        })?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional TOML file layered over the global config
    ///
    /// Missing files are skipped; unreadable or malformed ones are errors.
    pub fn load(local: Option<&Path>) -> TreeResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("Loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Local config
        if let Some(local_path) = local {
            if local_path.exists() {
                debug!("Loading local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(local_path)?);
            }
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply PATHTREE__* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> TreeResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("PATHTREE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("initial_capacity") {
            settings.initial_capacity = parse_usize("initial_capacity", &val)?;
        }
        if let Ok(val) = config.get_string("render.empty_label") {
            settings.render.empty_label = val;
        }
        if let Ok(val) = config.get_string("render.show_paths") {
            settings.render.show_paths = parse_bool("render.show_paths", &val)?;
        }
        if let Ok(val) = config.get_string("render.max_depth") {
            settings.render.max_depth = Some(parse_usize("render.max_depth", &val)?);
        }

        Ok(settings)
    }
}

fn parse_usize(key: &str, val: &str) -> TreeResult<usize> {
    val.trim().parse().map_err(|e| TreeError::Config {
        message: format!("{}: invalid value '{}': {}", key, val, e),
    })
}

fn parse_bool(key: &str, val: &str) -> TreeResult<bool> {
    val.trim().parse().map_err(|e| TreeError::Config {
        message: format!("{}: invalid value '{}': {}", key, val, e),
    })
}
