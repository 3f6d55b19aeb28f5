use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::fss::FuzzRanges;
use crate::model::{EditMode, Model};

/// User-level defaults, stored as JSON under the platform config dir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsConfig {
    pub version: u32,
    #[serde(default)]
    pub mode: EditMode,
    #[serde(default = "default_layer_count")]
    pub default_layers: usize,
    #[serde(default)]
    pub fuzz: FuzzRanges,
}

fn default_layer_count() -> usize {
    2
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            version: 1,
            mode: EditMode::default(),
            default_layers: default_layer_count(),
            fuzz: FuzzRanges::default(),
        }
    }
}

impl SettingsConfig {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("elmsfeuer").join("settings.json"))
    }

    /// Settings from the config dir; defaults when missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        let Some(path) = Self::path() else {
            return;
        };
        if let Err(e) = self.save_to(&path) {
            log::error!("Failed to save settings: {e:#}");
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", path.display()))?;
        if let Err(e) = settings.fuzz.validate() {
            log::warn!("Settings fuzz ranges rejected ({e}), using defaults");
            return Ok(Self {
                fuzz: FuzzRanges::default(),
                ..settings
            });
        }
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Fresh model with the configured mode and layer count.
    pub fn initial_model(&self) -> Model {
        Model::default_layers(self.mode, self.default_layers)
    }
}
