use anyhow::{Context, Result};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_EXCLUSION_RADIUS: f32 = 5.0;

/// Settings administrators edit on disk. Field names follow the keys that
/// existing server owners already have in their config files.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CratesConfig {
    #[serde(rename = "Whitelisted LootContainers (Short Prefab Name)")]
    pub whitelisted_containers: Vec<String>,

    #[serde(rename = "Automatic saving LootContainers to data file")]
    pub autosave: bool,

    #[serde(rename = "Time between killing LootContainers when the timer is on")]
    pub kill_interval_secs: u64,

    #[serde(rename = "Time between redraws in the interface of the number of LootContainers by type")]
    pub ui_refresh_interval_secs: u64,

    #[serde(rename = "Time between updates of the LootContainers list")]
    pub scan_interval_secs: u64,

    #[serde(rename = "Radius around exclusion zones in which LootContainers are not tracked")]
    pub exclusion_radius: f32,
}

impl Default for CratesConfig {
    fn default() -> Self {
        Self {
            whitelisted_containers: [
                "crate_normal",
                "crate_normal_2",
                "crate_basic",
                "foodbox",
                "vehicle_parts",
                "crate_elite",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            autosave: true,
            kill_interval_secs: 30,
            ui_refresh_interval_secs: 2,
            scan_interval_secs: 30,
            exclusion_radius: DEFAULT_EXCLUSION_RADIUS,
        }
    }
}

impl CratesConfig {
    pub fn kill_interval(&self) -> Duration {
        Duration::from_secs(self.kill_interval_secs.max(1))
    }

    pub fn ui_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.ui_refresh_interval_secs.max(1))
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs.max(1))
    }

    pub fn is_whitelisted(&self, short_prefab_name: &str) -> bool {
        self.whitelisted_containers.iter().any(|name| name == short_prefab_name)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    /// A missing file is created from the defaults; a broken one is left
    /// untouched so the owner can fix it, and the defaults are used instead.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            let cfg = Self::default();
            match cfg.save(path) {
                Ok(()) => info!("Set the default values in the configuration file {}", path.display()),
                Err(err) => warn!("Could not write default configuration: {err:?}"),
            }
            return cfg;
        }

        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("Your configuration file contains an error ({err:?}). Using default configuration values.");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, json).with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// Where the running config came from, so toggles made in-game are written back.
#[derive(Resource, Debug, Clone)]
pub struct ConfigSource(pub PathBuf);
