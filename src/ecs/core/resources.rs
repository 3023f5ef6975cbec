use bevy::prelude::*;
use std::path::PathBuf;
use std::str::FromStr;

/// Identity of the running world. Data files are keyed by it so that a wipe
/// onto a different map never picks up stale crate positions.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldInfo {
    pub seed: u32,
    pub size: u32,
}

impl WorldInfo {
    pub fn slot_name(&self) -> String {
        format!("MonumentCrates&{}&{}", self.seed, self.size)
    }
}

impl Default for WorldInfo {
    fn default() -> Self {
        Self { seed: 1337, size: 4000 }
    }
}

/// Process-level settings, read from the environment at startup.
#[derive(Resource, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub world: WorldInfo,
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            world: WorldInfo::default(),
            data_dir: PathBuf::from("data"),
            config_path: PathBuf::from("config/MonumentCrates.json"),
        }
    }
}

impl ServerSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup; unparsable values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("WEBSOCKET_HOST").unwrap_or(defaults.host),
            port: parse_setting(&lookup, "WEBSOCKET_PORT").unwrap_or(defaults.port),
            world: WorldInfo {
                seed: parse_setting(&lookup, "WORLD_SEED").unwrap_or(defaults.world.seed),
                size: parse_setting(&lookup, "WORLD_SIZE").unwrap_or(defaults.world.size),
            },
            data_dir: lookup("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            config_path: lookup("CONFIG_PATH").map(PathBuf::from).unwrap_or(defaults.config_path),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_setting<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn slot_name_combines_seed_and_size() {
        let world = WorldInfo { seed: 42, size: 3500 };
        assert_eq!(world.slot_name(), "MonumentCrates&42&3500");
    }

    #[test]
    fn settings_fall_back_on_garbage() {
        let env: HashMap<&str, &str> = [("WEBSOCKET_PORT", "not-a-port"), ("WORLD_SEED", "99")].into();
        let settings = ServerSettings::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.port, 5000);
        assert_eq!(settings.world.seed, 99);
        assert_eq!(settings.world.size, 4000);
        assert_eq!(settings.address(), "127.0.0.1:5000");
    }

    #[test]
    fn every_setting_is_read_with_its_own_type() {
        let env: HashMap<&str, &str> = [
            ("WEBSOCKET_HOST", "0.0.0.0"),
            ("WEBSOCKET_PORT", "7000"),
            ("WORLD_SEED", " 123456 "),
            ("WORLD_SIZE", "4500"),
            ("DATA_DIR", "/srv/crates"),
            ("CONFIG_PATH", "/etc/crates.json"),
        ]
        .into();
        let settings = ServerSettings::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.address(), "0.0.0.0:7000");
        assert_eq!(settings.world, WorldInfo { seed: 123456, size: 4500 });
        assert_eq!(settings.data_dir, PathBuf::from("/srv/crates"));
        assert_eq!(settings.config_path, PathBuf::from("/etc/crates.json"));
    }
}
