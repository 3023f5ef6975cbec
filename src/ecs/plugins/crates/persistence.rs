use anyhow::{Context, Result};
use bevy::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::ecs::plugins::crates::components::Roster;

/// JSON data files, one per slot, under a single directory.
#[derive(Resource, Debug, Clone)]
pub struct RosterStore {
    dir: PathBuf,
}

impl RosterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    /// Overwrites the slot with the whole roster.
    pub fn save(&self, slot: &str, roster: &Roster) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory {}", self.dir.display()))?;
        let path = self.path_for(slot);
        let json = serde_json::to_string_pretty(roster).context("Failed to serialize roster")?;
        fs::write(&path, json).with_context(|| format!("Failed to write data file {}", path.display()))?;
        Ok(())
    }

    /// A missing or unreadable slot yields an empty roster.
    pub fn load(&self, slot: &str) -> Roster {
        match self.try_load(slot) {
            Ok(Some(roster)) => roster,
            Ok(None) => Roster::new(),
            Err(err) => {
                warn!("Ignoring unreadable crate data: {err:?}");
                Roster::new()
            }
        }
    }

    fn try_load(&self, slot: &str) -> Result<Option<Roster>> {
        let path = self.path_for(slot);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err).with_context(|| format!("Failed to read data file {}", path.display())),
        };
        let roster = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse data file {}", path.display()))?;
        Ok(Some(roster))
    }
}
