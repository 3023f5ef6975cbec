use bevy::prelude::*;
use std::path::PathBuf;

use crate::ecs::core::{ConfigSource, CratesConfig, WorldInfo};
use crate::ecs::plugins::admin::AdminPlugin;
use crate::ecs::plugins::crates::components::Roster;
use crate::ecs::plugins::crates::persistence::RosterStore;
use crate::ecs::plugins::crates::systems::*;
use crate::ecs::plugins::crates::timers::{tick_crate_timers_system, CrateTimers, TimerElapsed};
use crate::ecs::plugins::overlay::OverlayPlugin;

/// Frame phases, run in this order within `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CratesSet {
    /// Admin connects and disconnects.
    Sessions,
    /// Admin console commands.
    Commands,
    /// Timer ticks and the work they trigger.
    Timers,
    /// Overlay redraws that depend on the world after the phases above.
    Overlay,
}

/// Tracks monument crates on one world and exposes them to admins.
pub struct CratesPlugin {
    pub config: CratesConfig,
    pub config_path: Option<PathBuf>,
    pub world: WorldInfo,
    pub data_dir: PathBuf,
}

impl CratesPlugin {
    pub fn new(config: CratesConfig, world: WorldInfo, data_dir: impl Into<PathBuf>) -> Self {
        Self { config, config_path: None, world, data_dir: data_dir.into() }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }
}

impl Plugin for CratesPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(self.world)
            .insert_resource(RosterStore::new(self.data_dir.clone()))
            .init_resource::<Roster>()
            .init_resource::<CrateTimers>()
            .add_event::<TimerElapsed>()
            .configure_sets(
                Update,
                (CratesSet::Sessions, CratesSet::Commands, CratesSet::Timers, CratesSet::Overlay).chain(),
            )
            .add_plugins((OverlayPlugin, AdminPlugin))
            .add_systems(Startup, initialize_on_startup)
            .add_systems(
                Update,
                (tick_crate_timers_system, (scan_on_timer_system, auto_kill_on_timer_system))
                    .chain()
                    .in_set(CratesSet::Timers),
            )
            .add_systems(PostUpdate, shutdown_on_exit_system);

        if let Some(path) = &self.config_path {
            app.insert_resource(ConfigSource(path.clone()));
        }
    }
}
