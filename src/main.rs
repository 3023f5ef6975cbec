/*!
# Monument Crates Server

Headless Bevy app that tracks where loot containers spawn at monuments.

## Architecture Overview

- **CratesPlugin**: roster, persistence, scan and auto-kill timers, lifecycle
- **OverlayPlugin**: per-admin overlay layers and the console log
- **AdminPlugin**: `mc.*` command handling
- **WorldPlugin**: stand-in monument population
- **WebSocketPlugin**: admin console transport

## Configuration

Environment: `WEBSOCKET_HOST`, `WEBSOCKET_PORT`, `WORLD_SEED`, `WORLD_SIZE`,
`DATA_DIR`, `CONFIG_PATH`. Crate settings live in the JSON file at `CONFIG_PATH`
and are created with defaults on first run.

Connect to `ws://127.0.0.1:5000` and send command lines such as
`mc.ui.show` or `mc.crates.kill.custom crate_basic`.
*/

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use monument_crates::ecs::core::{CratesConfig, ServerSettings, WorldInfo};
use monument_crates::ecs::{CratesPlugin, WebSocketPlugin, WorldPlugin};

/// Server tick rate.
const TICK_HZ: f64 = 20.0;

fn main() {
    let settings = ServerSettings::from_env();

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / TICK_HZ))),
    )
    .add_plugins(LogPlugin::default());

    // Must follow LogPlugin: load_or_default logs through it
    let config = CratesConfig::load_or_default(&settings.config_path);

    app.add_plugins(
        CratesPlugin::new(config, settings.world, settings.data_dir.clone())
            .with_config_path(settings.config_path.clone()),
    )
    .add_plugins(WorldPlugin)
    .add_plugins(WebSocketPlugin { address: settings.address() })
    .add_systems(Startup, announce_startup)
    .run();
}

fn announce_startup(world: Res<WorldInfo>) {
    info!("Monument crates server ready for world {}", world.slot_name());
}
