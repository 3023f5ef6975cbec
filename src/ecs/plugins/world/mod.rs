pub mod systems;

use bevy::prelude::*;
use systems::spawn_monument_containers_system;

// Populates monuments with loot containers at startup
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_monument_containers_system);
    }
}
