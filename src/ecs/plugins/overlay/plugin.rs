use bevy::prelude::*;

use crate::ecs::plugins::crates::CratesSet;
use crate::ecs::plugins::overlay::components::*;
use crate::ecs::plugins::overlay::systems::*;

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AdminSessions>()
            .init_resource::<ConsoleLog>()
            .add_event::<OverlayCommand>()
            .add_event::<ContainerTypesChanged>()
            .add_systems(
                Update,
                (
                    // A reused id leaves before it joins again within one frame
                    (admin_disconnected_system, admin_connected_system)
                        .chain()
                        .in_set(CratesSet::Sessions),
                    (refresh_container_types_system, refresh_crate_counts_system).in_set(CratesSet::Overlay),
                ),
            );
    }
}
