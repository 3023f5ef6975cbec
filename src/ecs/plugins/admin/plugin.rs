use bevy::prelude::*;

use crate::ecs::plugins::admin::commands::*;
use crate::ecs::plugins::admin::systems::handle_admin_commands_system;
use crate::ecs::plugins::crates::CratesSet;

pub struct AdminPlugin;

impl Plugin for AdminPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AdminCommandEvent>()
            .add_event::<AdminConnectedEvent>()
            .add_event::<AdminDisconnectedEvent>()
            .add_systems(Update, handle_admin_commands_system.in_set(CratesSet::Commands));
    }
}
