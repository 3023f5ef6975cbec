use bevy::prelude::*;

use crate::ecs::core::{LootContainer, LootContainerBundle};
use crate::ecs::plugins::crates::components::Roster;

/// Despawns every container accepted by `predicate` and returns how many were queued.
pub fn kill_matching<'a>(
    commands: &mut Commands,
    containers: impl IntoIterator<Item = (Entity, &'a LootContainer)>,
    predicate: impl Fn(&LootContainer) -> bool,
) -> usize {
    let mut killed = 0;
    for (entity, container) in containers {
        if predicate(container) {
            commands.entity(entity).despawn();
            killed += 1;
        }
    }
    killed
}

pub fn kill_by_type<'a>(
    commands: &mut Commands,
    containers: impl IntoIterator<Item = (Entity, &'a LootContainer)>,
    short_prefab_name: &str,
) -> usize {
    kill_matching(commands, containers, |container| container.short_prefab_name() == short_prefab_name)
}

pub fn kill_all<'a>(
    commands: &mut Commands,
    containers: impl IntoIterator<Item = (Entity, &'a LootContainer)>,
) -> usize {
    kill_matching(commands, containers, |_| true)
}

/// Spawns one container per roster record. Nothing checks whether the
/// container is already standing there, so calling this twice doubles them.
pub fn spawn_from_roster(commands: &mut Commands, roster: &Roster) -> usize {
    let mut spawned = 0;
    for tracked in roster.iter() {
        commands.spawn(LootContainerBundle::new(
            tracked.prefab_name.clone(),
            tracked.position,
            tracked.rotation,
        ));
        spawned += 1;
    }
    spawned
}
