use anyhow::Result;
use bevy::prelude::*;

use crate::ecs::core::{CratesConfig, ExclusionZone, LootContainer, Placement, WorldInfo};
use crate::ecs::plugins::crates::components::Roster;
use crate::ecs::plugins::crates::operations::kill_all;
use crate::ecs::plugins::crates::persistence::RosterStore;
use crate::ecs::plugins::crates::scanner::{scan, CrateSighting};
use crate::ecs::plugins::crates::timers::{CrateTimer, CrateTimers, TimerElapsed};
use crate::ecs::plugins::overlay::components::{AdminSessions, ConsoleLog, ContainerTypesChanged, OverlayCommand};
use crate::ecs::plugins::overlay::systems::{broadcast_console, destroy_all_layers};

// ============================================================================
// LIFECYCLE
// ============================================================================

/// Installs the config and a previously persisted roster, then starts the
/// scan and counter-refresh timers.
pub fn initialize(world: &mut World, config: CratesConfig, roster: Roster) {
    let scan_interval = config.scan_interval();
    let refresh_interval = config.ui_refresh_interval();
    info!(
        "Monument crates ready: {} tracked crates, scanning every {}s",
        roster.len(),
        scan_interval.as_secs()
    );

    world.insert_resource(config);
    world.insert_resource(roster);

    let mut timers = world.get_resource_or_insert_with(CrateTimers::default);
    timers.start(CrateTimer::Scan, scan_interval);
    timers.start(CrateTimer::UiRefresh, refresh_interval);
}

/// Saves the roster when autosave is on (and the caller allows it), removes
/// every admin's overlay and stops all timers. Safe to call more than once.
pub fn shutdown(world: &mut World, save_if_enabled: bool) -> Result<()> {
    if let Some(mut timers) = world.get_resource_mut::<CrateTimers>() {
        timers.stop_all();
    }

    let admins = world.get_resource::<AdminSessions>().map(AdminSessions::admins).unwrap_or_default();
    for admin in admins {
        for command in destroy_all_layers(admin) {
            world.send_event(command);
        }
    }

    let autosave = world.get_resource::<CratesConfig>().is_some_and(|config| config.autosave);
    if !(save_if_enabled && autosave) {
        return Ok(());
    }

    let (Some(store), Some(info), Some(roster)) = (
        world.get_resource::<RosterStore>(),
        world.get_resource::<WorldInfo>(),
        world.get_resource::<Roster>(),
    ) else {
        return Ok(());
    };
    store.save(&info.slot_name(), roster)?;
    info!("Saved {} tracked crates on shutdown", roster.len());
    Ok(())
}

pub fn initialize_on_startup(world: &mut World) {
    let slot = world.resource::<WorldInfo>().slot_name();
    let roster = world.resource::<RosterStore>().load(&slot);
    let config = world.resource::<CratesConfig>().clone();
    initialize(world, config, roster);
}

pub fn shutdown_on_exit_system(world: &mut World) {
    if world.resource::<Events<AppExit>>().is_empty() {
        return;
    }
    if let Err(err) = shutdown(world, true) {
        warn!("Failed to save crates on shutdown: {err:?}");
    }
}

// ============================================================================
// TIMERS
// ============================================================================

pub fn scan_on_timer_system(
    mut elapsed: EventReader<TimerElapsed>,
    containers: Query<(&LootContainer, &Placement)>,
    zones: Query<&Placement, With<ExclusionZone>>,
    config: Res<CratesConfig>,
    mut roster: ResMut<Roster>,
    mut console: ResMut<ConsoleLog>,
    sessions: Res<AdminSessions>,
    mut overlay: EventWriter<OverlayCommand>,
    mut types_changed: EventWriter<ContainerTypesChanged>,
) {
    let fired = elapsed.read().filter(|event| event.0 == CrateTimer::Scan).count();
    if fired == 0 {
        return;
    }

    let exclusion_zones: Vec<Vec3> = zones.iter().map(|placement| placement.position).collect();
    let sightings = containers.iter().map(|(container, placement)| CrateSighting {
        prefab_name: &container.prefab_name,
        position: placement.position,
        rotation: placement.rotation,
    });
    let report = scan(
        sightings,
        &config.whitelisted_containers,
        &mut roster,
        &exclusion_zones,
        config.exclusion_radius,
    );

    if report.added > 0 {
        info!("Tracked {} new crates of {} kinds ({} total)", report.added, report.added_types, roster.len());
    } else {
        debug!("Scan found no new crates ({} tracked)", roster.len());
    }

    console.push(format!("Added {} kinds of LootContainers.", report.added_types));
    broadcast_console(&sessions, &console, &mut overlay);
    types_changed.send(ContainerTypesChanged);
}

pub fn auto_kill_on_timer_system(
    mut commands: Commands,
    mut elapsed: EventReader<TimerElapsed>,
    containers: Query<(Entity, &LootContainer)>,
    mut console: ResMut<ConsoleLog>,
    sessions: Res<AdminSessions>,
    mut overlay: EventWriter<OverlayCommand>,
    mut types_changed: EventWriter<ContainerTypesChanged>,
) {
    let fired = elapsed.read().filter(|event| event.0 == CrateTimer::AutoKill).count();
    if fired == 0 {
        return;
    }

    let killed = kill_all(&mut commands, containers.iter());
    info!("Kill timer removed {killed} loot containers");

    console.push(format!("Killed {killed} LootContainers"));
    broadcast_console(&sessions, &console, &mut overlay);
    types_changed.send(ContainerTypesChanged);
}
