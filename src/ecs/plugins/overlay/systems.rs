use bevy::prelude::*;

use crate::ecs::core::LootContainer;
use crate::ecs::plugins::admin::commands::{AdminConnectedEvent, AdminDisconnectedEvent, AdminId};
use crate::ecs::plugins::crates::components::Roster;
use crate::ecs::plugins::crates::timers::{CrateTimer, TimerElapsed};
use crate::ecs::plugins::overlay::components::*;
use crate::ecs::plugins::overlay::layout::layout;
use crate::ecs::plugins::overlay::widgets::{self, ALL_LAYERS};

/// Containers whose prefab name contains this never get a grid button.
const HIDDEN_CONTAINER_MARKER: &str = "roadsign";

/// Everything the full menu is drawn from.
pub struct MenuState<'a> {
    pub timer_enabled: bool,
    pub autosave: bool,
    pub container_names: &'a [String],
    pub roster: &'a Roster,
    pub console: &'a ConsoleLog,
}

/// Distinct short prefab names of live containers, in the order first seen.
pub fn container_type_names<'a>(containers: impl IntoIterator<Item = &'a LootContainer>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for container in containers {
        let name = container.short_prefab_name();
        if name.contains(HIDDEN_CONTAINER_MARKER) || names.iter().any(|known| known == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}

pub fn destroy_all_layers(admin: AdminId) -> impl Iterator<Item = OverlayCommand> {
    ALL_LAYERS.into_iter().map(move |layer| OverlayCommand::destroy(admin, layer))
}

/// Clears the admin's screen and redraws it: only the toggle button when the
/// menu is closed, every panel when it is open.
pub fn menu_commands(admin: AdminId, menu_shown: bool, state: &MenuState) -> Vec<OverlayCommand> {
    let mut commands: Vec<OverlayCommand> = destroy_all_layers(admin).collect();
    commands.push(OverlayCommand::draw(admin, widgets::menu_toggle(menu_shown)));

    if menu_shown {
        commands.extend(
            [
                widgets::plugin_settings(state.timer_enabled),
                widgets::json_management(state.autosave),
                widgets::container_management(),
                widgets::container_types(&layout(state.container_names)),
                widgets::console(state.console),
                widgets::crate_counts(state.roster),
            ]
            .into_iter()
            .map(|layer| OverlayCommand::draw(admin, layer)),
        );
    }

    commands
}

/// Redraws the console for every admin that currently has the menu open.
pub fn broadcast_console(sessions: &AdminSessions, log: &ConsoleLog, overlay: &mut EventWriter<OverlayCommand>) {
    let layer = widgets::console(log);
    for admin in sessions.shown_admins() {
        overlay.send(OverlayCommand::draw(admin, layer.clone()));
    }
}

pub fn admin_connected_system(
    mut connected: EventReader<AdminConnectedEvent>,
    mut sessions: ResMut<AdminSessions>,
    mut overlay: EventWriter<OverlayCommand>,
) {
    for event in connected.read() {
        sessions.register(event.admin);
        overlay.send(OverlayCommand::draw(event.admin, widgets::menu_toggle(false)));
        info!("Admin {} connected, overlay toggle drawn", event.admin.0);
    }
}

pub fn admin_disconnected_system(
    mut disconnected: EventReader<AdminDisconnectedEvent>,
    mut sessions: ResMut<AdminSessions>,
) {
    for event in disconnected.read() {
        if sessions.unregister(event.admin).is_some() {
            info!("Admin {} disconnected, session dropped", event.admin.0);
        }
    }
}

pub fn refresh_container_types_system(
    mut changed: EventReader<ContainerTypesChanged>,
    containers: Query<&LootContainer>,
    sessions: Res<AdminSessions>,
    mut overlay: EventWriter<OverlayCommand>,
) {
    if changed.read().count() == 0 {
        return;
    }

    let admins = sessions.shown_admins();
    if admins.is_empty() {
        return;
    }

    let names = container_type_names(containers.iter());
    let layer = widgets::container_types(&layout(&names));
    for admin in admins {
        overlay.send(OverlayCommand::draw(admin, layer.clone()));
    }
}

pub fn refresh_crate_counts_system(
    mut elapsed: EventReader<TimerElapsed>,
    roster: Res<Roster>,
    sessions: Res<AdminSessions>,
    mut overlay: EventWriter<OverlayCommand>,
) {
    let fired = elapsed.read().filter(|event| event.0 == CrateTimer::UiRefresh).count();
    if fired == 0 {
        return;
    }

    let admins = sessions.shown_admins();
    if admins.is_empty() {
        return;
    }

    let layer = widgets::crate_counts(&roster);
    for admin in admins {
        overlay.send(OverlayCommand::draw(admin, layer.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_are_distinct_and_skip_roadsigns() {
        let containers = [
            LootContainer::new("assets/bundled/prefabs/radtown/crate_basic.prefab"),
            LootContainer::new("assets/bundled/prefabs/autospawn/resource/loot/roadsign1.prefab"),
            LootContainer::new("assets/bundled/prefabs/radtown/foodbox.prefab"),
            LootContainer::new("assets/bundled/prefabs/radtown/crate_basic.prefab"),
        ];

        assert_eq!(container_type_names(&containers), vec!["crate_basic".to_string(), "foodbox".to_string()]);
    }

    #[test]
    fn closed_menu_only_draws_the_toggle() {
        let roster = Roster::new();
        let console = ConsoleLog::default();
        let state = MenuState { timer_enabled: false, autosave: true, container_names: &[], roster: &roster, console: &console };

        let commands = menu_commands(AdminId(7), false, &state);
        let drawn: Vec<&str> = commands
            .iter()
            .filter_map(|command| match &command.action {
                OverlayAction::Draw { layer } => Some(layer.name),
                OverlayAction::Destroy { .. } => None,
            })
            .collect();

        assert_eq!(drawn, vec![widgets::MENU_TOGGLE_LAYER]);
        assert_eq!(commands.len(), ALL_LAYERS.len() + 1);
    }

    #[test]
    fn open_menu_draws_every_layer() {
        let roster = Roster::new();
        let console = ConsoleLog::default();
        let names = vec!["crate_basic".to_string()];
        let state = MenuState { timer_enabled: true, autosave: false, container_names: &names, roster: &roster, console: &console };

        let commands = menu_commands(AdminId(7), true, &state);
        let mut drawn: Vec<&str> = commands
            .iter()
            .filter_map(|command| match &command.action {
                OverlayAction::Draw { layer } => Some(layer.name),
                OverlayAction::Destroy { .. } => None,
            })
            .collect();
        drawn.sort();
        let mut expected = ALL_LAYERS.to_vec();
        expected.sort();

        assert_eq!(drawn, expected);
        assert!(commands.iter().all(|command| command.admin == AdminId(7)));
    }
}
