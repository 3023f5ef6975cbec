use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::ecs::core::{ConfigSource, CratesConfig, LootContainer, WorldInfo};
use crate::ecs::plugins::admin::commands::{AdminCommand, AdminCommandEvent, AdminId};
use crate::ecs::plugins::crates::components::Roster;
use crate::ecs::plugins::crates::operations::{kill_all, kill_by_type, spawn_from_roster};
use crate::ecs::plugins::crates::persistence::RosterStore;
use crate::ecs::plugins::crates::timers::{CrateTimer, CrateTimers};
use crate::ecs::plugins::overlay::components::*;
use crate::ecs::plugins::overlay::systems::{container_type_names, menu_commands, MenuState};
use crate::ecs::plugins::overlay::widgets;

#[derive(SystemParam)]
pub struct AdminCtx<'w, 's> {
    commands: Commands<'w, 's>,
    containers: Query<'w, 's, (Entity, &'static LootContainer)>,
    config: ResMut<'w, CratesConfig>,
    config_source: Option<Res<'w, ConfigSource>>,
    roster: ResMut<'w, Roster>,
    store: Res<'w, RosterStore>,
    world_info: Res<'w, WorldInfo>,
    timers: ResMut<'w, CrateTimers>,
    sessions: ResMut<'w, AdminSessions>,
    console: ResMut<'w, ConsoleLog>,
    overlay: EventWriter<'w, OverlayCommand>,
    types_changed: EventWriter<'w, ContainerTypesChanged>,
}

impl AdminCtx<'_, '_> {
    /// Records a console line and redraws the console for `admin`.
    fn report(&mut self, admin: AdminId, message: impl Into<String>) {
        self.console.push(message);
        if self.sessions.is_menu_shown(admin) {
            self.overlay.send(OverlayCommand::draw(admin, widgets::console(&self.console)));
        }
    }

    /// Redraws one panel, but only for an admin that has the menu open.
    fn redraw(&mut self, admin: AdminId, layer: widgets::UiLayer) {
        if self.sessions.is_menu_shown(admin) {
            self.overlay.send(OverlayCommand::draw(admin, layer));
        }
    }

    fn set_menu(&mut self, admin: AdminId, shown: bool) {
        self.sessions.set_menu_shown(admin, shown);
        let names = container_type_names(self.containers.iter().map(|(_, container)| container));
        let state = MenuState {
            timer_enabled: self.timers.is_running(CrateTimer::AutoKill),
            autosave: self.config.autosave,
            container_names: &names,
            roster: &self.roster,
            console: &self.console,
        };
        for command in menu_commands(admin, shown, &state) {
            self.overlay.send(command);
        }
    }

    fn set_autosave(&mut self, admin: AdminId, enabled: bool) {
        self.config.autosave = enabled;
        if let Some(source) = &self.config_source {
            match self.config.save(&source.0) {
                Ok(()) => info!("Saved changes to the configuration file"),
                Err(err) => warn!("Failed to save configuration: {err:?}"),
            }
        }
        let state = if enabled { "<color=lime>enabled</color>" } else { "<color=red>disabled</color>" };
        self.report(admin, format!("Automatic LootContainer saving {state}"));
        self.redraw(admin, widgets::json_management(enabled));
    }

    fn save_roster(&mut self, admin: AdminId) {
        let slot = self.world_info.slot_name();
        match self.store.save(&slot, &self.roster) {
            Ok(()) => {
                info!("Admin {} saved {} crates to {}", admin.0, self.roster.len(), slot);
                self.report(admin, "LootContainers were successfully saved to a json file");
            }
            Err(err) => {
                warn!("Failed to save crates: {err:?}");
                self.report(admin, format!("Failed to save LootContainers: {err}"));
            }
        }
    }
}

pub fn handle_admin_commands_system(mut events: EventReader<AdminCommandEvent>, mut ctx: AdminCtx) {
    for AdminCommandEvent { admin, command } in events.read() {
        let admin = *admin;
        debug!("Admin {} issued {}", admin.0, command.name());

        match command {
            AdminCommand::ShowUi => ctx.set_menu(admin, true),
            AdminCommand::HideUi => ctx.set_menu(admin, false),
            AdminCommand::EnableTimer => {
                let interval = ctx.config.kill_interval();
                ctx.timers.start(CrateTimer::AutoKill, interval);
                ctx.report(admin, "Timer <color=lime>started</color>");
                ctx.redraw(admin, widgets::plugin_settings(true));
            }
            AdminCommand::DisableTimer => {
                ctx.timers.stop(CrateTimer::AutoKill);
                ctx.report(admin, "Timer <color=red>stopped</color>");
                ctx.redraw(admin, widgets::plugin_settings(false));
            }
            AdminCommand::ClearConsole => {
                ctx.console.clear();
                ctx.report(admin, "");
            }
            AdminCommand::EnableAutosave => ctx.set_autosave(admin, true),
            AdminCommand::DisableAutosave => ctx.set_autosave(admin, false),
            AdminCommand::ClearRoster => {
                ctx.roster.clear();
                ctx.report(admin, "The LootContainers list has been cleared");
            }
            AdminCommand::SaveRoster => ctx.save_roster(admin),
            AdminCommand::SpawnAll => {
                let spawned = spawn_from_roster(&mut ctx.commands, &ctx.roster);
                info!("Admin {} spawned {spawned} crates from the roster", admin.0);
                ctx.report(admin, format!("Spawned {spawned} LootContainers"));
                ctx.types_changed.send(ContainerTypesChanged);
            }
            AdminCommand::KillAll => {
                let killed = kill_all(&mut ctx.commands, ctx.containers.iter());
                info!("Admin {} killed {killed} loot containers", admin.0);
                ctx.report(admin, format!("Killed {killed} LootContainers"));
                ctx.types_changed.send(ContainerTypesChanged);
            }
            AdminCommand::KillByType(type_name) => {
                if type_name.is_empty() {
                    continue;
                }
                let killed = kill_by_type(&mut ctx.commands, ctx.containers.iter(), type_name);
                info!("Admin {} killed {killed} {type_name} loot containers", admin.0);
                ctx.redraw(admin, widgets::container_management());
                ctx.report(admin, format!("Killed {killed} {type_name} LootContainers"));
                ctx.types_changed.send(ContainerTypesChanged);
            }
        }
    }
}
