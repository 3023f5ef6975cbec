#![allow(dead_code)]

use std::path::Path;

use bevy::prelude::*;
use monument_crates::ecs::core::{CratesConfig, LootContainer, LootContainerBundle, WorldInfo};
use monument_crates::ecs::plugins::admin::{AdminCommand, AdminCommandEvent, AdminConnectedEvent, AdminId};
use monument_crates::ecs::plugins::overlay::{OverlayAction, OverlayCommand};
use monument_crates::ecs::CratesPlugin;

pub const RADTOWN: &str = "assets/bundled/prefabs/radtown";

/// Every overlay command emitted since the last `take_sent`.
#[derive(Resource, Default)]
pub struct SentOverlay(pub Vec<OverlayCommand>);

fn collect_overlay(mut overlay: EventReader<OverlayCommand>, mut sent: ResMut<SentOverlay>) {
    sent.0.extend(overlay.read().cloned());
}

pub fn crates_app(data_dir: &Path, config: CratesConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(CratesPlugin::new(config, WorldInfo::default(), data_dir))
        .init_resource::<SentOverlay>()
        .add_systems(Last, collect_overlay);
    app.update();
    app
}

pub fn prefab(kind: &str) -> String {
    format!("{RADTOWN}/{kind}.prefab")
}

pub fn spawn_container(app: &mut App, kind: &str, position: Vec3) -> Entity {
    app.world_mut()
        .spawn(LootContainerBundle::new(prefab(kind), position, Quat::IDENTITY))
        .id()
}

pub fn container_names(app: &mut App) -> Vec<String> {
    let mut query = app.world_mut().query::<&LootContainer>();
    let mut names: Vec<String> = query
        .iter(app.world())
        .map(|container| container.short_prefab_name().to_string())
        .collect();
    names.sort();
    names
}

pub fn connect(app: &mut App, admin: AdminId) {
    app.world_mut().send_event(AdminConnectedEvent { admin });
    app.update();
}

pub fn run_command(app: &mut App, admin: AdminId, line: &str) {
    let command = AdminCommand::parse(line).expect("known command");
    app.world_mut().send_event(AdminCommandEvent { admin, command });
    app.update();
}

pub fn take_sent(app: &mut App) -> Vec<OverlayCommand> {
    std::mem::take(&mut app.world_mut().resource_mut::<SentOverlay>().0)
}

pub fn drawn_layers(sent: &[OverlayCommand], admin: AdminId) -> Vec<&'static str> {
    sent.iter()
        .filter(|command| command.admin == admin)
        .filter_map(|command| match &command.action {
            OverlayAction::Draw { layer } => Some(layer.name),
            OverlayAction::Destroy { .. } => None,
        })
        .collect()
}
