mod common;

use bevy::prelude::*;
use common::*;
use monument_crates::ecs::core::{CratesConfig, WorldInfo};
use monument_crates::ecs::plugins::admin::AdminId;
use monument_crates::ecs::plugins::crates::{Roster, RosterStore, TrackedCrate};
use monument_crates::ecs::plugins::overlay::widgets::ALL_LAYERS;
use monument_crates::ecs::plugins::overlay::{ConsoleLog, OverlayAction};
use tempfile::tempdir;

const ADMIN: AdminId = AdminId(4);

fn slot() -> String {
    WorldInfo::default().slot_name()
}

fn sample_roster() -> Roster {
    [
        TrackedCrate::new(prefab("crate_elite"), Vec3::new(12.5, 3.0, -40.0), Quat::from_rotation_y(1.2)),
        TrackedCrate::new(prefab("crate_basic"), Vec3::new(-7.0, 0.5, 8.0), Quat::IDENTITY),
    ]
    .into_iter()
    .collect()
}

#[test]
fn startup_loads_the_roster_for_this_world() {
    let dir = tempdir().unwrap();
    RosterStore::new(dir.path()).save(&slot(), &sample_roster()).unwrap();

    let app = crates_app(dir.path(), CratesConfig::default());

    assert_eq!(app.world().resource::<Roster>().len(), 2);
}

#[test]
fn roster_from_another_world_is_ignored() {
    let dir = tempdir().unwrap();
    let other = WorldInfo { seed: 99, size: 3500 };
    RosterStore::new(dir.path()).save(&other.slot_name(), &sample_roster()).unwrap();

    let app = crates_app(dir.path(), CratesConfig::default());

    assert!(app.world().resource::<Roster>().is_empty());
}

#[test]
fn save_command_writes_a_loadable_file() {
    let dir = tempdir().unwrap();
    let mut app = crates_app(dir.path(), CratesConfig::default());
    app.insert_resource(sample_roster());

    run_command(&mut app, ADMIN, "mc.storage.save");

    let loaded = RosterStore::new(dir.path()).load(&slot());
    assert_eq!(loaded.len(), 2);
    assert!(loaded.contains(&prefab("crate_elite"), Vec3::new(12.5, 3.0, -40.0)));
    assert_eq!(
        app.world().resource::<ConsoleLog>().latest(),
        Some("LootContainers were successfully saved to a json file")
    );
}

#[test]
fn exit_saves_the_roster_when_autosave_is_on() {
    let dir = tempdir().unwrap();
    let mut app = crates_app(dir.path(), CratesConfig::default());
    connect(&mut app, ADMIN);
    app.insert_resource(sample_roster());
    take_sent(&mut app);

    app.world_mut().send_event(AppExit::Success);
    app.update();

    assert_eq!(RosterStore::new(dir.path()).load(&slot()).len(), 2);

    let destroyed: Vec<&str> = take_sent(&mut app)
        .iter()
        .filter(|command| command.admin == ADMIN)
        .filter_map(|command| match &command.action {
            OverlayAction::Destroy { layer } => Some(*layer),
            OverlayAction::Draw { .. } => None,
        })
        .collect();
    for layer in ALL_LAYERS {
        assert!(destroyed.contains(&layer));
    }
}

#[test]
fn exit_leaves_no_file_when_autosave_is_off() {
    let dir = tempdir().unwrap();
    let config = CratesConfig { autosave: false, ..CratesConfig::default() };
    let mut app = crates_app(dir.path(), config);
    app.insert_resource(sample_roster());

    app.world_mut().send_event(AppExit::Success);
    app.update();

    assert!(!RosterStore::new(dir.path()).path_for(&slot()).exists());
}

#[test]
fn saved_file_uses_the_documented_record_layout() {
    let dir = tempdir().unwrap();
    let store = RosterStore::new(dir.path());
    store.save(&slot(), &sample_roster()).unwrap();

    let text = std::fs::read_to_string(store.path_for(&slot())).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let first = &value[0];
    assert_eq!(first["Prefab Name"], prefab("crate_elite"));
    assert_eq!(first["Position"]["x"], 12.5);
    assert!(first["Rotation"]["w"].is_number());
}
