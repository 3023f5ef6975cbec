// Stand-in map population so the server has containers to track.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ecs::core::{ExclusionZoneBundle, LootContainerBundle, WorldInfo};

const RADTOWN_PREFABS: &str = "assets/bundled/prefabs/radtown";
const ROADSIDE_PREFABS: &str = "assets/bundled/prefabs/autospawn/resource/loot";

/// A monument and the containers that spawn around it. Offsets are fractions
/// of the half map size so sites scale with `WorldInfo::size`.
pub struct MonumentSite {
    pub name: &'static str,
    pub offset: (f32, f32),
    pub containers: &'static [(&'static str, usize)],
}

pub const MONUMENT_SITES: &[MonumentSite] = &[
    MonumentSite {
        name: "airfield",
        offset: (-0.55, 0.40),
        containers: &[("crate_normal", 4), ("crate_normal_2", 3), ("crate_basic", 2)],
    },
    MonumentSite {
        name: "military_tunnel",
        offset: (0.35, 0.60),
        containers: &[("crate_elite", 2), ("crate_normal", 3), ("foodbox", 2)],
    },
    MonumentSite {
        name: "trainyard",
        offset: (0.50, -0.30),
        containers: &[("crate_normal_2", 3), ("vehicle_parts", 2), ("crate_basic", 3)],
    },
    MonumentSite {
        name: "water_treatment",
        offset: (-0.20, -0.55),
        containers: &[("crate_basic", 4), ("foodbox", 3), ("crate_tools", 2)],
    },
];

/// Safe zone in the middle of the map; containers placed on it must never be tracked.
pub const OUTPOST_OFFSET: (f32, f32) = (0.0, 0.0);

/// Spread of containers around a monument center, in world units.
const SITE_SPREAD: f32 = 60.0;

fn site_center(offset: (f32, f32), world: &WorldInfo) -> Vec3 {
    let half = world.size as f32 / 2.0;
    Vec3::new(offset.0 * half, 0.0, offset.1 * half)
}

fn random_rotation(rng: &mut StdRng) -> Quat {
    Quat::from_rotation_y(rng.gen_range(0.0..std::f32::consts::TAU))
}

pub fn spawn_monument_containers_system(mut commands: Commands, world: Res<WorldInfo>) {
    let mut rng = StdRng::seed_from_u64(u64::from(world.seed));
    let mut spawned = 0;

    for site in MONUMENT_SITES {
        let center = site_center(site.offset, &world);
        for &(kind, count) in site.containers {
            for _ in 0..count {
                let offset = Vec3::new(
                    rng.gen_range(-SITE_SPREAD..SITE_SPREAD),
                    rng.gen_range(0.0..3.0),
                    rng.gen_range(-SITE_SPREAD..SITE_SPREAD),
                );
                commands.spawn(LootContainerBundle::new(
                    format!("{RADTOWN_PREFABS}/{kind}.prefab"),
                    center + offset,
                    random_rotation(&mut rng),
                ));
                spawned += 1;
            }
        }

        // Road signs line the approach to every monument
        commands.spawn(LootContainerBundle::new(
            format!("{ROADSIDE_PREFABS}/roadsign1.prefab"),
            center + Vec3::new(SITE_SPREAD * 2.0, 0.0, 0.0),
            Quat::IDENTITY,
        ));
        spawned += 1;
    }

    let outpost = site_center(OUTPOST_OFFSET, &world);
    commands.spawn(ExclusionZoneBundle::at(outpost));
    commands.spawn(LootContainerBundle::new(
        format!("{RADTOWN_PREFABS}/crate_normal.prefab"),
        outpost + Vec3::new(1.0, 0.0, 1.0),
        Quat::IDENTITY,
    ));
    spawned += 1;

    info!("Populated {} monuments with {spawned} LootContainers", MONUMENT_SITES.len());
}
