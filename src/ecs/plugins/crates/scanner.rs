/*!
# Crate Scanner

Turns a snapshot of the live world into new roster records.

The scanner is a pure function over borrowed data: systems collect the
sightings and exclusion zones from their queries and hand them over, which
keeps the reconciliation rules testable without an `App`.
*/

use bevy::prelude::*;
use std::collections::HashSet;

use crate::ecs::core::short_prefab_name;
use crate::ecs::plugins::crates::components::{Roster, TrackedCrate};

/// One live loot container as seen during a scan.
#[derive(Debug, Clone, Copy)]
pub struct CrateSighting<'a> {
    pub prefab_name: &'a str,
    pub position: Vec3,
    pub rotation: Quat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub added: usize,
    pub added_types: usize,
}

/// Appends every whitelisted, not-yet-tracked, not-excluded sighting to the roster.
///
/// Whitelist entries are short prefab names. A sighting is excluded when any
/// zone lies within `radius` of it. Records are never removed here.
pub fn scan<'a>(
    sightings: impl IntoIterator<Item = CrateSighting<'a>>,
    whitelist: &[String],
    roster: &mut Roster,
    exclusion_zones: &[Vec3],
    radius: f32,
) -> ScanReport {
    let radius_sq = radius * radius;
    let mut added = 0;
    let mut added_types: HashSet<&str> = HashSet::new();

    for sighting in sightings {
        let short_name = short_prefab_name(sighting.prefab_name);
        if !whitelist.iter().any(|allowed| allowed == short_name) {
            continue;
        }

        if exclusion_zones.iter().any(|zone| zone.distance_squared(sighting.position) <= radius_sq) {
            continue;
        }

        let tracked = TrackedCrate::new(sighting.prefab_name, sighting.position, sighting.rotation);
        if roster.track(tracked) {
            added += 1;
            added_types.insert(sighting.prefab_name);
        }
    }

    ScanReport { added, added_types: added_types.len() }
}
