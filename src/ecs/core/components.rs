use bevy::prelude::*;

/// A lootable container living in the world, identified by the prefab it was
/// spawned from (e.g. `assets/bundled/prefabs/radtown/crate_basic.prefab`).
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct LootContainer {
    pub prefab_name: String,
}

impl LootContainer {
    pub fn new(prefab_name: impl Into<String>) -> Self {
        Self { prefab_name: prefab_name.into() }
    }

    pub fn short_prefab_name(&self) -> &str {
        short_prefab_name(&self.prefab_name)
    }
}

/// File stem of a prefab path: `assets/.../crate_basic.prefab` -> `crate_basic`.
/// Names without a directory or extension are returned as-is.
pub fn short_prefab_name(prefab_name: &str) -> &str {
    let file = prefab_name.rsplit('/').next().unwrap_or(prefab_name);
    file.strip_suffix(".prefab").unwrap_or(file)
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Placement {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self { position: Vec3::ZERO, rotation: Quat::IDENTITY }
    }
}

/// Marks an entity whose surroundings are off-limits for crate tracking.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ExclusionZone;

#[derive(Bundle)]
pub struct LootContainerBundle {
    pub container: LootContainer,
    pub placement: Placement,
}

impl LootContainerBundle {
    pub fn new(prefab_name: impl Into<String>, position: Vec3, rotation: Quat) -> Self {
        Self {
            container: LootContainer::new(prefab_name),
            placement: Placement::new(position, rotation),
        }
    }
}

#[derive(Bundle)]
pub struct ExclusionZoneBundle {
    pub zone: ExclusionZone,
    pub placement: Placement,
}

impl ExclusionZoneBundle {
    pub fn at(position: Vec3) -> Self {
        Self {
            zone: ExclusionZone,
            placement: Placement::new(position, Quat::IDENTITY),
        }
    }
}
