use bevy::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Two positions closer than this (squared) are the same spot. Matches the
/// engine's own vector equality so positions that went through a float
/// round-trip still compare equal.
const SAME_POSITION_EPSILON_SQ: f32 = 1e-10;

pub fn same_position(a: Vec3, b: Vec3) -> bool {
    a.distance_squared(b) < SAME_POSITION_EPSILON_SQ
}

/// A loot container seen at least once at a monument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedCrate {
    #[serde(rename = "Prefab Name")]
    pub prefab_name: String,
    #[serde(rename = "Position", with = "vector3")]
    pub position: Vec3,
    #[serde(rename = "Rotation", with = "quaternion")]
    pub rotation: Quat,
}

impl TrackedCrate {
    pub fn new(prefab_name: impl Into<String>, position: Vec3, rotation: Quat) -> Self {
        Self { prefab_name: prefab_name.into(), position, rotation }
    }

    pub fn matches(&self, prefab_name: &str, position: Vec3) -> bool {
        self.prefab_name == prefab_name && same_position(self.position, position)
    }
}

/// Every crate ever tracked on this world, in discovery order.
///
/// Grows only through [`Roster::track`], which refuses a second record for the
/// same (prefab, position) pair.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TrackedCrate>", into = "Vec<TrackedCrate>")]
pub struct Roster {
    crates: Vec<TrackedCrate>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.crates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedCrate> {
        self.crates.iter()
    }

    pub fn contains(&self, prefab_name: &str, position: Vec3) -> bool {
        self.crates.iter().any(|tracked| tracked.matches(prefab_name, position))
    }

    /// Returns `false` when an equivalent record is already present.
    pub fn track(&mut self, tracked: TrackedCrate) -> bool {
        if self.contains(&tracked.prefab_name, tracked.position) {
            return false;
        }
        self.crates.push(tracked);
        true
    }

    pub fn count_of(&self, prefab_name: &str) -> usize {
        self.crates.iter().filter(|tracked| tracked.prefab_name == prefab_name).count()
    }

    pub fn clear(&mut self) {
        self.crates.clear();
    }
}

impl FromIterator<TrackedCrate> for Roster {
    fn from_iter<I: IntoIterator<Item = TrackedCrate>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for tracked in iter {
            roster.track(tracked);
        }
        roster
    }
}

impl From<Vec<TrackedCrate>> for Roster {
    fn from(records: Vec<TrackedCrate>) -> Self {
        records.into_iter().collect()
    }
}

impl From<Roster> for Vec<TrackedCrate> {
    fn from(roster: Roster) -> Self {
        roster.crates
    }
}

// Data files store vectors as `{"x":..,"y":..,"z":..}` objects rather than
// the tuple form glam would produce.

#[derive(Serialize, Deserialize)]
struct Vector3Repr {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Serialize, Deserialize)]
struct QuaternionRepr {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

mod vector3 {
    use super::*;

    pub fn serialize<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Vector3Repr { x: v.x, y: v.y, z: v.z }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let repr = Vector3Repr::deserialize(deserializer)?;
        Ok(Vec3::new(repr.x, repr.y, repr.z))
    }
}

mod quaternion {
    use super::*;

    pub fn serialize<S: Serializer>(q: &Quat, serializer: S) -> Result<S::Ok, S::Error> {
        QuaternionRepr { x: q.x, y: q.y, z: q.z, w: q.w }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Quat, D::Error> {
        let repr = QuaternionRepr::deserialize(deserializer)?;
        Ok(Quat::from_xyzw(repr.x, repr.y, repr.z, repr.w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_refuses_duplicates() {
        let mut roster = Roster::new();
        assert!(roster.track(TrackedCrate::new("crate_basic", Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY)));
        assert!(!roster.track(TrackedCrate::new("crate_basic", Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY)));
        assert!(roster.track(TrackedCrate::new("crate_elite", Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY)));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn record_uses_named_fields() {
        let tracked = TrackedCrate::new("crate_basic", Vec3::new(1.5, -2.0, 0.25), Quat::IDENTITY);
        let json = serde_json::to_value(&tracked).expect("serialize");

        assert_eq!(json["Prefab Name"], "crate_basic");
        assert_eq!(json["Position"]["x"], 1.5);
        assert_eq!(json["Position"]["z"], 0.25);
        assert_eq!(json["Rotation"]["w"], 1.0);
    }

    #[test]
    fn duplicate_records_in_a_file_collapse_on_load() {
        let json = r#"[
            {"Prefab Name": "crate_basic", "Position": {"x": 1.0, "y": 2.0, "z": 3.0}, "Rotation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}},
            {"Prefab Name": "crate_basic", "Position": {"x": 1.0, "y": 2.0, "z": 3.0}, "Rotation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}},
            {"Prefab Name": "foodbox", "Position": {"x": 1.0, "y": 2.0, "z": 3.0}, "Rotation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}}
        ]"#;
        let roster: Roster = serde_json::from_str(json).expect("deserialize");

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.count_of("crate_basic"), 1);
        assert_eq!(serde_json::to_value(&roster).expect("serialize").as_array().map(Vec::len), Some(2));
    }
}
