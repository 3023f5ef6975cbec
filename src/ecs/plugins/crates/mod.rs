pub mod components;
pub mod operations;
pub mod persistence;
pub mod plugin;
pub mod scanner;
pub mod systems;
pub mod timers;

pub use components::{Roster, TrackedCrate};
pub use persistence::RosterStore;
pub use plugin::{CratesPlugin, CratesSet};
pub use scanner::{scan, CrateSighting, ScanReport};
pub use systems::{initialize, shutdown};
pub use timers::{CrateTimer, CrateTimers, TimerElapsed};
