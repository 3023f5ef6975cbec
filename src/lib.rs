//! Monument crate tracking for a headless game server.
//!
//! Remembers where loot containers spawn at monuments, persists that roster
//! per world, and lets administrators respawn or kill containers through a
//! WebSocket console that mirrors the in-game overlay.

pub mod ecs;
