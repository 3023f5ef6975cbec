pub mod core;
pub mod plugins;

pub use plugins::{AdminPlugin, CratesPlugin, OverlayPlugin, WebSocketPlugin, WorldPlugin};
