pub mod admin;
pub mod crates;
pub mod overlay;
pub mod websocket;
pub mod world;

pub use admin::AdminPlugin;
pub use crates::{CratesPlugin, CratesSet};
pub use overlay::OverlayPlugin;
pub use websocket::WebSocketPlugin;
pub use world::WorldPlugin;
