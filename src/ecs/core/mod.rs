pub mod components;
pub mod config;
pub mod resources;

pub use components::*;
pub use config::*;
pub use resources::*;
