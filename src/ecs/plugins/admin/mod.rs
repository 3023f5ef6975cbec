pub mod commands;
pub mod plugin;
pub mod systems;

pub use commands::{AdminCommand, AdminCommandEvent, AdminConnectedEvent, AdminDisconnectedEvent, AdminId};
pub use plugin::AdminPlugin;
