pub mod components;
pub mod systems;

use bevy::prelude::*;
use components::ConsoleConnections;
use systems::{forward_overlay_commands_system, poll_console_messages_system, spawn_console_server};

// Admin console over WebSocket
pub struct WebSocketPlugin {
    pub address: String,
}

impl Default for WebSocketPlugin {
    fn default() -> Self {
        Self { address: "127.0.0.1:5000".to_string() }
    }
}

impl Plugin for WebSocketPlugin {
    fn build(&self, app: &mut App) {
        let (incoming_tx, incoming_rx) = crossbeam_channel::unbounded();
        let (outgoing_tx, outgoing_rx) = tokio::sync::mpsc::unbounded_channel();

        app.insert_resource(ConsoleConnections {
            incoming_messages: incoming_rx,
            outgoing_sender: outgoing_tx,
        })
        .add_systems(PreUpdate, poll_console_messages_system)
        .add_systems(Last, forward_overlay_commands_system);

        spawn_console_server(self.address.clone(), incoming_tx, outgoing_rx);
    }
}
