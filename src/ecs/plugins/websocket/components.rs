use bevy::prelude::*;
use crossbeam_channel::Receiver;
use tokio::sync::mpsc::UnboundedSender;

use crate::ecs::plugins::admin::commands::AdminId;

// Messages from the WebSocket server to ECS
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleMessage {
    AdminJoined(AdminId),
    AdminLeft(AdminId),
    CommandLine(AdminId, String),
    ShutdownRequested,
}

/// ECS side of the admin console channels. Outgoing frames are
/// `(admin, json)` pairs routed to that admin's socket.
#[derive(Resource)]
pub struct ConsoleConnections {
    pub incoming_messages: Receiver<ConsoleMessage>,
    pub outgoing_sender: UnboundedSender<(AdminId, String)>,
}
