/*!
# Admin Console Systems

WebSocket transport for the admin console.

The server runs on its own tokio runtime thread and only talks to the ECS
through channels:
- inbound: joins, leaves and raw command lines (`crossbeam-channel`)
- outbound: serialized overlay actions addressed to one admin (`tokio::sync::mpsc`)
*/

use bevy::prelude::*;
use crossbeam_channel::Sender;
use futures_util::{SinkExt, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tokio_tungstenite::{accept_async, tungstenite::Message};

use super::components::*;
use crate::ecs::plugins::admin::commands::*;
use crate::ecs::plugins::overlay::components::OverlayCommand;

type AdminSockets = Arc<Mutex<HashMap<AdminId, UnboundedSender<Message>>>>;

/// Admin ids are reused once their connection closes.
const MAX_ADMIN_ID: u32 = 9999;

// Start the console server in a dedicated async runtime
pub fn spawn_console_server(
    address: String,
    incoming: Sender<ConsoleMessage>,
    outgoing: UnboundedReceiver<(AdminId, String)>,
) {
    thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                error!("Failed to start admin console runtime: {err}");
                return;
            }
        };
        rt.block_on(run_console_server(address, incoming, outgoing));
    });
}

async fn run_console_server(
    address: String,
    incoming: Sender<ConsoleMessage>,
    mut outgoing: UnboundedReceiver<(AdminId, String)>,
) {
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Admin console could not bind {address}: {err}");
            return;
        }
    };
    info!("Admin console listening on ws://{address}");

    let sockets: AdminSockets = Arc::new(Mutex::new(HashMap::new()));

    // Route overlay frames to the admin they are addressed to
    let sockets_for_router = sockets.clone();
    tokio::spawn(async move {
        while let Some((admin, json)) = outgoing.recv().await {
            let conns = sockets_for_router.lock().await;
            if let Some(sender) = conns.get(&admin) {
                let _ = sender.send(Message::Text(json.into()));
            }
        }
    });

    // Ctrl-C becomes an orderly AppExit so the roster can be autosaved
    let shutdown_sender = incoming.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            let _ = shutdown_sender.send(ConsoleMessage::ShutdownRequested);
        }
    });

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("New admin console connection from {addr}");
                tokio::spawn(handle_admin(stream, sockets.clone(), incoming.clone()));
            }
            Err(err) => warn!("Admin console accept failed: {err}"),
        }
    }
}

// Join and leave notices are queued while the map is locked, so a reused id
// is always announced after the leave of its previous holder.
async fn claim_admin_id(
    sockets: &AdminSockets,
    sender: UnboundedSender<Message>,
    incoming: &Sender<ConsoleMessage>,
) -> Option<AdminId> {
    let mut conns = sockets.lock().await;
    let id = (1..=MAX_ADMIN_ID).map(AdminId).find(|id| !conns.contains_key(id))?;
    conns.insert(id, sender);
    let _ = incoming.send(ConsoleMessage::AdminJoined(id));
    Some(id)
}

async fn release_admin_id(sockets: &AdminSockets, admin: AdminId, incoming: &Sender<ConsoleMessage>) {
    let mut conns = sockets.lock().await;
    conns.remove(&admin);
    let _ = incoming.send(ConsoleMessage::AdminLeft(admin));
}

// Handle one admin connection
async fn handle_admin(stream: TcpStream, sockets: AdminSockets, incoming: Sender<ConsoleMessage>) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(err) => {
            warn!("Admin console handshake failed: {err}");
            return;
        }
    };

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let Some(admin) = claim_admin_id(&sockets, tx.clone(), &incoming).await else {
        warn!("Admin console is full, dropping connection");
        return;
    };

    // Pump queued frames into the socket
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let _ = incoming.send(ConsoleMessage::CommandLine(admin, text.to_string()));
            }
            Ok(Message::Ping(data)) => {
                let _ = tx.send(Message::Pong(data));
            }
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }

    release_admin_id(&sockets, admin, &incoming).await;
}

// System to turn console traffic into ECS events
pub fn poll_console_messages_system(
    connections: Res<ConsoleConnections>,
    mut joined: EventWriter<AdminConnectedEvent>,
    mut left: EventWriter<AdminDisconnectedEvent>,
    mut commands: EventWriter<AdminCommandEvent>,
    mut exit: EventWriter<AppExit>,
) {
    for message in connections.incoming_messages.try_iter() {
        match message {
            ConsoleMessage::AdminJoined(admin) => {
                joined.send(AdminConnectedEvent { admin });
            }
            ConsoleMessage::AdminLeft(admin) => {
                left.send(AdminDisconnectedEvent { admin });
            }
            ConsoleMessage::CommandLine(admin, line) => match AdminCommand::parse(&line) {
                Some(command) => {
                    commands.send(AdminCommandEvent { admin, command });
                }
                None => warn!("Admin {} sent an unknown command: {line:?}", admin.0),
            },
            ConsoleMessage::ShutdownRequested => {
                exit.send(AppExit::Success);
            }
        }
    }
}

// System to ship overlay actions to the admins they target
pub fn forward_overlay_commands_system(
    mut overlay: EventReader<OverlayCommand>,
    connections: Res<ConsoleConnections>,
) {
    for command in overlay.read() {
        match serde_json::to_string(&command.action) {
            Ok(json) => {
                let _ = connections.outgoing_sender.send((command.admin, json));
            }
            Err(err) => warn!("Failed to encode overlay action for admin {}: {err}", command.admin.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::plugins::overlay::widgets::MENU_TOGGLE_LAYER;

    fn console_app() -> (App, Sender<ConsoleMessage>, UnboundedReceiver<(AdminId, String)>) {
        let (incoming_tx, incoming_rx) = crossbeam_channel::unbounded();
        let (outgoing_tx, outgoing_rx) = tokio::sync::mpsc::unbounded_channel();

        let mut app = App::new();
        app.add_event::<AdminConnectedEvent>()
            .add_event::<AdminDisconnectedEvent>()
            .add_event::<AdminCommandEvent>()
            .add_event::<OverlayCommand>()
            .add_event::<AppExit>()
            .insert_resource(ConsoleConnections {
                incoming_messages: incoming_rx,
                outgoing_sender: outgoing_tx,
            })
            .add_systems(Update, (poll_console_messages_system, forward_overlay_commands_system));
        (app, incoming_tx, outgoing_rx)
    }

    #[test]
    fn command_lines_become_admin_events() {
        let (mut app, incoming, _outgoing) = console_app();
        incoming.send(ConsoleMessage::AdminJoined(AdminId(1))).unwrap();
        incoming
            .send(ConsoleMessage::CommandLine(AdminId(1), "mc.crates.kill.custom crate_basic".to_string()))
            .unwrap();
        incoming.send(ConsoleMessage::CommandLine(AdminId(1), "mc.nope".to_string())).unwrap();
        app.update();

        let joined = app.world().resource::<Events<AdminConnectedEvent>>();
        assert_eq!(joined.len(), 1);

        let commands: Vec<_> = app
            .world()
            .resource::<Events<AdminCommandEvent>>()
            .iter_current_update_events()
            .map(|event| event.command.clone())
            .collect();
        assert_eq!(commands, vec![AdminCommand::KillByType("crate_basic".to_string())]);
    }

    #[test]
    fn shutdown_request_sends_app_exit() {
        let (mut app, incoming, _outgoing) = console_app();
        incoming.send(ConsoleMessage::ShutdownRequested).unwrap();
        app.update();

        assert!(!app.world().resource::<Events<AppExit>>().is_empty());
    }

    #[test]
    fn overlay_commands_are_forwarded_as_json() {
        let (mut app, _incoming, mut outgoing) = console_app();
        app.world_mut()
            .send_event(OverlayCommand::destroy(AdminId(3), MENU_TOGGLE_LAYER));
        app.update();

        let (admin, json) = outgoing.try_recv().unwrap();
        assert_eq!(admin, AdminId(3));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["op"], "destroy");
        assert_eq!(value["layer"], MENU_TOGGLE_LAYER);
    }

    #[tokio::test]
    async fn reused_id_is_announced_after_its_previous_leave() {
        let sockets: AdminSockets = Arc::new(Mutex::new(HashMap::new()));
        let (incoming, received) = crossbeam_channel::unbounded();
        let (first_tx, _first_rx) = tokio::sync::mpsc::unbounded_channel();
        let (second_tx, _second_rx) = tokio::sync::mpsc::unbounded_channel();

        let first = claim_admin_id(&sockets, first_tx, &incoming).await.unwrap();
        release_admin_id(&sockets, first, &incoming).await;
        let second = claim_admin_id(&sockets, second_tx, &incoming).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            received.try_iter().collect::<Vec<_>>(),
            vec![
                ConsoleMessage::AdminJoined(AdminId(1)),
                ConsoleMessage::AdminLeft(AdminId(1)),
                ConsoleMessage::AdminJoined(AdminId(1)),
            ]
        );
        assert!(sockets.lock().await.contains_key(&AdminId(1)));
    }
}
