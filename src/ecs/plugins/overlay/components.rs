use bevy::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

use crate::ecs::plugins::admin::commands::AdminId;
use crate::ecs::plugins::overlay::widgets::UiLayer;

// ============================================================================
// SESSIONS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminSession {
    pub menu_shown: bool,
}

/// Per-admin overlay state. Opening the menu for one admin never changes
/// what another admin sees.
#[derive(Resource, Debug, Default)]
pub struct AdminSessions {
    sessions: HashMap<AdminId, AdminSession>,
}

impl AdminSessions {
    pub fn register(&mut self, admin: AdminId) {
        self.sessions.insert(admin, AdminSession::default());
    }

    pub fn unregister(&mut self, admin: AdminId) -> Option<AdminSession> {
        self.sessions.remove(&admin)
    }

    pub fn set_menu_shown(&mut self, admin: AdminId, shown: bool) {
        self.sessions.entry(admin).or_default().menu_shown = shown;
    }

    pub fn is_menu_shown(&self, admin: AdminId) -> bool {
        self.sessions.get(&admin).is_some_and(|session| session.menu_shown)
    }

    /// Every connected admin, in id order.
    pub fn admins(&self) -> Vec<AdminId> {
        let mut admins: Vec<AdminId> = self.sessions.keys().copied().collect();
        admins.sort();
        admins
    }

    /// Admins with the menu open, in id order.
    pub fn shown_admins(&self) -> Vec<AdminId> {
        let mut admins: Vec<AdminId> = self
            .sessions
            .iter()
            .filter(|(_, session)| session.menu_shown)
            .map(|(admin, _)| *admin)
            .collect();
        admins.sort();
        admins
    }
}

// ============================================================================
// CONSOLE
// ============================================================================

pub const CONSOLE_CAPACITY: usize = 18;
pub const CONSOLE_COLUMN_LINES: usize = 6;

/// Most recent plugin messages, shared by every admin.
#[derive(Resource, Debug, Default)]
pub struct ConsoleLog {
    messages: VecDeque<String>,
}

impl ConsoleLog {
    /// Empty messages are dropped.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        self.messages.push_back(message);
        while self.messages.len() > CONSOLE_CAPACITY {
            self.messages.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn latest(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }

    /// Text of one of the three console columns. Column 0 holds the newest
    /// six messages, newest first; every slot ends with a newline even when empty.
    pub fn column(&self, column: usize) -> String {
        let start = column * CONSOLE_COLUMN_LINES;
        (start..start + CONSOLE_COLUMN_LINES)
            .map(|age| {
                let line = self
                    .messages
                    .len()
                    .checked_sub(age + 1)
                    .and_then(|index| self.messages.get(index))
                    .map(String::as_str)
                    .unwrap_or_default();
                format!("{line}\n")
            })
            .collect()
    }
}

// ============================================================================
// EVENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OverlayAction {
    Draw { layer: UiLayer },
    Destroy { layer: &'static str },
}

/// A draw/destroy request for one admin's screen.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct OverlayCommand {
    pub admin: AdminId,
    pub action: OverlayAction,
}

impl OverlayCommand {
    pub fn draw(admin: AdminId, layer: UiLayer) -> Self {
        Self { admin, action: OverlayAction::Draw { layer } }
    }

    pub fn destroy(admin: AdminId, layer: &'static str) -> Self {
        Self { admin, action: OverlayAction::Destroy { layer } }
    }
}

/// The set of live container types may have changed; redraw the type grid.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ContainerTypesChanged;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_are_independent() {
        let mut sessions = AdminSessions::default();
        sessions.register(AdminId(1));
        sessions.register(AdminId(2));

        sessions.set_menu_shown(AdminId(1), true);

        assert!(sessions.is_menu_shown(AdminId(1)));
        assert!(!sessions.is_menu_shown(AdminId(2)));
        assert_eq!(sessions.shown_admins(), vec![AdminId(1)]);
        assert_eq!(sessions.admins(), vec![AdminId(1), AdminId(2)]);
    }

    #[test]
    fn console_keeps_the_newest_eighteen() {
        let mut log = ConsoleLog::default();
        for i in 0..20 {
            log.push(format!("message {i}"));
        }
        log.push("");

        assert_eq!(log.len(), CONSOLE_CAPACITY);
        assert_eq!(log.latest(), Some("message 19"));
        assert!(log.column(0).starts_with("message 19\nmessage 18\n"));
        assert!(log.column(2).ends_with("message 2\n"));
    }

    #[test]
    fn short_console_pads_columns_with_blank_lines() {
        let mut log = ConsoleLog::default();
        log.push("only");

        assert_eq!(log.column(0), "only\n\n\n\n\n\n");
        assert_eq!(log.column(1), "\n\n\n\n\n\n");
    }

    #[test]
    fn overlay_actions_serialize_with_an_op_tag() {
        let json = serde_json::to_value(OverlayAction::Destroy { layer: "PluginConsole" }).expect("serialize");
        assert_eq!(json, serde_json::json!({"op": "destroy", "layer": "PluginConsole"}));
    }
}
