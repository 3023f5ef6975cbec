use bevy::prelude::*;
use serde::Serialize;

pub const SHOW_UI_COMMAND: &str = "mc.ui.show";
pub const HIDE_UI_COMMAND: &str = "mc.ui.hide";
pub const ENABLE_TIMER_COMMAND: &str = "mc.timer.enable";
pub const DISABLE_TIMER_COMMAND: &str = "mc.timer.disable";
pub const CLEAR_CONSOLE_COMMAND: &str = "mc.console.clear";
pub const ENABLE_AUTOSAVE_COMMAND: &str = "mc.autosave.enable";
pub const DISABLE_AUTOSAVE_COMMAND: &str = "mc.autosave.disable";
pub const CLEAR_ROSTER_COMMAND: &str = "mc.storage.clear";
pub const SAVE_ROSTER_COMMAND: &str = "mc.storage.save";
pub const SPAWN_ALL_COMMAND: &str = "mc.crates.spawn";
pub const KILL_ALL_COMMAND: &str = "mc.crates.kill";
pub const KILL_BY_TYPE_COMMAND: &str = "mc.crates.kill.custom";

/// Connection-scoped identity of an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AdminId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    ShowUi,
    HideUi,
    EnableTimer,
    DisableTimer,
    ClearConsole,
    EnableAutosave,
    DisableAutosave,
    ClearRoster,
    SaveRoster,
    SpawnAll,
    KillAll,
    /// Short prefab name to kill; may be empty when the admin gave none.
    KillByType(String),
}

impl AdminCommand {
    /// Parses a console line such as `mc.crates.kill.custom crate_basic`.
    /// Unknown commands yield `None`; extra arguments are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = match parts.next()? {
            SHOW_UI_COMMAND => Self::ShowUi,
            HIDE_UI_COMMAND => Self::HideUi,
            ENABLE_TIMER_COMMAND => Self::EnableTimer,
            DISABLE_TIMER_COMMAND => Self::DisableTimer,
            CLEAR_CONSOLE_COMMAND => Self::ClearConsole,
            ENABLE_AUTOSAVE_COMMAND => Self::EnableAutosave,
            DISABLE_AUTOSAVE_COMMAND => Self::DisableAutosave,
            CLEAR_ROSTER_COMMAND => Self::ClearRoster,
            SAVE_ROSTER_COMMAND => Self::SaveRoster,
            SPAWN_ALL_COMMAND => Self::SpawnAll,
            KILL_ALL_COMMAND => Self::KillAll,
            KILL_BY_TYPE_COMMAND => Self::KillByType(parts.next().unwrap_or_default().to_string()),
            _ => return None,
        };
        Some(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowUi => SHOW_UI_COMMAND,
            Self::HideUi => HIDE_UI_COMMAND,
            Self::EnableTimer => ENABLE_TIMER_COMMAND,
            Self::DisableTimer => DISABLE_TIMER_COMMAND,
            Self::ClearConsole => CLEAR_CONSOLE_COMMAND,
            Self::EnableAutosave => ENABLE_AUTOSAVE_COMMAND,
            Self::DisableAutosave => DISABLE_AUTOSAVE_COMMAND,
            Self::ClearRoster => CLEAR_ROSTER_COMMAND,
            Self::SaveRoster => SAVE_ROSTER_COMMAND,
            Self::SpawnAll => SPAWN_ALL_COMMAND,
            Self::KillAll => KILL_ALL_COMMAND,
            Self::KillByType(_) => KILL_BY_TYPE_COMMAND,
        }
    }
}

// ============================================================================
// EVENTS
// ============================================================================

#[derive(Event, Debug, Clone)]
pub struct AdminCommandEvent {
    pub admin: AdminId,
    pub command: AdminCommand,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct AdminConnectedEvent {
    pub admin: AdminId,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct AdminDisconnectedEvent {
    pub admin: AdminId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command_name() {
        for command in [
            AdminCommand::ShowUi,
            AdminCommand::HideUi,
            AdminCommand::EnableTimer,
            AdminCommand::DisableTimer,
            AdminCommand::ClearConsole,
            AdminCommand::EnableAutosave,
            AdminCommand::DisableAutosave,
            AdminCommand::ClearRoster,
            AdminCommand::SaveRoster,
            AdminCommand::SpawnAll,
            AdminCommand::KillAll,
        ] {
            assert_eq!(AdminCommand::parse(command.name()), Some(command));
        }
    }

    #[test]
    fn kill_by_type_takes_first_argument() {
        assert_eq!(
            AdminCommand::parse("  mc.crates.kill.custom   crate_basic extra"),
            Some(AdminCommand::KillByType("crate_basic".to_string()))
        );
        assert_eq!(
            AdminCommand::parse("mc.crates.kill.custom"),
            Some(AdminCommand::KillByType(String::new()))
        );
    }

    #[test]
    fn unknown_or_blank_lines_are_rejected() {
        assert_eq!(AdminCommand::parse("mc.crates.explode"), None);
        assert_eq!(AdminCommand::parse("   "), None);
    }
}
