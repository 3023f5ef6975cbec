/*!
# Overlay Widgets

Pure builders for every layer of the admin overlay.

Each function turns a few semantic inputs (is the menu open, is the timer
running, the current grid buttons, ...) into a [`UiLayer`]: a named list of
positioned elements. Nothing here knows how layers reach the screen; systems
wrap the result in an `OverlayCommand` and the transport ships it.
*/

use serde::Serialize;

use crate::ecs::plugins::admin::commands::*;
use crate::ecs::plugins::crates::components::Roster;
use crate::ecs::plugins::overlay::components::ConsoleLog;
use crate::ecs::plugins::overlay::layout::{AnchorRect, GridButton};

// ============================================================================
// LAYERS
// ============================================================================

pub const CONTAINERS_INFORMATION_LAYER: &str = "ContainersInformation";
pub const PLUGIN_CONSOLE_LAYER: &str = "PluginConsole";
pub const JSON_SECTION_LAYER: &str = "JsonSection";
pub const PLUGIN_SECTION_LAYER: &str = "PluginSection";
pub const MENU_TOGGLE_LAYER: &str = "OpenContainersManager";
pub const MANAGER_SECTION_LAYER: &str = "ManagerSection";
pub const CONTAINER_TYPES_LAYER: &str = "LootContainersInformation";

pub const ALL_LAYERS: [&str; 7] = [
    CONTAINERS_INFORMATION_LAYER,
    PLUGIN_CONSOLE_LAYER,
    JSON_SECTION_LAYER,
    PLUGIN_SECTION_LAYER,
    MENU_TOGGLE_LAYER,
    MANAGER_SECTION_LAYER,
    CONTAINER_TYPES_LAYER,
];

const BLUR_MATERIAL: &str = "assets/content/ui/uibackgroundblur-ingamemenu.mat";
const TRANSPARENT_SPRITE: &str = "assets/content/textures/generic/fulltransparent.tga";
const WHITE: &str = "1 1 1 1";
const BUTTON_COLOR: &str = "0.25 0.25 0.25 0.5";
const GRID_BUTTON_COLOR: &str = "0.25 0.25 0.25 0.75";

/// Prefabs whose roster counts are shown under the type grid.
const COUNTED_CRATES: [(&str, &str); 6] = [
    ("<color=lime>Military</color>", "assets/bundled/prefabs/radtown/crate_normal.prefab"),
    ("Crate", "assets/bundled/prefabs/radtown/crate_normal_2.prefab"),
    ("<color=yellow>Primitive</color>", "assets/bundled/prefabs/radtown/crate_basic.prefab"),
    ("Ration", "assets/bundled/prefabs/radtown/foodbox.prefab"),
    ("<color=cyan>Vehicle</color>", "assets/bundled/prefabs/radtown/vehicle_parts.prefab"),
    ("Elite", "assets/bundled/prefabs/radtown/crate_elite.prefab"),
];

// ============================================================================
// ELEMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiElement {
    Panel {
        rect: AnchorRect,
        color: String,
        material: Option<&'static str>,
        cursor: bool,
    },
    Button {
        rect: AnchorRect,
        label: String,
        command: String,
        color: String,
        text_color: String,
        font_size: u8,
        sprite: Option<&'static str>,
    },
    Label {
        rect: AnchorRect,
        text: String,
        color: String,
        font_size: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiLayer {
    pub name: &'static str,
    pub elements: Vec<UiElement>,
}

impl UiLayer {
    fn new(name: &'static str) -> Self {
        Self { name, elements: Vec::new() }
    }

    fn with(mut self, element: UiElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn buttons(&self) -> impl Iterator<Item = (&str, &str)> {
        self.elements.iter().filter_map(|element| match element {
            UiElement::Button { label, command, .. } => Some((label.as_str(), command.as_str())),
            _ => None,
        })
    }
}

/// `#RRGGBB` or `#RRGGBBAA` to the "r g b a" float form the renderer expects.
/// Anything unparsable renders white.
pub fn hex_color(hex: &str) -> String {
    let digits = hex.trim().trim_start_matches('#');
    let digits = if digits.len() == 6 { format!("{digits}ff") } else { digits.to_string() };
    let channel = |index: usize| {
        digits
            .get(index * 2..index * 2 + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };

    match (channel(0), channel(1), channel(2), channel(3)) {
        (Some(r), Some(g), Some(b), Some(a)) if digits.len() == 8 => format!(
            "{:.2} {:.2} {:.2} {:.2}",
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0
        ),
        _ => "1.00 1.00 1.00 1.00".to_string(),
    }
}

fn panel(rect: AnchorRect) -> UiElement {
    UiElement::Panel {
        rect,
        color: hex_color("00000075"),
        material: Some(BLUR_MATERIAL),
        cursor: true,
    }
}

fn title(text: &str) -> UiElement {
    UiElement::Label {
        rect: AnchorRect::new(0.0, 0.8, 1.0, 1.0),
        text: text.to_string(),
        color: WHITE.to_string(),
        font_size: 15,
    }
}

fn button(command: &str, rect: AnchorRect, label: &str) -> UiElement {
    UiElement::Button {
        rect,
        label: label.to_string(),
        command: command.to_string(),
        color: BUTTON_COLOR.to_string(),
        text_color: WHITE.to_string(),
        font_size: 15,
        sprite: None,
    }
}

// ============================================================================
// PANELS
// ============================================================================

pub fn menu_toggle(menu_shown: bool) -> UiLayer {
    let (command, label) = if menu_shown {
        (HIDE_UI_COMMAND, "Hide menu")
    } else {
        (SHOW_UI_COMMAND, "Show menu")
    };

    UiLayer::new(MENU_TOGGLE_LAYER).with(UiElement::Button {
        rect: AnchorRect::new(0.9, 0.96, 1.0, 1.0),
        label: label.to_string(),
        command: command.to_string(),
        color: "0 0 0 0".to_string(),
        text_color: hex_color("#edededff"),
        font_size: 12,
        sprite: Some(TRANSPARENT_SPRITE),
    })
}

pub fn plugin_settings(timer_enabled: bool) -> UiLayer {
    let (timer_command, timer_label) = if timer_enabled {
        (DISABLE_TIMER_COMMAND, "Disable Timer")
    } else {
        (ENABLE_TIMER_COMMAND, "Enable Timer")
    };

    UiLayer::new(PLUGIN_SECTION_LAYER)
        .with(panel(AnchorRect::new(0.04, 0.25, 0.24, 0.75)))
        .with(title("Plugin Settings"))
        .with(button(CLEAR_CONSOLE_COMMAND, AnchorRect::new(0.1, 0.45, 0.9, 0.6), "Clear the Console"))
        .with(button(timer_command, AnchorRect::new(0.1, 0.65, 0.9, 0.8), timer_label))
}

pub fn json_management(autosave: bool) -> UiLayer {
    let (autosave_command, autosave_label) = if autosave {
        (DISABLE_AUTOSAVE_COMMAND, "Disable Autosave")
    } else {
        (ENABLE_AUTOSAVE_COMMAND, "Enable Autosave")
    };

    UiLayer::new(JSON_SECTION_LAYER)
        .with(panel(AnchorRect::new(0.28, 0.25, 0.48, 0.75)))
        .with(title("Json Management"))
        .with(button(autosave_command, AnchorRect::new(0.1, 0.68, 0.9, 0.8), autosave_label))
        .with(button(SAVE_ROSTER_COMMAND, AnchorRect::new(0.1, 0.36, 0.9, 0.48), "Save LootContainers"))
        .with(button(CLEAR_ROSTER_COMMAND, AnchorRect::new(0.1, 0.52, 0.9, 0.64), "Clear LootContainers"))
}

pub fn container_management() -> UiLayer {
    UiLayer::new(MANAGER_SECTION_LAYER)
        .with(panel(AnchorRect::new(0.76, 0.25, 0.96, 0.75)))
        .with(title("LootContainer Management"))
        .with(button(KILL_ALL_COMMAND, AnchorRect::new(0.1, 0.52, 0.9, 0.64), "Kill LootContainers"))
        .with(button(SPAWN_ALL_COMMAND, AnchorRect::new(0.1, 0.68, 0.9, 0.8), "Spawn LootContainers"))
}

pub fn container_types(buttons: &[GridButton]) -> UiLayer {
    buttons.iter().fold(
        UiLayer::new(CONTAINER_TYPES_LAYER).with(panel(AnchorRect::new(0.52, 0.25, 0.72, 0.75))),
        |layer, grid_button| {
            layer.with(UiElement::Button {
                rect: grid_button.rect,
                label: grid_button.label.clone(),
                command: grid_button.command.clone(),
                color: GRID_BUTTON_COLOR.to_string(),
                text_color: WHITE.to_string(),
                font_size: 8,
                sprite: None,
            })
        },
    )
}

pub fn crate_counts(roster: &Roster) -> UiLayer {
    let text = COUNTED_CRATES
        .iter()
        .map(|(label, prefab)| format!("{label} {}", roster.count_of(prefab)))
        .collect::<Vec<_>>()
        .join(" | ");

    UiLayer::new(CONTAINERS_INFORMATION_LAYER)
        .with(panel(AnchorRect::new(0.52, 0.16, 0.96, 0.24)))
        .with(UiElement::Label {
            rect: AnchorRect::FULL,
            text,
            color: WHITE.to_string(),
            font_size: 12,
        })
}

pub fn console(log: &ConsoleLog) -> UiLayer {
    let columns = [
        AnchorRect::new(0.0, 0.0, 0.3, 1.0),
        AnchorRect::new(1.0 / 3.0, 0.0, 0.6, 1.0),
        AnchorRect::new(2.0 / 3.0, 0.0, 1.0, 1.0),
    ];

    columns.into_iter().enumerate().fold(
        UiLayer::new(PLUGIN_CONSOLE_LAYER).with(panel(AnchorRect::new(0.04, 0.16, 0.48, 0.24))),
        |layer, (index, rect)| {
            layer.with(UiElement::Label {
                rect,
                text: log.column(index),
                color: WHITE.to_string(),
                font_size: 8,
            })
        },
    )
}
