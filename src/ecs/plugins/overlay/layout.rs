use serde::Serialize;

use crate::ecs::plugins::admin::commands::KILL_BY_TYPE_COMMAND;

pub const GRID_ROWS: usize = 10;
pub const GRID_COLS: usize = 3;
pub const GRID_MARGIN: f32 = 0.02;
pub const GRID_CAPACITY: usize = GRID_ROWS * GRID_COLS;

/// Normalized rectangle inside its parent, origin at the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnchorRect {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl AnchorRect {
    pub const FULL: AnchorRect = AnchorRect::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self { x_min, y_min, x_max, y_max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridButton {
    pub label: String,
    pub command: String,
    pub rect: AnchorRect,
}

/// Places `names` row-major into a 10x3 grid of kill buttons. Names beyond
/// the 30th are dropped; no blank buttons are produced.
pub fn layout<S: AsRef<str>>(names: &[S]) -> Vec<GridButton> {
    let cols = GRID_COLS as f32;
    let rows = GRID_ROWS as f32;
    let width = (1.0 - (cols + 1.0) * GRID_MARGIN) / cols;
    let height = (1.0 - (rows + 1.0) * GRID_MARGIN) / rows;

    names
        .iter()
        .take(GRID_CAPACITY)
        .enumerate()
        .map(|(index, name)| {
            let name = name.as_ref();
            let row = (index / GRID_COLS) as f32;
            let col = (index % GRID_COLS) as f32;
            let x = GRID_MARGIN + col * (width + GRID_MARGIN);
            let y = 1.0 - (GRID_MARGIN + row * (height + GRID_MARGIN) + height);

            GridButton {
                label: name.to_uppercase(),
                command: format!("{KILL_BY_TYPE_COMMAND} {name}"),
                rect: AnchorRect::new(x, y, x + width, y + height),
            }
        })
        .collect()
}
