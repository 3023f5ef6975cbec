pub mod components;
pub mod layout;
pub mod plugin;
pub mod systems;
pub mod widgets;

pub use components::{AdminSessions, ConsoleLog, ContainerTypesChanged, OverlayAction, OverlayCommand};
pub use layout::{layout, AnchorRect, GridButton};
pub use plugin::OverlayPlugin;
pub use widgets::{UiElement, UiLayer};
