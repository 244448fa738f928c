//! Terminal UI components.
//!
//! - [`layout`]: measurement pass producing lines and section extents
//! - [`viewport`]: scroll position of the conversation pane
//! - [`tabs`]: per-turn content tabs
//! - [`style`]: colors and line styles

pub mod layout;
pub mod style;
pub mod tabs;
pub mod viewport;

mod overlays;
mod render;
mod sidebar;
mod status;

pub use render::{ScreenAreas, conversation_text_width, render, screen_areas};
pub use sidebar::{
    SIDEBAR_HEADER_ROWS, SidebarEntry, SidebarTarget, sidebar_entries, sidebar_scroll,
    sidebar_target_at,
};

pub const TITLE_ROWS: u16 = 1;
pub const INPUT_ROWS: u16 = 3;
pub const STATUS_ROWS: u16 = 1;
/// Rows not available to the conversation pane.
pub const CHROME_ROWS: u16 = TITLE_ROWS + INPUT_ROWS + STATUS_ROWS;

pub const SIDEBAR_WIDTH: u16 = 30;
pub const DOCUMENT_LEFT_PADDING: u16 = 2;
/// Card border plus one space, drawn left of every line inside a card.
pub const CARD_GUTTER: u16 = 2;

#[cfg(test)]
mod tests;
