// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. layout::LayoutLine)
    clippy::module_name_repetitions
)]

//! # pankview
//!
//! A terminal browser for AI-generated answers about genes, variants and
//! tissues.
//!
//! Each question and its answer form a *turn* with four sections (AI
//! overview, visualizations, evidence, follow-up). Turns stack vertically in
//! one scrolling pane; a sidebar highlights the section currently in view and
//! jumps to any section on click. Asking a follow-up appends a new turn and
//! scrolls to it once it has been laid out.
//!
//! ## Architecture
//!
//! pankview uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`conversation`]: Turns, section ids and the append-only turn store
//! - [`state`]: The selection and loading flag, behind one update path
//! - [`layout`]: Section extents and scroll offset resolution
//! - [`app`]: Navigation, follow-up dispatch and the main loop
//! - [`ui`]: Terminal layout and rendering
//! - [`config`]: Persisted default flags
//! - [`error`]: Error types

pub mod app;
pub mod config;
pub mod conversation;
pub mod error;
pub mod layout;
pub mod perf;
pub mod state;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, update};
    pub use crate::conversation::{SectionId, Turn, TurnContent, TurnId, TurnStore};
    pub use crate::error::ViewError;
    pub use crate::layout::{ScrollTracker, SectionExtent, SectionRegistry};
    pub use crate::state::{Selection, ViewState};
    pub use crate::ui::viewport::Viewport;
}
