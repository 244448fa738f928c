//! Conversation data: turns, their sections, and the turn store.
//!
//! - [`TurnStore`]: append-only ordered turns
//! - [`SectionId`]: the four fixed sub-views of a turn
//! - [`payload`]: built-in sample content and JSON loading

pub mod payload;
mod section;
mod store;
mod turn;

pub use section::SectionId;
pub use store::{TurnIdGenerator, TurnStore};
pub use turn::{Citation, Overview, Turn, TurnContent, TurnId};
