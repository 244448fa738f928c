//! Section geometry and scroll tracking.
//!
//! - [`SectionRegistry`]: last measured extent of each (turn, section)
//! - [`ScrollTracker`]: maps a scroll offset to the section in view

mod registry;
mod tracker;

pub use registry::{SectionExtent, SectionRegistry};
pub use tracker::{DEFAULT_LOOKAHEAD, ScrollTracker, resolve_section};
