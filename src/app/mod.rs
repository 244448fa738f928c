//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Follow-up submission lives in [`FollowUpDispatcher`] and smooth jumps in
//! [`NavigationController`]; both are advanced by [`Message::Tick`].

mod dispatch;
mod event_loop;
mod input;
mod model;
mod navigation;
mod update;

pub use dispatch::{
    AnswerService, DEFAULT_ANSWER_DELAY_MS, DEFAULT_MOUNT_DELAY_MS, DispatchEvent,
    FollowUpDispatcher, MockAnswerService,
};
pub use model::{Model, TOAST_DURATION_MS, ToastLevel, sample_model};
pub use navigation::{
    DEFAULT_HEADER_OFFSET, NavigationController, SCROLL_ANIMATION_MS, ScrollAnimation,
};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::conversation::TurnContent;
use crate::conversation::payload::seed_turn;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    content: TurnContent,
    sidebar_visible: bool,
    answer_delay_ms: u64,
    mount_delay_ms: u64,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application answering every question with `content`.
    pub fn new(content: TurnContent) -> Self {
        Self {
            content,
            sidebar_visible: true,
            answer_delay_ms: DEFAULT_ANSWER_DELAY_MS,
            mount_delay_ms: DEFAULT_MOUNT_DELAY_MS,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set initial sidebar visibility.
    pub fn with_sidebar_visible(mut self, visible: bool) -> Self {
        self.sidebar_visible = visible;
        self
    }

    /// Simulated answer latency in milliseconds.
    pub const fn with_answer_delay(mut self, delay_ms: u64) -> Self {
        self.answer_delay_ms = delay_ms;
        self
    }

    /// Delay between appending a turn and scrolling to it.
    pub const fn with_mount_delay(mut self, delay_ms: u64) -> Self {
        self.mount_delay_ms = delay_ms;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    fn build_model(&self, terminal_size: (u16, u16)) -> Model {
        let service = MockAnswerService::new(self.content.clone(), self.answer_delay_ms);
        let dispatcher = FollowUpDispatcher::new(Box::new(service), self.mount_delay_ms);
        let mut model = Model::new(seed_turn(self.content.clone()), dispatcher, terminal_size)
            .with_sidebar_visible(self.sidebar_visible);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model
    }
}
