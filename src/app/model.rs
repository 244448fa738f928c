use std::path::PathBuf;

use tracing::{debug, warn};

use crate::conversation::payload::{sample_content, seed_turn};
use crate::conversation::{SectionId, Turn, TurnContent, TurnId, TurnStore};
use crate::error::ViewError;
use crate::layout::{ScrollTracker, SectionRegistry};
use crate::state::{Selection, SelectionSource, StateChange, ViewState};
use crate::ui::layout::{DocumentLayout, layout_turns};
use crate::ui::tabs::TabState;
use crate::ui::viewport::Viewport;

use super::dispatch::{
    DEFAULT_ANSWER_DELAY_MS, DEFAULT_MOUNT_DELAY_MS, DispatchEvent, FollowUpDispatcher,
    MockAnswerService,
};
use super::navigation::NavigationController;

/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u64 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at_ms: u64,
}

/// The complete application state.
///
/// Time is never read from the system clock here; the event loop feeds it in
/// through [`Message::Tick`](super::Message::Tick).
pub struct Model {
    /// All turns, in creation order
    pub store: TurnStore,
    /// Last measured extent of every (turn, section)
    pub registry: SectionRegistry,
    /// Selection and loading flag
    pub state: ViewState,
    pub tracker: ScrollTracker,
    pub navigation: NavigationController,
    pub dispatcher: FollowUpDispatcher,
    pub viewport: Viewport,
    /// Lines of the current layout pass
    pub layout: DocumentLayout,
    pub tabs: TabState,
    pub sidebar_visible: bool,
    pub help_visible: bool,
    pub help_scroll_offset: usize,
    /// Text of the follow-up input
    pub input: String,
    pub input_focused: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    pub should_quit: bool,
    /// Milliseconds since startup, as of the last tick
    pub clock_ms: u64,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("turns", &self.store.len())
            .field("selection", self.state.selection())
            .field("loading", &self.state.is_loading())
            .field("offset", &self.viewport.offset())
            .field("sidebar_visible", &self.sidebar_visible)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model showing `seed` and measure it for the terminal size.
    pub fn new(seed: Turn, dispatcher: FollowUpDispatcher, terminal_size: (u16, u16)) -> Self {
        let selection = Selection::new(seed.id().clone(), SectionId::AiOverview);
        let mut model = Self {
            store: TurnStore::new(seed),
            registry: SectionRegistry::new(),
            state: ViewState::new(selection),
            tracker: ScrollTracker::default(),
            navigation: NavigationController::default(),
            dispatcher,
            viewport: Viewport::new(
                terminal_size.0,
                terminal_size.1.saturating_sub(crate::ui::CHROME_ROWS),
                0,
            ),
            layout: DocumentLayout::default(),
            tabs: TabState::default(),
            sidebar_visible: true,
            help_visible: false,
            help_scroll_offset: 0,
            input: String::new(),
            input_focused: false,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
            clock_ms: 0,
            toast: None,
        };
        model.relayout();
        model
    }

    /// Set initial sidebar visibility.
    #[must_use]
    pub fn with_sidebar_visible(mut self, visible: bool) -> Self {
        if self.sidebar_visible != visible {
            self.sidebar_visible = visible;
            self.relayout();
        }
        self
    }

    /// Width available to turn text in the conversation pane.
    pub(super) fn text_width(&self) -> u16 {
        crate::ui::conversation_text_width(self.viewport.width(), self.sidebar_visible)
    }

    /// Lay out every turn again and re-register all extents.
    pub(super) fn relayout(&mut self) {
        let _scope = crate::perf::scope("layout.relayout");
        let width = self.text_width();
        self.layout = layout_turns(&self.store, &self.tabs, width);
        for (turn, section, extent) in self.layout.extents() {
            self.registry.register(turn, *section, *extent);
        }
        self.viewport.set_total_lines(self.layout.line_count());
        debug!(
            width,
            lines = self.layout.line_count(),
            turns = self.store.len(),
            "relayout"
        );
        crate::perf::log_event(
            "layout.relayout",
            format!(
                "width={width} lines={} extents={} generation={}",
                self.layout.line_count(),
                self.registry.len(),
                self.registry.generation()
            ),
        );
    }

    /// Record a user-driven viewport move: cancels any smooth scroll and
    /// queues the new offset for the tracker.
    pub(super) fn user_scrolled(&mut self) {
        self.navigation.cancel();
        self.tracker.queue(self.viewport.offset());
    }

    /// Jump to `(turn, section)`, reporting failures as toasts.
    pub(super) fn jump(&mut self, turn: &TurnId, section: Option<SectionId>) {
        let result = self.navigation.jump_to(
            &mut self.state,
            &self.store,
            &self.registry,
            turn,
            section,
            self.viewport.offset(),
            self.viewport.max_offset(),
            self.clock_ms,
        );
        match result {
            Ok(target) => {
                // Offsets queued before the jump would override its selection.
                self.tracker.discard();
                crate::perf::log_event("nav.jump", format!("turn={turn} target={target}"));
            }
            Err(err @ ViewError::InvalidNavigationTarget(_)) => {
                warn!(%err, "jump rejected");
                self.show_toast(ToastLevel::Warning, err.to_string());
            }
            Err(err) => {
                self.tracker.discard();
                debug!(%err, "jump selected without scrolling");
            }
        }
    }

    /// Submit `text` as a follow-up question.
    pub(super) fn submit_follow_up(&mut self, text: &str) -> Result<(), ViewError> {
        let result = self
            .dispatcher
            .submit(text, &mut self.state, self.clock_ms);
        if result == Err(ViewError::ConcurrentSubmission) {
            self.show_toast(
                ToastLevel::Warning,
                "Still thinking about the previous question",
            );
        }
        result
    }

    /// Advance time: dispatcher, scheduled jump, animation, tracker, repair.
    pub(super) fn tick(&mut self, now_ms: u64) {
        self.clock_ms = self.clock_ms.max(now_ms);
        let now_ms = self.clock_ms;
        self.expire_toast(now_ms);

        match self
            .dispatcher
            .poll(&mut self.state, &mut self.store, now_ms)
        {
            Some(DispatchEvent::Appended(id)) => {
                self.relayout();
                crate::perf::log_event("dispatch.appended", format!("turn={id}"));
            }
            Some(DispatchEvent::Failed { query, error }) => {
                if self.input.trim().is_empty() {
                    self.input = query;
                }
                self.show_toast(ToastLevel::Error, format!("{error}. Press Enter to retry."));
            }
            None => {}
        }

        if let Some(turn) = self.dispatcher.take_due_jump(&self.state, now_ms) {
            self.jump(&turn, None);
        }

        if let Some(offset) = self.navigation.step(now_ms) {
            self.viewport.scroll_to(offset);
        }

        if let Some(selection) = self.tracker.flush(&self.store, &self.registry) {
            crate::perf::log_event(
                "tracker.flush",
                format!(
                    "offset={} turn={} section={}",
                    self.viewport.offset(),
                    selection.turn,
                    selection.section
                ),
            );
            self.state
                .apply(StateChange::Select(selection, SelectionSource::Scroll));
        }

        self.state.repair(&self.store);
    }

    /// Whether something will change on the next tick without user input.
    pub fn is_busy(&self) -> bool {
        self.navigation.is_animating()
            || self.dispatcher.is_pending()
            || self.dispatcher.has_scheduled_jump()
            || self.tracker.is_pending()
            || self.toast.is_some()
    }

    /// The turn the selection points at, falling back to the first turn.
    pub fn active_turn(&self) -> &Turn {
        self.store
            .get(&self.state.selection().turn)
            .unwrap_or_else(|| self.store.first())
    }

    pub fn active_turn_index(&self) -> usize {
        self.store
            .position(&self.state.selection().turn)
            .unwrap_or(0)
    }

    /// The (turn, section) after the current selection, crossing turn boundaries.
    pub(super) fn next_section_target(&self) -> Option<(TurnId, SectionId)> {
        let selection = self.state.selection();
        if let Some(section) = selection.section.next() {
            return Some((selection.turn.clone(), section));
        }
        let next = self.store.get_index(self.active_turn_index() + 1)?;
        Some((next.id().clone(), SectionId::AiOverview))
    }

    pub(super) fn prev_section_target(&self) -> Option<(TurnId, SectionId)> {
        let selection = self.state.selection();
        if let Some(section) = selection.section.prev() {
            return Some((selection.turn.clone(), section));
        }
        let prev = self
            .store
            .get_index(self.active_turn_index().checked_sub(1)?)?;
        Some((prev.id().clone(), SectionId::FollowUp))
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at_ms: self.clock_ms.saturating_add(TOAST_DURATION_MS),
        });
    }

    pub(super) fn expire_toast(&mut self, now_ms: u64) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at_ms <= now_ms)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        let service = MockAnswerService::new(TurnContent::default(), DEFAULT_ANSWER_DELAY_MS);
        let seed = seed_turn(TurnContent::default());
        Self {
            state: ViewState::new(Selection::new(seed.id().clone(), SectionId::AiOverview)),
            store: TurnStore::new(seed),
            registry: SectionRegistry::new(),
            tracker: ScrollTracker::default(),
            navigation: NavigationController::default(),
            dispatcher: FollowUpDispatcher::new(Box::new(service), DEFAULT_MOUNT_DELAY_MS),
            viewport: Viewport::new(80, 24, 0),
            layout: DocumentLayout::default(),
            tabs: TabState::default(),
            sidebar_visible: true,
            help_visible: false,
            help_scroll_offset: 0,
            input: String::new(),
            input_focused: false,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
            clock_ms: 0,
            toast: None,
        }
    }
}

/// A model over the built-in sample with the default simulated service.
pub fn sample_model(terminal_size: (u16, u16)) -> Model {
    let service = MockAnswerService::new(sample_content(), DEFAULT_ANSWER_DELAY_MS);
    Model::new(
        seed_turn(sample_content()),
        FollowUpDispatcher::new(Box::new(service), DEFAULT_MOUNT_DELAY_MS),
        terminal_size,
    )
}
