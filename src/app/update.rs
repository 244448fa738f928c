use tracing::debug;

use crate::app::Model;
use crate::conversation::{SectionId, TurnId};
use crate::error::ViewError;
use crate::layout::resolve_section;
use crate::state::{SelectionSource, StateChange};

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Scrolling
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll so that the given line is at the top
    ScrollTo(usize),
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    GoToTop,
    GoToBottom,

    // Navigation
    /// Jump to a turn, optionally to a specific section
    JumpTo(TurnId, Option<SectionId>),
    NextSection,
    PrevSection,
    NextTurn,
    PrevTurn,

    // Content
    /// Cycle the visualization tab of the active turn
    CycleVisualTab,
    /// Cycle the evidence tab of the active turn
    CycleEvidenceTab,
    /// Ask a follow-up question directly
    Ask(String),
    /// Ask the active turn's n-th (1-based) suggested follow-up
    AskSuggested(usize),

    // Input
    FocusInput,
    BlurInput,
    InputChar(char),
    InputBackspace,
    /// Submit the input text
    SubmitInput,

    // Chrome
    ToggleSidebar,
    ToggleHelp,
    HideHelp,
    HelpScrollUp,
    HelpScrollDown,

    // Time and window
    /// Frame tick with the current time in milliseconds since startup
    Tick(u64),
    /// Terminal resized
    Resize(u16, u16),
    Redraw,

    /// Quit the application
    Quit,
}

impl Message {
    /// Messages that move the viewport at the user's request.
    const fn is_user_scroll(&self) -> bool {
        matches!(
            self,
            Self::ScrollUp(_)
                | Self::ScrollDown(_)
                | Self::ScrollTo(_)
                | Self::PageUp
                | Self::PageDown
                | Self::HalfPageUp
                | Self::HalfPageDown
                | Self::GoToTop
                | Self::GoToBottom
        )
    }
}

/// Pure function that updates the model based on a message.
///
/// All state transitions happen here; time only advances through
/// [`Message::Tick`].
pub fn update(mut model: Model, msg: Message) -> Model {
    let user_scroll = msg.is_user_scroll();
    let offset_before = model.viewport.offset();

    match msg {
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::ScrollTo(line) => model.viewport.scroll_to(line),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::HalfPageUp => model.viewport.half_page_up(),
        Message::HalfPageDown => model.viewport.half_page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        Message::JumpTo(turn, section) => model.jump(&turn, section),
        Message::NextSection => {
            if let Some((turn, section)) = model.next_section_target() {
                model.jump(&turn, Some(section));
            }
        }
        Message::PrevSection => {
            if let Some((turn, section)) = model.prev_section_target() {
                model.jump(&turn, Some(section));
            }
        }
        Message::NextTurn => {
            if let Some(turn) = model.store.get_index(model.active_turn_index() + 1) {
                let id = turn.id().clone();
                model.jump(&id, None);
            }
        }
        Message::PrevTurn => {
            if let Some(turn) = model
                .active_turn_index()
                .checked_sub(1)
                .and_then(|idx| model.store.get_index(idx))
            {
                let id = turn.id().clone();
                model.jump(&id, None);
            }
        }

        Message::CycleVisualTab => {
            let turn = model.active_turn().id().clone();
            let tab = model.tabs.cycle_visual(&turn);
            debug!(%turn, tab = tab.label(), "visualization tab");
            relayout_in_place(&mut model);
        }
        Message::CycleEvidenceTab => {
            let turn = model.active_turn().id().clone();
            let tab = model.tabs.cycle_evidence(&turn);
            debug!(%turn, tab = tab.label(), "evidence tab");
            relayout_in_place(&mut model);
        }
        Message::Ask(question) => {
            let _ = model.submit_follow_up(&question);
        }
        Message::AskSuggested(n) => {
            let question = n
                .checked_sub(1)
                .and_then(|idx| model.active_turn().follow_up_questions().get(idx))
                .cloned();
            if let Some(question) = question {
                let _ = model.submit_follow_up(&question);
            }
        }

        Message::FocusInput => model.input_focused = true,
        Message::BlurInput => model.input_focused = false,
        Message::InputChar(c) => {
            if model.input_focused && !model.dispatcher.is_pending() {
                model.input.push(c);
            }
        }
        Message::InputBackspace => {
            if model.input_focused && !model.dispatcher.is_pending() {
                model.input.pop();
            }
        }
        Message::SubmitInput => {
            let text = model.input.clone();
            match model.submit_follow_up(&text) {
                Ok(()) | Err(ViewError::EmptySubmission) => model.input.clear(),
                Err(_) => {}
            }
        }

        Message::ToggleSidebar => {
            model.sidebar_visible = !model.sidebar_visible;
            relayout_in_place(&mut model);
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll_offset = 0;
        }
        Message::HideHelp => model.help_visible = false,
        Message::HelpScrollUp => {
            model.help_scroll_offset = model.help_scroll_offset.saturating_sub(1);
        }
        Message::HelpScrollDown => model.help_scroll_offset += 1,

        Message::Tick(now_ms) => model.tick(now_ms),
        Message::Resize(width, height) => {
            model
                .viewport
                .resize(width, height.saturating_sub(crate::ui::CHROME_ROWS));
            relayout_in_place(&mut model);
        }
        // Redraw: no state change needed
        Message::Redraw => {}
        Message::Quit => model.should_quit = true,
    }

    // A scroll request that leaves the viewport where it was is not a scroll.
    if user_scroll && model.viewport.offset() != offset_before {
        model.user_scrolled();
    }
    model
}

/// Relayout keeping the top line inside the same (turn, section).
///
/// Line counts above the viewport may change, so the offset is carried as a
/// position relative to the section at the top of the pane. The selection is
/// kept while its section is still on screen.
fn relayout_in_place(model: &mut Model) {
    let anchor = resolve_section(&model.store, &model.registry, model.viewport.offset())
        .and_then(|sel| {
            let extent = model.registry.get(&sel.turn, sel.section)?;
            let into = model.viewport.offset().saturating_sub(extent.top);
            Some((sel, into))
        });
    model.relayout();
    if let Some((sel, into)) = anchor
        && let Some(extent) = model.registry.get(&sel.turn, sel.section)
    {
        model
            .viewport
            .scroll_to(extent.top + into.min(extent.height.saturating_sub(1)));
    }
    // A running animation targets offsets from the previous layout.
    model.navigation.cancel();

    let offset = model.viewport.offset();
    if model.tracker.is_pending() {
        // A user scroll from this frame is still unresolved; resolve it
        // against the new layout instead.
        model.tracker.queue(offset);
        return;
    }
    let visible = offset..offset + usize::from(model.viewport.height()).max(1);
    let selection = model.state.selection();
    let still_visible = model
        .registry
        .get(&selection.turn, selection.section)
        .is_some_and(|extent| extent.top < visible.end && visible.start < extent.bottom());
    if still_visible {
        return;
    }
    if let Some(selection) = model.tracker.resolve(offset, &model.store, &model.registry) {
        model
            .state
            .apply(StateChange::Select(selection, SelectionSource::Relayout));
    }
}
