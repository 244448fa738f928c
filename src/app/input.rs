use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::ui::layout::LineAction;
use crate::ui::{ScreenAreas, SidebarTarget, screen_areas, sidebar_entries, sidebar_target_at};

use super::event_loop::ResizeDebouncer;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return Some(Message::Quit);
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Message::HelpScrollDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::HelpScrollUp),
                _ => Some(Message::HideHelp),
            };
        }

        if model.input_focused {
            return match key.code {
                KeyCode::Esc => Some(Message::BlurInput),
                KeyCode::Enter => Some(Message::SubmitInput),
                KeyCode::Backspace => Some(Message::InputBackspace),
                KeyCode::Up => Some(Message::ScrollUp(1)),
                KeyCode::Down => Some(Message::ScrollDown(1)),
                KeyCode::PageUp => Some(Message::PageUp),
                KeyCode::PageDown => Some(Message::PageDown),
                KeyCode::Char(c)
                    if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    Some(Message::InputChar(c))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Char('d') if ctrl => Some(Message::HalfPageDown),
            KeyCode::Char('u') if ctrl => Some(Message::HalfPageUp),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            KeyCode::Char(']') => Some(Message::NextSection),
            KeyCode::Char('[') => Some(Message::PrevSection),
            KeyCode::Char('}') => Some(Message::NextTurn),
            KeyCode::Char('{') => Some(Message::PrevTurn),

            KeyCode::Char('v') => Some(Message::CycleVisualTab),
            KeyCode::Char('e') => Some(Message::CycleEvidenceTab),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .map(|n| Message::AskSuggested(n as usize)),

            KeyCode::Char('i' | '/') => Some(Message::FocusInput),
            KeyCode::Char('s') => Some(Message::ToggleSidebar),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return match mouse.kind {
                MouseEventKind::ScrollDown => Some(Message::HelpScrollDown),
                MouseEventKind::ScrollUp => Some(Message::HelpScrollUp),
                MouseEventKind::Up(MouseButton::Left) => Some(Message::HideHelp),
                _ => None,
            };
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_LINES)),
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_LINES)),
            MouseEventKind::Up(MouseButton::Left) => {
                let areas = model_screen_areas(model);
                click_message(model, &areas, mouse.column, mouse.row)
            }
            _ => None,
        }
    }
}

/// Screen areas for the model's last known terminal size.
pub(super) fn model_screen_areas(model: &Model) -> ScreenAreas {
    let area = Rect::new(
        0,
        0,
        model.viewport.width(),
        model
            .viewport
            .height()
            .saturating_add(crate::ui::CHROME_ROWS),
    );
    screen_areas(area, model.sidebar_visible)
}

fn click_message(model: &Model, areas: &ScreenAreas, column: u16, row: u16) -> Option<Message> {
    if let Some(rows) = areas.sidebar_rows()
        && point_in_rect(column, row, rows)
    {
        let entries = sidebar_entries(&model.store, model.state.selection(), rows.width);
        let target = sidebar_target_at(&entries, rows.height as usize, usize::from(row - rows.y))?;
        return Some(match target {
            SidebarTarget::Turn(turn) => Message::JumpTo(turn, None),
            SidebarTarget::Section(turn, section) => Message::JumpTo(turn, Some(section)),
        });
    }

    if point_in_rect(column, row, areas.input) {
        return Some(Message::FocusInput);
    }

    let text = areas.document_text();
    if point_in_rect(column, row, text) {
        let line = model.viewport.offset() + usize::from(row - text.y);
        if let Some(LineAction::Ask(question)) =
            model.layout.line_at(line).and_then(|l| l.action.as_ref())
        {
            return Some(Message::Ask(question.clone()));
        }
        if model.input_focused {
            return Some(Message::BlurInput);
        }
    }
    None
}

const fn point_in_rect(column: u16, row: u16, rect: Rect) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
