use super::*;
use crate::app::{Message, Model, sample_model, update};
use crate::conversation::SectionId;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

const WIDTH: u16 = 100;
const HEIGHT: u16 = 12;

fn create_test_model() -> Model {
    sample_model((WIDTH, HEIGHT))
}

fn draw(model: &Model) -> Buffer {
    let backend = TestBackend::new(WIDTH, HEIGHT);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, row: u16) -> String {
    (0..buffer.area.width)
        .map(|col| buffer[(col, row)].symbol())
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|row| row_text(buffer, row))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_screen_areas_cover_terminal() {
    let area = Rect::new(0, 0, WIDTH, HEIGHT);
    let areas = screen_areas(area, true);
    assert_eq!(areas.title.height, TITLE_ROWS);
    assert_eq!(areas.status.y, HEIGHT - 1);
    assert_eq!(areas.sidebar.unwrap().width, SIDEBAR_WIDTH);
    assert_eq!(areas.document.height + areas.input.height, HEIGHT - 2);
    assert_eq!(areas.input.height, INPUT_ROWS);
    assert_eq!(areas.document.height, HEIGHT - CHROME_ROWS);

    let no_sidebar = screen_areas(area, false);
    assert!(no_sidebar.sidebar.is_none());
    assert_eq!(no_sidebar.document.width, WIDTH);
    assert_eq!(no_sidebar.sidebar_rows(), None);
}

#[test]
fn test_conversation_text_width_leaves_room_for_gutter() {
    let gutter = CARD_GUTTER + 1;
    assert_eq!(
        conversation_text_width(100, false),
        100 - DOCUMENT_LEFT_PADDING - gutter
    );
    assert_eq!(
        conversation_text_width(100, true),
        100 - SIDEBAR_WIDTH - DOCUMENT_LEFT_PADDING - gutter
    );
    assert_eq!(conversation_text_width(3, true), 1);
}

#[test]
fn test_sidebar_rows_start_below_header() {
    let areas = screen_areas(Rect::new(0, 0, WIDTH, HEIGHT), true);
    let sidebar = areas.sidebar.unwrap();
    let rows = areas.sidebar_rows().unwrap();
    assert_eq!(rows.y, sidebar.y + SIDEBAR_HEADER_ROWS);
    assert!(rows.right() < sidebar.right());
}

#[test]
fn test_render_shows_chrome_and_first_card() {
    let model = create_test_model();
    let buffer = draw(&model);
    let text = screen_text(&buffer);

    assert!(row_text(&buffer, 0).contains("PanKbase"));
    assert!(text.contains("CONTENTS"));
    assert!(text.contains("● AI OVERVIEW"));
    assert!(text.contains("○ EVIDENCE"));
    assert!(text.contains("QUESTION 1"));
    assert!(text.contains("Ask a follow-up..."));
    assert!(row_text(&buffer, HEIGHT - 1).contains("Q1/1"));
    assert!(row_text(&buffer, HEIGHT - 1).contains("AI OVERVIEW"));
}

#[test]
fn test_render_marks_selected_section_gutter() {
    let model = create_test_model();
    let buffer = draw(&model);
    let text = screen_text(&buffer);
    assert!(text.contains('┃'));

    let model = update(model, Message::JumpTo(model_seed(), Some(SectionId::FollowUp)));
    let buffer = draw(&model);
    // Selection moved off screen before the animation ran.
    assert!(!screen_text(&buffer).contains('┃'));
    assert!(screen_text(&buffer).contains("● FOLLOW UP"));
}

fn model_seed() -> crate::conversation::TurnId {
    crate::conversation::TurnId::from(crate::conversation::payload::SEED_TURN_ID)
}

#[test]
fn test_render_without_sidebar() {
    let model = update(create_test_model(), Message::ToggleSidebar);
    let text = screen_text(&draw(&model));
    assert!(!text.contains("CONTENTS"));
    assert!(text.contains("QUESTION 1"));
}

#[test]
fn test_render_pending_shows_thinking() {
    let model = update(create_test_model(), Message::Ask("What is CFTR?".to_string()));
    let buffer = draw(&model);
    assert!(row_text(&buffer, 0).contains("Thinking..."));
    assert!(screen_text(&buffer).contains("Thinking... What is CFTR?"));
}

#[test]
fn test_render_toast_replaces_status_bar() {
    let model = update(
        create_test_model(),
        Message::JumpTo(crate::conversation::TurnId::from("turn-42"), None),
    );
    let buffer = draw(&model);
    let status = row_text(&buffer, HEIGHT - 1);
    assert!(status.contains("[warn]"));
    assert!(status.contains("turn-42"));
    assert!(!status.contains("s:sidebar"));
}

#[test]
fn test_render_help_overlay() {
    let model = update(create_test_model(), Message::ToggleHelp);
    let text = screen_text(&draw(&model));
    assert!(text.contains("Help"));
    assert!(text.contains("Scrolling"));
}

#[test]
fn test_render_input_text_when_focused() {
    let mut model = update(create_test_model(), Message::FocusInput);
    for c in "cftr".chars() {
        model = update(model, Message::InputChar(c));
    }
    let text = screen_text(&draw(&model));
    assert!(text.contains("cftr▏"));
    assert!(!text.contains("Ask a follow-up..."));
}

#[test]
fn test_render_lists_turns_in_sidebar() {
    let mut model = update(create_test_model(), Message::Ask("What is CFTR?".to_string()));
    model = update(model, Message::Tick(crate::app::DEFAULT_ANSWER_DELAY_MS));
    let text = screen_text(&draw(&model));
    assert!(text.contains("Q1 "));
    assert!(text.contains("Q2 What is CFTR?"));
}
