use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, ToastLevel};

use super::style::{ACCENT, active_marker, card_border, dim};

pub const INPUT_PLACEHOLDER: &str = "Ask a follow-up...";

pub fn render_title_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(" PanKbase ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" beta "),
    ];
    if model.state.is_loading() {
        spans.push(Span::styled(
            "  ● Thinking...",
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }
    let bar = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(ACCENT).fg(Color::White));
    frame.render_widget(bar, area);
}

pub fn render_input_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let border = if model.input_focused {
        active_marker()
    } else {
        card_border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title_bottom(Line::styled(" Enter ask · Esc leave ", dim()).right_aligned());
    let inner_width = block.inner(area).width as usize;

    let line = if let Some(query) = model.dispatcher.pending_query() {
        Line::styled(
            format!("Thinking... {}", tail_to_width(query, inner_width.saturating_sub(12))),
            dim().add_modifier(Modifier::ITALIC),
        )
    } else {
        let mut spans = Vec::new();
        if model.input.is_empty() {
            if model.input_focused {
                spans.push(Span::styled("▏", active_marker()));
            }
            spans.push(Span::styled(INPUT_PLACEHOLDER, dim()));
        } else {
            spans.push(Span::raw(
                tail_to_width(&model.input, inner_width.saturating_sub(1)).to_string(),
            ));
            if model.input_focused {
                spans.push(Span::styled("▏", active_marker()));
            }
        }
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Longest suffix of `text` that fits in `width` columns.
fn tail_to_width(text: &str, width: usize) -> &str {
    let mut start = 0;
    while text[start..].width() > width {
        let Some(ch) = text[start..].chars().next() else {
            break;
        };
        start += ch.len_utf8();
    }
    &text[start..]
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let selection = model.state.selection();
    let status = format!(
        " Q{}/{}  {}  [{}%]  s:sidebar  ?:help",
        model.active_turn_index() + 1,
        model.store.len(),
        selection.section.label(),
        model.viewport.scroll_percent(),
    );
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_to_width_keeps_end_of_text() {
        assert_eq!(tail_to_width("short", 10), "short");
        assert_eq!(tail_to_width("what is cftr", 4), "cftr");
        assert_eq!(tail_to_width("αβγδ", 2), "γδ");
        assert_eq!(tail_to_width("anything", 0), "");
    }
}
