use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::layout::SectionExtent;

use super::layout::{LayoutLine, LineKind};
use super::sidebar::{SidebarTarget, sidebar_entries, sidebar_scroll};
use super::style::{active_marker, card_border, dim, style_for_line_kind};
use super::{
    CARD_GUTTER, CHROME_ROWS, DOCUMENT_LEFT_PADDING, INPUT_ROWS, SIDEBAR_HEADER_ROWS,
    SIDEBAR_WIDTH, STATUS_ROWS, TITLE_ROWS, overlays, status,
};

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub title: Rect,
    pub sidebar: Option<Rect>,
    pub document: Rect,
    pub input: Rect,
    pub status: Rect,
}

impl ScreenAreas {
    /// Sidebar rows that hold entries (below the header, inside the border).
    pub fn sidebar_rows(&self) -> Option<Rect> {
        let inner = sidebar_block().inner(self.sidebar?);
        Some(Rect {
            y: inner.y + SIDEBAR_HEADER_ROWS,
            height: inner.height.saturating_sub(SIDEBAR_HEADER_ROWS),
            ..inner
        })
    }

    /// Conversation text area, right of the left padding.
    pub fn document_text(&self) -> Rect {
        document_block().inner(self.document)
    }
}

pub fn screen_areas(area: Rect, sidebar_visible: bool) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(TITLE_ROWS),
        Constraint::Min(0),
        Constraint::Length(STATUS_ROWS),
    ])
    .split(area);
    let (sidebar, main) = if sidebar_visible {
        let cols = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(rows[1]);
        (Some(cols[0]), cols[1])
    } else {
        (None, rows[1])
    };
    let main_rows = Layout::vertical([Constraint::Min(0), Constraint::Length(INPUT_ROWS)]).split(main);
    ScreenAreas {
        title: rows[0],
        sidebar,
        document: main_rows[0],
        input: main_rows[1],
        status: rows[2],
    }
}

/// Width turn text is wrapped to, for a terminal `total_width` columns wide.
pub fn conversation_text_width(total_width: u16, sidebar_visible: bool) -> u16 {
    let areas = screen_areas(Rect::new(0, 0, total_width, CHROME_ROWS + 1), sidebar_visible);
    areas
        .document_text()
        .width
        .saturating_sub(CARD_GUTTER + 1)
        .max(1)
}

fn document_block() -> Block<'static> {
    Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(DOCUMENT_LEFT_PADDING))
}

fn sidebar_block() -> Block<'static> {
    Block::default()
        .borders(Borders::RIGHT)
        .border_style(card_border())
        .padding(Padding::horizontal(1))
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let areas = screen_areas(area, model.sidebar_visible);

    status::render_title_bar(model, frame, areas.title);
    if let Some(sidebar) = areas.sidebar {
        render_sidebar(model, frame, sidebar, &areas);
    }
    render_document(model, frame, &areas);
    status::render_input_bar(model, frame, areas.input);
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, areas.status);
    } else {
        status::render_status_bar(model, frame, areas.status);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_sidebar(model: &Model, frame: &mut Frame, area: Rect, areas: &ScreenAreas) {
    let block = sidebar_block();
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let header = Paragraph::new(Line::styled(
        "CONTENTS",
        dim().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(header, Rect { height: 1, ..inner });

    let Some(rows) = areas.sidebar_rows() else {
        return;
    };
    let entries = sidebar_entries(&model.store, model.state.selection(), rows.width);
    let mut lines: Vec<Line> = Vec::new();
    for entry in &entries {
        let style = match (&entry.target, entry.active) {
            (SidebarTarget::Turn(_), true) => Style::default().add_modifier(Modifier::BOLD),
            (SidebarTarget::Section(..), true) => active_marker(),
            (_, false) => dim(),
        };
        lines.extend(entry.lines.iter().map(|text| Line::styled(text.clone(), style)));
    }
    let skip = sidebar_scroll(&entries, rows.height as usize);
    let skip = u16::try_from(skip).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((skip, 0)), rows);
}

fn render_document(model: &Model, frame: &mut Frame, areas: &ScreenAreas) {
    let text_area = areas.document_text();
    let width = text_area.width as usize;
    let offset = model.viewport.offset();
    let selection = model.state.selection();
    let selected = model.registry.get(&selection.turn, selection.section);

    let content: Vec<Line> = model
        .layout
        .visible(offset, text_area.height as usize)
        .iter()
        .enumerate()
        .map(|(i, line)| document_line(line, offset + i, selected, width))
        .collect();

    frame.render_widget(Clear, areas.document);
    frame.render_widget(Paragraph::new(content).block(document_block()), areas.document);
}

fn document_line(
    line: &LayoutLine,
    idx: usize,
    selected: Option<SectionExtent>,
    width: usize,
) -> Line<'static> {
    let style = style_for_line_kind(line.kind);
    match line.kind {
        LineKind::CardTop => {
            let label = format!("{} ", line.text);
            let fill = width.saturating_sub(3 + label.width());
            Line::from(vec![
                Span::styled("╭─ ", card_border()),
                Span::styled(label, style),
                Span::styled("─".repeat(fill), card_border()),
            ])
        }
        LineKind::CardBottom => {
            Line::styled(format!("╰{}", "─".repeat(width.saturating_sub(1))), card_border())
        }
        _ if line.framed => {
            let gutter = if selected.is_some_and(|extent| extent.contains(idx)) {
                Span::styled("┃ ", active_marker())
            } else {
                Span::styled("│ ", card_border())
            };
            if line.kind == LineKind::SectionRule {
                let label = format!("{} ", line.text);
                let fill = width.saturating_sub(CARD_GUTTER as usize + label.width());
                Line::from(vec![
                    gutter,
                    Span::styled(label, style),
                    Span::styled("─".repeat(fill), card_border()),
                ])
            } else {
                Line::from(vec![gutter, Span::styled(line.text.clone(), style)])
            }
        }
        _ => Line::styled(line.text.clone(), style),
    }
}
