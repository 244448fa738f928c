//! Sidebar entries, shared by rendering and mouse hit-testing.

use unicode_width::UnicodeWidthStr;

use crate::conversation::{SectionId, TurnId, TurnStore};
use crate::state::Selection;

use super::layout::wrap_words;

/// Rows above the first entry: header and a spacer.
pub const SIDEBAR_HEADER_ROWS: u16 = 2;

/// Maximum rows a turn's query occupies in the sidebar.
const QUERY_MAX_ROWS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarTarget {
    Turn(TurnId),
    Section(TurnId, SectionId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub target: SidebarTarget,
    pub lines: Vec<String>,
    pub active: bool,
}

impl SidebarEntry {
    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

/// Build the entries for the current turns and selection.
///
/// A single turn lists its four sections. With several turns, each turn shows
/// its `Qn` badge and query, and only the selected turn lists its sections.
pub fn sidebar_entries(store: &TurnStore, selection: &Selection, width: u16) -> Vec<SidebarEntry> {
    let width = usize::from(width).max(8);
    let mut entries = Vec::new();
    if store.len() == 1 {
        push_sections(&mut entries, store.first().id(), selection, 0);
        return entries;
    }

    for (idx, turn) in store.iter().enumerate() {
        let badge = format!("Q{} ", idx + 1);
        let indent = badge.width();
        let mut lines = wrap_words(turn.query(), width.saturating_sub(indent));
        if lines.len() > QUERY_MAX_ROWS {
            lines.truncate(QUERY_MAX_ROWS);
            if let Some(last) = lines.last_mut() {
                last.push('…');
            }
        }
        let lines = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    format!("{badge}{line}")
                } else {
                    format!("{}{line}", " ".repeat(indent))
                }
            })
            .collect();
        let active = turn.id() == &selection.turn;
        entries.push(SidebarEntry {
            target: SidebarTarget::Turn(turn.id().clone()),
            lines,
            active,
        });
        if active {
            push_sections(&mut entries, turn.id(), selection, 2);
        }
    }
    entries
}

fn push_sections(
    entries: &mut Vec<SidebarEntry>,
    turn: &TurnId,
    selection: &Selection,
    indent: usize,
) {
    for section in SectionId::ALL {
        let active = &selection.turn == turn && selection.section == section;
        let dot = if active { '●' } else { '○' };
        entries.push(SidebarEntry {
            target: SidebarTarget::Section(turn.clone(), section),
            lines: vec![format!("{}{dot} {}", " ".repeat(indent), section.label())],
            active,
        });
    }
}

/// First row to draw so the active section entry stays visible.
pub fn sidebar_scroll(entries: &[SidebarEntry], visible_rows: usize) -> usize {
    let mut row = 0;
    let mut active_bottom = 0;
    for entry in entries {
        row += entry.height();
        if entry.active {
            active_bottom = row;
        }
    }
    active_bottom.saturating_sub(visible_rows)
}

/// Entry under `row`, counted from the first drawn entry row.
pub fn sidebar_target_at(
    entries: &[SidebarEntry],
    visible_rows: usize,
    row: usize,
) -> Option<SidebarTarget> {
    let mut target_row = sidebar_scroll(entries, visible_rows) + row;
    for entry in entries {
        if target_row < entry.height() {
            return Some(entry.target.clone());
        }
        target_row -= entry.height();
    }
    None
}
