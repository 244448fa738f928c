use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

use super::style::{ACCENT, dim};

/// Key reference grouped by topic.
const HELP_SECTIONS: &[(&str, &[&str])] = &[
    (
        "Scrolling",
        &[
            "  j/k or Up/Down      Scroll",
            "  Space/PageDown      Page down",
            "  b/PageUp            Page up",
            "  Ctrl-d / Ctrl-u     Half page",
            "  g / G               Top / bottom",
            "  Mouse wheel         Scroll",
        ],
    ),
    (
        "Navigation",
        &[
            "  ] / [               Next / previous section",
            "  } / {               Next / previous question",
            "  Click sidebar       Jump to question or section",
        ],
    ),
    (
        "Answers",
        &[
            "  v                   Cycle visualization tab",
            "  e                   Cycle evidence tab",
            "  1-9                 Ask suggested follow-up",
            "  Click follow-up     Ask it",
        ],
    ),
    (
        "Input",
        &[
            "  i or /              Focus input",
            "  Enter               Ask",
            "  Esc                 Leave input",
        ],
    ),
    (
        "Other",
        &[
            "  s                   Toggle sidebar",
            "  ? / F1              Toggle help",
            "  q / Ctrl-c          Quit",
        ],
    ),
];

/// Help lines: key groups followed by the config file locations.
fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let heading = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for (title, keys) in HELP_SECTIONS {
        lines.push(Line::styled(*title, heading));
        lines.extend(keys.iter().map(|k| Line::raw(*k)));
        lines.push(Line::default());
    }
    let path_or = |path: Option<&std::path::Path>, missing: &str| {
        path.map_or_else(|| missing.to_string(), |p| p.display().to_string())
    };
    lines.push(Line::styled("Config files", heading));
    lines.push(Line::raw(format!(
        "  Global  {}",
        path_or(model.config_global_path.as_deref(), "(not found)")
    )));
    lines.push(Line::raw(format!(
        "  Local   {}",
        path_or(model.config_local_path.as_deref(), "(none)")
    )));
    lines
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let lines = help_lines(model);
    let widest = lines.iter().map(Line::width).max().unwrap_or(0);
    let width = u16::try_from(widest + 4).unwrap_or(u16::MAX).max(44);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let popup = centered_popup_rect(width, height, area);

    let block = Block::default()
        .title(" Help ")
        .title_bottom(Line::styled(" j/k scroll · any key closes ", dim()).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .padding(Padding::horizontal(1));
    let visible = block.inner(popup).height as usize;
    let scroll = model
        .help_scroll_offset
        .min(lines.len().saturating_sub(visible));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0)),
        popup,
    );
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let size = (width.min(area.width), height.min(area.height));
    Rect {
        x: area.x + (area.width - size.0) / 2,
        y: area.y + (area.height - size.1) / 2,
        width: size.0,
        height: size.1,
    }
}
