//! Colors and line styles.
//!
//! Uses ANSI colors so the terminal palette still applies; light
//! backgrounds swap to darker indexed colors.

use std::sync::Mutex;

use ratatui::style::{Color, Modifier, Style};

use super::layout::LineKind;

/// Brand accent (title bar, active markers).
pub const ACCENT: Color = Color::Rgb(0, 140, 140);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: Mutex<Option<Background>> = Mutex::new(None);

/// Force a background; `None` returns to `COLORFGBG` detection.
pub fn set_background(mode: Option<Background>) {
    if let Ok(mut guard) = BACKGROUND_OVERRIDE.lock() {
        *guard = mode;
    }
}

pub fn is_light_background() -> bool {
    let forced = BACKGROUND_OVERRIDE.lock().ok().and_then(|guard| *guard);
    let mode = forced
        .unwrap_or_else(|| background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()));
    mode == Background::Light
}

fn background_from_colorfgbg(colorfgbg: Option<&str>) -> Background {
    let Some(value) = colorfgbg else {
        return Background::Dark;
    };
    let bg = value.rsplit(';').next().unwrap_or(value);
    match bg.parse::<u8>() {
        Ok(bg) if bg >= 7 => Background::Light,
        _ => Background::Dark,
    }
}

const fn pick(light_bg: bool, light: Color, dark: Color) -> Color {
    if light_bg { light } else { dark }
}

/// Muted text: placeholders, metadata, inactive sidebar entries.
pub fn dim() -> Style {
    Style::default().fg(pick(
        is_light_background(),
        Color::Indexed(244),
        Color::Indexed(245),
    ))
}

pub fn card_border() -> Style {
    Style::default().fg(pick(
        is_light_background(),
        Color::Indexed(250),
        Color::Indexed(240),
    ))
}

pub fn active_marker() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Style for a laid-out conversation line.
pub fn style_for_line_kind(kind: LineKind) -> Style {
    let light_bg = is_light_background();
    match kind {
        LineKind::CardTop => Style::default()
            .fg(pick(light_bg, Color::Indexed(244), Color::Indexed(246)))
            .add_modifier(Modifier::BOLD),
        LineKind::CardBottom => card_border(),
        LineKind::Query => Style::default().add_modifier(Modifier::BOLD),
        LineKind::SectionRule => Style::default()
            .fg(pick(light_bg, Color::Indexed(30), Color::Cyan))
            .add_modifier(Modifier::BOLD),
        LineKind::Subheading => Style::default()
            .fg(pick(light_bg, Color::Indexed(238), Color::White))
            .add_modifier(Modifier::BOLD),
        LineKind::TabBar => Style::default().fg(pick(light_bg, Color::Indexed(30), Color::Cyan)),
        LineKind::GraphNode => Style::default().fg(pick(light_bg, Color::Indexed(22), Color::Green)),
        LineKind::GraphEdge | LineKind::CitationMeta | LineKind::LinkDetail => dim(),
        LineKind::Placeholder => dim().add_modifier(Modifier::ITALIC),
        LineKind::CitationTitle => Style::default().add_modifier(Modifier::BOLD),
        LineKind::LinkTitle => Style::default()
            .fg(pick(light_bg, Color::Indexed(24), Color::Blue))
            .add_modifier(Modifier::UNDERLINED),
        LineKind::FollowUp => Style::default().fg(pick(light_bg, Color::Indexed(30), Color::Cyan)),
        LineKind::Body | LineKind::Blank => Style::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorfgbg_detection() {
        assert_eq!(background_from_colorfgbg(None), Background::Dark);
        assert_eq!(background_from_colorfgbg(Some("15;0")), Background::Dark);
        assert_eq!(background_from_colorfgbg(Some("0;15")), Background::Light);
        assert_eq!(background_from_colorfgbg(Some("0;default;15")), Background::Light);
        assert_eq!(background_from_colorfgbg(Some("garbage")), Background::Dark);
    }

    #[test]
    fn test_section_rules_are_bold() {
        let style = style_for_line_kind(LineKind::SectionRule);
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_placeholders_are_italic() {
        let style = style_for_line_kind(LineKind::Placeholder);
        assert!(style.add_modifier.contains(Modifier::ITALIC));
    }
}
