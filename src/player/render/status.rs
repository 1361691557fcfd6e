//! Status bar rendering for the player.
//!
//! Displays the phase status, playback state, speed and keyboard shortcuts.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Key hints shown when there is room.
const KEY_HINTS: &[(&str, &str)] = &[
    ("space", "pause"),
    ("r", "replay"),
    ("+/-", "speed"),
    ("m", "motion"),
    ("?", "help"),
    ("q", "quit"),
];

/// What the status bar shows.
#[derive(Debug, Clone, Copy)]
pub struct StatusInfo<'a> {
    pub status: &'a str,
    pub paused: bool,
    pub speed: f64,
    pub reduced_motion: bool,
}

/// Build the status bar spans, dropping key hints that do not fit.
pub fn build_status_spans(info: &StatusInfo<'_>, theme: &Theme, width: u16) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    // Shows the action space will take
    let icon = if info.paused { " ▶ " } else { " ⏸ " };
    spans.push(Span::styled(icon, theme.text_style()));
    spans.push(Span::styled(info.status.to_string(), theme.text_style()));
    spans.push(Span::styled("  spd:", theme.text_secondary_style()));
    spans.push(Span::styled(format!("{:.1}x", info.speed), theme.text_style()));
    if info.paused {
        spans.push(Span::styled(" [paused]", theme.accent_style()));
    }
    if info.reduced_motion {
        spans.push(Span::styled(" [reduced motion]", theme.accent_style()));
    }

    let mut used: usize = spans.iter().map(|s| s.content.width()).sum();
    let separator = "  │";
    if used + separator.width() < width as usize {
        spans.push(Span::styled(separator, theme.text_secondary_style()));
        used += separator.width();
        for (key, desc) in KEY_HINTS {
            let hint_width = 1 + key.width() + 1 + desc.width();
            if used + hint_width > width as usize {
                break;
            }
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*key, theme.accent_style()));
            spans.push(Span::styled(format!(":{}", desc), theme.text_secondary_style()));
            used += hint_width;
        }
    }

    spans
}

/// Render the status bar.
pub fn render_status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo<'_>, theme: &Theme) {
    let line = Line::from(build_status_spans(info, theme, area.width));
    frame.render_widget(Paragraph::new(line), area);
}
