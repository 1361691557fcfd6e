//! Progress bar rendering for the player.
//!
//! Displays how far the current run is through its scripted timeline,
//! with a marker at each phase boundary.

use std::time::Duration;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::playback::Timeline;
use crate::theme::Theme;

/// Format a duration as `MM:SS.t`.
///
/// # Arguments
/// * `duration` - Time to format
///
/// # Returns
/// Minutes, seconds and tenths, e.g. `"00:03.6"`
pub fn format_elapsed(duration: Duration) -> String {
    let tenths = duration.as_millis() / 100;
    let mins = tenths / 600;
    let secs = (tenths / 10) % 60;
    format!("{:02}:{:02}.{}", mins, secs, tenths % 10)
}

/// Phase boundaries drawn as markers on the bar.
pub fn phase_markers(timeline: &Timeline) -> [Duration; 4] {
    [
        timeline.user_message,
        timeline.thinking,
        timeline.streaming,
        timeline.complete,
    ]
}

/// Build the progress bar character array.
///
/// # Arguments
/// * `bar_width` - Width of the bar in characters
/// * `elapsed` - Time since the run started
/// * `total` - Length of the run
/// * `markers` - Times to mark with `◆`
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where bar_chars contains the visual
/// representation and filled_count is the number of filled positions.
pub fn build_progress_bar_chars(
    bar_width: usize,
    elapsed: Duration,
    total: Duration,
    markers: &[Duration],
) -> (Vec<char>, usize) {
    let progress = if total.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec!['─'; bar_width];

    if filled < bar_width {
        bar[filled] = '⏺';
    }

    for marker in markers {
        let marker_pos = if total.is_zero() {
            0
        } else {
            ((marker.as_secs_f64() / total.as_secs_f64()) * bar_width as f64) as usize
        };
        if marker_pos < bar_width && bar[marker_pos] != '⏺' {
            bar[marker_pos] = '◆';
        }
    }

    (bar, filled)
}

/// Build the styled progress line for a given width.
pub fn build_progress_line(width: u16, elapsed: Duration, timeline: &Timeline, theme: &Theme) -> Line<'static> {
    let total = timeline.total();
    let shown = elapsed.min(total);
    let time_display = format!(" {}/{}", format_elapsed(shown), format_elapsed(total));

    // One column of left padding plus the time display
    let bar_width = (width as usize).saturating_sub(1 + time_display.len());
    let (bar, filled) = build_progress_bar_chars(bar_width, shown, total, &phase_markers(timeline));

    let mut spans = Vec::with_capacity(bar_width + 2);
    spans.push(Span::raw(" "));
    for (i, &c) in bar.iter().enumerate() {
        let span = if c == '◆' {
            Span::styled(c.to_string(), theme.citation_style())
        } else if i < filled {
            Span::styled("━", theme.accent_style())
        } else if i == filled {
            Span::styled(c.to_string(), theme.text_style())
        } else {
            Span::styled(c.to_string(), theme.text_secondary_style())
        };
        spans.push(span);
    }
    spans.push(Span::styled(time_display, theme.text_secondary_style()));
    Line::from(spans)
}

/// Render the progress bar.
pub fn render_progress_bar(frame: &mut Frame, area: Rect, elapsed: Duration, timeline: &Timeline, theme: &Theme) {
    let line = build_progress_line(area.width, elapsed, timeline, theme);
    frame.render_widget(Paragraph::new(line), area);
}
