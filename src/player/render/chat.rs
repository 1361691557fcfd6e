//! Chat transcript rendering for the player.
//!
//! Turns a [`DemoView`] into styled lines: the user bubble, the thinking
//! checklist, the streamed answer with citation pills, its sources and
//! the artifact card. The view is scrolled so the newest line stays
//! visible.

use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use crate::playback::{DemoPhase, DemoView};
use crate::script::ResponsePiece;
use crate::theme::Theme;

/// Cursor drawn after the revealed text while streaming.
pub const STREAM_CURSOR: &str = "▌";

/// Frames of the typing indicator shown before thinking begins.
const TYPING_FRAMES: [&str; 3] = ["●○○", "○●○", "○○●"];

/// Milliseconds per typing indicator frame.
const TYPING_FRAME_MS: u128 = 300;

/// Render the chat area.
pub fn render_chat(frame: &mut Frame, area: Rect, view: &DemoView<'_>, theme: &Theme, reduced_motion: bool) {
    let lines = build_chat_lines(view, theme, reduced_motion);
    let scroll = scroll_offset(&lines, area.width, area.height);
    let chat = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(chat, area);
}

/// Build the styled lines of the chat for the current frame.
pub fn build_chat_lines(view: &DemoView<'_>, theme: &Theme, reduced_motion: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(message) = view.user_message {
        lines.push(
            Line::from(Span::styled("You", theme.user_style().add_modifier(Modifier::BOLD)))
                .alignment(Alignment::Right),
        );
        for text in message.lines() {
            lines.push(Line::from(Span::styled(text.to_string(), theme.user_style())).alignment(Alignment::Right));
        }
        lines.push(Line::default());
    }

    if view.phase == DemoPhase::UserMessage {
        lines.push(Line::from(vec![
            Span::styled("Assistant ", theme.text_secondary_style()),
            Span::styled(typing_indicator(view, reduced_motion), theme.accent_style()),
        ]));
    }

    if !view.steps.is_empty() {
        lines.push(Line::from(Span::styled("Thinking", theme.accent_bold_style())));
        for step in view.steps {
            let line = if step.completed {
                Line::from(vec![
                    Span::styled("  ✓ ", theme.success_style()),
                    Span::styled(step.text.clone(), theme.text_style()),
                ])
            } else {
                Line::from(vec![
                    Span::styled("  ○ ", theme.text_secondary_style()),
                    Span::styled(step.text.clone(), theme.text_secondary_style()),
                ])
            };
            lines.push(line);
        }
        lines.push(Line::default());
    }

    if matches!(view.phase, DemoPhase::Streaming | DemoPhase::Complete) {
        lines.push(Line::from(Span::styled("Assistant", theme.accent_bold_style())));
        lines.extend(response_lines(view, theme));
        lines.push(Line::default());
    }

    let cited = view.cited();
    if !cited.is_empty() {
        lines.push(Line::from(Span::styled("Sources", theme.accent_bold_style())));
        for citation in cited {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!(" {} ", citation.number), theme.citation_style()),
                Span::styled(format!(" {}", citation.label()), theme.text_secondary_style()),
            ]));
        }
        lines.push(Line::default());
    }

    if let Some(artifact) = view.artifact {
        let border = theme.text_secondary_style();
        lines.push(Line::from(vec![
            Span::styled("╭─ ", border),
            Span::styled(artifact.kind.clone(), theme.accent_style()),
            Span::styled(" ─", border),
        ]));
        lines.push(Line::from(vec![
            Span::styled("│ ", border),
            Span::styled(artifact.title.clone(), theme.text_style().add_modifier(Modifier::BOLD)),
        ]));
        for text in artifact.preview.lines() {
            lines.push(Line::from(vec![
                Span::styled("│ ", border),
                Span::styled(text.to_string(), theme.text_secondary_style()),
            ]));
        }
        lines.push(Line::from(Span::styled("╰─", border)));
    }

    lines
}

/// The revealed response, split into lines, with citations as pills.
fn response_lines(view: &DemoView<'_>, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for piece in &view.response {
        match piece {
            ResponsePiece::Text(text) => {
                let mut parts = text.split('\n');
                if let Some(first) = parts.next() {
                    push_text(&mut current, first, theme);
                }
                for part in parts {
                    lines.push(Line::from(std::mem::take(&mut current)));
                    push_text(&mut current, part, theme);
                }
            }
            ResponsePiece::Citation { citation, .. } => {
                current.push(Span::styled(format!(" {} ", citation.number), theme.citation_style()));
            }
        }
    }

    if view.phase == DemoPhase::Streaming {
        current.push(Span::styled(STREAM_CURSOR, theme.accent_style()));
    }
    lines.push(Line::from(current));
    lines
}

fn push_text(spans: &mut Vec<Span<'static>>, text: &str, theme: &Theme) {
    if !text.is_empty() {
        spans.push(Span::styled(text.to_string(), theme.text_style()));
    }
}

/// Current typing indicator frame; static with reduced motion.
fn typing_indicator(view: &DemoView<'_>, reduced_motion: bool) -> &'static str {
    if reduced_motion {
        return "•••";
    }
    let frame = (view.elapsed.as_millis() / TYPING_FRAME_MS) % TYPING_FRAMES.len() as u128;
    TYPING_FRAMES[frame as usize]
}

/// Rows to scroll so the last line is at the bottom of the area.
fn scroll_offset(lines: &[Line<'_>], width: u16, height: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let rows: usize = lines
        .iter()
        .map(|line| {
            let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
            wrapped_rows(&text, width as usize)
        })
        .sum();
    rows.saturating_sub(height as usize).min(u16::MAX as usize) as u16
}

/// Rows `text` takes when word-wrapped at `width` columns.
fn wrapped_rows(text: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut col = 0;
    for word in text.split_inclusive(' ') {
        let visible = word.trim_end_matches(' ').width();
        if col > 0 && col + visible > width {
            rows += 1;
            col = 0;
        }
        col += word.width();
        // Words longer than a row are broken
        while col > width {
            rows += 1;
            col -= width;
        }
    }
    rows
}
