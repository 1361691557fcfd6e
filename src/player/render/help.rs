//! Help overlay rendering for the player.
//!
//! Displays a centered help box with all available keyboard shortcuts.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Help text lines inside the help box.
pub const HELP_LINES: &[&str] = &[
    "",
    "  Playback",
    "    Space      Pause / Resume",
    "    r          Replay from the start",
    "    +/-        Speed up / down",
    "",
    "  Display",
    "    m          Toggle reduced motion",
    "",
    "  General",
    "    ?          Show this help",
    "    q / Esc    Quit player",
    "",
    "       Press any key to close",
    "",
];

/// Width of the help box including borders.
pub const HELP_BOX_WIDTH: u16 = 41;

/// Height of the help box including borders.
pub const HELP_BOX_HEIGHT: u16 = HELP_LINES.len() as u16 + 2;

/// Calculate the starting row for centering the help box.
pub fn calc_help_start_row(term_height: u16) -> u16 {
    term_height.saturating_sub(HELP_BOX_HEIGHT) / 2
}

/// Calculate the starting column for centering the help box.
pub fn calc_help_start_col(term_width: u16) -> u16 {
    term_width.saturating_sub(HELP_BOX_WIDTH) / 2
}

/// Area of the help box within `area`, clipped to fit.
pub fn help_area(area: Rect) -> Rect {
    Rect {
        x: area.x + calc_help_start_col(area.width),
        y: area.y + calc_help_start_row(area.height),
        width: HELP_BOX_WIDTH.min(area.width),
        height: HELP_BOX_HEIGHT.min(area.height),
    }
}

/// Render the help overlay on top of the current frame.
pub fn render_help(frame: &mut Frame, theme: &Theme) {
    let area = help_area(frame.area());
    let lines: Vec<Line> = HELP_LINES.iter().map(|l| Line::raw(*l)).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" chatreel help ")
        .border_style(theme.accent_style());

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).style(theme.text_style()).block(block), area);
}
