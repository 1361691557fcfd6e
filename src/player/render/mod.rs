//! Rendering components for the player.
//!
//! This module contains all the UI rendering functions for the player:
//! chat area, progress bar, status bar and help overlay.

mod chat;
mod help;
mod progress;
mod status;

pub use chat::{build_chat_lines, render_chat, STREAM_CURSOR};
pub use help::{calc_help_start_col, calc_help_start_row, help_area, render_help, HELP_LINES};
pub use progress::{build_progress_bar_chars, build_progress_line, format_elapsed, render_progress_bar};
pub use status::{build_status_spans, render_status_bar, StatusInfo};

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::playback::PlaybackEngine;
use crate::player::state::PlayerState;
use crate::theme::Theme;

/// Draw one full frame: chat, progress bar, status bar, and help if open.
pub fn draw(frame: &mut Frame, engine: &PlaybackEngine, state: &PlayerState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let view = engine.view();
    render_chat(frame, chunks[0], &view, theme, engine.reduced_motion());
    render_progress_bar(frame, chunks[1], view.elapsed, &engine.timeline(), theme);
    let info = StatusInfo {
        status: view.status,
        paused: state.paused,
        speed: state.speed,
        reduced_motion: engine.reduced_motion(),
    };
    render_status_bar(frame, chunks[2], &info, theme);

    if state.show_help {
        render_help(frame, theme);
    }
}
