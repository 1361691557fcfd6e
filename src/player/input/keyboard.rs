//! Keyboard input handling for the player.
//!
//! Handles playback controls (replay, pause, speed), the reduced-motion
//! toggle and the help overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::playback::PlaybackEngine;
use crate::player::state::{InputResult, PlayerState};

/// Handle a keyboard event.
pub fn handle_key_event(key: KeyEvent, state: &mut PlayerState, engine: &mut PlaybackEngine) -> InputResult {
    // If help is showing, any key closes it
    if state.show_help {
        state.show_help = false;
        state.needs_render = true;
        return InputResult::Continue;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,

        // === Playback controls ===
        KeyCode::Char('r') => {
            // Bring the engine up to the current instant so the new run
            // starts now, not at the last tick
            engine.advance_to(state.engine_time());
            engine.replay();
            state.needs_render = true;
            InputResult::Continue
        }
        KeyCode::Char(' ') => {
            state.toggle_pause();
            InputResult::Continue
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.speed_up();
            InputResult::Continue
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            state.speed_down();
            InputResult::Continue
        }

        // === Toggles ===
        KeyCode::Char('m') => {
            let reduced = !engine.reduced_motion();
            engine.set_reduced_motion(reduced);
            tracing::info!(reduced_motion = reduced, "toggled reduced motion");
            state.needs_render = true;
            InputResult::Continue
        }
        KeyCode::Char('?') => {
            state.toggle_help();
            InputResult::Continue
        }

        _ => InputResult::Continue,
    }
}
