//! Input handling for the player.
//!
//! Dispatches terminal events to the appropriate handler and returns
//! control flow signals to the main loop.

mod keyboard;

pub use keyboard::handle_key_event;

use crossterm::event::{Event, KeyEventKind};

use crate::playback::PlaybackEngine;
use crate::player::state::{InputResult, PlayerState};

/// Handle any input event, dispatching to the appropriate handler.
///
/// # Arguments
/// * `event` - The crossterm event to handle
/// * `state` - Mutable reference to player state
/// * `engine` - The playback engine (for replay and reduced motion)
pub fn handle_event(event: Event, state: &mut PlayerState, engine: &mut PlaybackEngine) -> InputResult {
    match event {
        // Ignore key release/repeat reports (sent on some platforms)
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key, state, engine),
        Event::Resize(_, _) => {
            state.needs_render = true;
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore focus, mouse, paste events
    }
}
