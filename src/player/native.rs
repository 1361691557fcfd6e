//! Interactive terminal player.
//!
//! Owns the terminal for the duration of the demo and drives the engine
//! from the wall clock, scaled by the current speed.

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::playback::{duration_ms, PlaybackEngine, PlaybackOptions};
use crate::script::DemoScript;
use crate::theme::Theme;

use super::input::handle_event;
use super::render;
use super::state::{InputResult, PlayerState};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Player settings, already merged from config and flags.
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    pub reduced_motion: bool,
    pub speed: f64,
    pub theme: Theme,
}

/// How a playback session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// The user quit after the demo completed
    Finished,
    /// The user quit before the demo completed
    Interrupted,
}

/// Play `script` in the terminal until the user quits.
///
/// The terminal is restored and the engine disposed on every exit path,
/// including errors from the draw loop.
#[cfg(not(tarpaulin_include))]
pub fn play_demo(script: DemoScript, options: PlayerOptions) -> Result<PlaybackResult> {
    let mut engine = PlaybackEngine::new(
        script,
        PlaybackOptions {
            reduced_motion: options.reduced_motion,
        },
    );
    let mut state = PlayerState::new(options.speed);

    let mut terminal = init_terminal().context("Failed to initialize terminal")?;
    let result = run_loop(&mut terminal, &mut engine, &mut state, &options.theme);
    engine.dispose();
    let restored = restore_terminal(&mut terminal).context("Failed to restore terminal");

    let result = result?;
    restored?;
    Ok(result)
}

#[cfg(not(tarpaulin_include))]
fn init_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

#[cfg(not(tarpaulin_include))]
fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

#[cfg(not(tarpaulin_include))]
fn run_loop(
    terminal: &mut Term,
    engine: &mut PlaybackEngine,
    state: &mut PlayerState,
    theme: &Theme,
) -> Result<PlaybackResult> {
    engine.start();

    loop {
        if engine.advance_to(state.engine_time()) {
            state.needs_render = true;
        }
        for change in engine.drain_transitions() {
            tracing::info!(phase = %change.phase, at_ms = duration_ms(change.at), "phase");
        }

        // The progress bar and typing dots move with the clock
        if state.needs_render || !state.paused {
            terminal.draw(|frame| render::draw(frame, engine, state, theme))?;
            state.needs_render = false;
        }

        let timeout = state.poll_timeout(engine.now(), engine.next_deadline());
        if event::poll(timeout)? && handle_event(event::read()?, state, engine) == InputResult::Quit {
            let result = if engine.view().is_complete() {
                PlaybackResult::Finished
            } else {
                PlaybackResult::Interrupted
            };
            tracing::info!(?result, runs = engine.runs(), "player exiting");
            return Ok(result);
        }
    }
}
