//! Interactive demo player
//!
//! Plays a [`DemoScript`](crate::DemoScript) in the terminal with ratatui.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `state`: PlayerState (pause, speed, wall-to-engine clock) and InputResult
//! - `input/`: Keyboard handling
//! - `render/`: Chat area, progress bar, status bar and help overlay
//! - `native`: Terminal setup and the main loop
//!
//! # Usage
//!
//! ```no_run
//! use chatreel::player::{play_demo, PlaybackResult, PlayerOptions};
//! use chatreel::theme::Theme;
//! use chatreel::DemoScript;
//!
//! let options = PlayerOptions { reduced_motion: false, speed: 1.0, theme: Theme::default() };
//! match play_demo(DemoScript::builtin(), options).unwrap() {
//!     PlaybackResult::Finished => println!("Demo finished"),
//!     PlaybackResult::Interrupted => println!("Stopped by user"),
//! }
//! ```

pub(crate) mod input;
mod native;
pub mod render;
pub mod state;

pub use native::{play_demo, PlaybackResult, PlayerOptions};
pub use state::{InputResult, PlayerState};
