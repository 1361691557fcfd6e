//! Chatreel - scripted chat demo player
//!
//! Replays a canned "AI conversation" (user message, thinking checklist,
//! character-by-character response with inline citations, trailing artifact
//! card) on a deterministic, cancellable timeline.
//!
//! - `script`: the static demo input and its TOML format
//! - `playback`: the playback engine (phases, timings, scheduler, reducer)
//! - `player`: interactive terminal host for the engine
//!
//! # Usage
//!
//! ```
//! use chatreel::playback::{DemoPhase, PlaybackEngine, PlaybackOptions};
//! use chatreel::DemoScript;
//!
//! let mut engine = PlaybackEngine::new(DemoScript::builtin(), PlaybackOptions::default());
//! engine.start();
//! engine.run_to_completion();
//! assert_eq!(engine.phase(), DemoPhase::Complete);
//! ```

pub mod cli;
pub mod config;
pub mod logging;
pub mod playback;
pub mod player;
pub mod script;
pub mod theme;

pub use config::Config;
pub use playback::{DemoPhase, PlaybackEngine, PlaybackOptions};
pub use script::{Artifact, Citation, DemoScript, ScriptError};
