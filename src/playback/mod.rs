//! Scripted playback engine.
//!
//! - `phase`: the five demo phases and their status strings
//! - `timing`: scripted delays and timeline computation
//! - `scheduler`: cancellable timer queue on an explicit clock
//! - `state`: tagged-union state and its reducer
//! - `engine`: `PlaybackEngine`, the public entry point
//! - `view`: what hosts render
//! - `transcript`: headless runs on a virtual clock

mod engine;
mod phase;
pub mod scheduler;
mod state;
pub mod timing;
pub mod transcript;
mod view;

pub use engine::{PhaseChange, PlaybackEngine, PlaybackOptions};
pub use phase::DemoPhase;
pub use state::{DemoState, PlaybackEvent, ThinkingStep};
pub use timing::Timeline;
pub use transcript::{record, Transcript, TranscriptPlan};
pub use view::{duration_ms, DemoView, FrameReport, SegmentReport};
