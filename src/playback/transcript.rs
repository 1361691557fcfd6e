//! Headless playback on a virtual clock.
//!
//! Runs the engine without a terminal and captures the phase timeline and
//! the final frame, for the `transcript` command and for tests.

use std::fmt::Write as _;
use std::time::Duration;

use serde::Serialize;

use super::engine::{PhaseChange, PlaybackEngine, PlaybackOptions};
use super::phase::DemoPhase;
use super::view::{duration_ms, FrameReport};
use crate::script::DemoScript;

/// When to stop the virtual clock, and whether to replay on the way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscriptPlan {
    /// Stop at this engine time instead of running to the end
    pub stop_at: Option<Duration>,
    /// Trigger a replay at this engine time
    pub replay_at: Option<Duration>,
}

/// One line of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub at_ms: u64,
    pub phase: DemoPhase,
    pub status: &'static str,
}

impl From<PhaseChange> for TimelineEntry {
    fn from(change: PhaseChange) -> Self {
        Self {
            at_ms: duration_ms(change.at),
            phase: change.phase,
            status: change.phase.status_text(),
        }
    }
}

/// Captured headless run.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub timeline: Vec<TimelineEntry>,
    pub frame: FrameReport,
    #[serde(skip)]
    pub plain_frame: String,
}

impl Transcript {
    /// Human-readable timeline followed by the final frame.
    pub fn render_plain(&self) -> String {
        let mut out = String::from("Timeline\n");
        for entry in &self.timeline {
            let _ = writeln!(
                out,
                "{:>7}ms  {:<13} {}",
                entry.at_ms,
                entry.phase.as_str(),
                entry.status
            );
        }
        let _ = writeln!(out, "\nFrame @ {}ms", self.frame.elapsed_ms);
        out.push_str(&self.plain_frame);
        out
    }
}

/// Play `script` headlessly according to `plan`.
pub fn record(script: DemoScript, options: PlaybackOptions, plan: TranscriptPlan) -> Transcript {
    let mut engine = PlaybackEngine::new(script, options);
    engine.start();

    if let Some(at) = plan.replay_at {
        engine.advance_to(at);
        engine.replay();
    }

    match plan.stop_at {
        Some(at) => {
            engine.advance_to(at);
        }
        None => engine.run_to_completion(),
    }

    let timeline = engine
        .drain_transitions()
        .into_iter()
        .map(TimelineEntry::from)
        .collect();
    let view = engine.view();

    Transcript {
        timeline,
        frame: view.report(),
        plain_frame: view.render_plain(),
    }
}
