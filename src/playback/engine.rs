//! The playback engine.
//!
//! Owns one [`DemoState`], one [`Scheduler`] and the parsed script. Hosts
//! drive it by calling [`PlaybackEngine::advance_to`] with their clock and
//! read [`PlaybackEngine::view`] to draw.

use std::time::Duration;

use super::phase::DemoPhase;
use super::scheduler::Scheduler;
use super::state::{DemoState, PlaybackEvent, ReduceContext};
use super::timing::Timeline;
use super::view::DemoView;
use crate::script::{DemoScript, ResponseText};

/// Engine settings supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackOptions {
    /// Skip the character animation and artifact delay
    pub reduced_motion: bool,
}

/// Phase changes kept for hosts that never drain them; oldest go first.
const MAX_TRANSITIONS: usize = 64;

/// A phase transition and the engine time it happened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub at: Duration,
    pub phase: DemoPhase,
}

/// Scripted demo playback on a host-supplied clock.
#[derive(Debug)]
pub struct PlaybackEngine {
    script: DemoScript,
    response: ResponseText,
    reduced_motion: bool,
    state: DemoState,
    scheduler: Scheduler<PlaybackEvent>,
    run_started: Duration,
    runs: usize,
    transitions: Vec<PhaseChange>,
}

impl PlaybackEngine {
    /// Create an engine for `script`. Nothing happens until [`start`](Self::start).
    pub fn new(script: DemoScript, options: PlaybackOptions) -> Self {
        let response = ResponseText::parse(&script.response, &script.citations);
        Self {
            script,
            response,
            reduced_motion: options.reduced_motion,
            state: DemoState::Idle,
            scheduler: Scheduler::new(),
            run_started: Duration::ZERO,
            runs: 0,
            transitions: Vec::new(),
        }
    }

    pub fn phase(&self) -> DemoPhase {
        self.state.phase()
    }

    /// Current engine time.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Time since the current run started.
    pub fn run_elapsed(&self) -> Duration {
        self.now().saturating_sub(self.run_started)
    }

    /// Number of times the sequence has been started.
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Change the reduced-motion preference. Takes effect the next time
    /// streaming begins.
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
    }

    pub fn is_disposed(&self) -> bool {
        self.scheduler.is_disposed()
    }

    /// Scripted timeline of a run with the current settings.
    pub fn timeline(&self) -> Timeline {
        Timeline::compute(
            self.script.thinking_steps.len(),
            &self.script.response,
            self.reduced_motion,
        )
    }

    /// Reset to `idle` and schedule the sequence from the current time.
    ///
    /// Any previously scheduled step is cancelled first, so calling this
    /// twice replaces the first run rather than overlapping it.
    pub fn start(&mut self) {
        if self.is_disposed() {
            tracing::debug!("start ignored, engine disposed");
            return;
        }
        self.scheduler.cancel_all();
        self.state = DemoState::Idle;
        self.run_started = self.scheduler.now();
        self.runs += 1;
        self.record_phase();

        let (delay, event) = PlaybackEvent::FIRST;
        self.scheduler.schedule(delay, event);
        tracing::info!(run = self.runs, at = ?self.run_started, "demo started");
    }

    /// Cancel the current run, wherever it is, and start again.
    pub fn replay(&mut self) {
        if self.is_disposed() {
            tracing::debug!("replay ignored, engine disposed");
            return;
        }
        tracing::info!(phase = %self.phase(), "replaying demo");
        self.start();
    }

    /// Cancel everything and make the engine permanently inert.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.scheduler.dispose();
        tracing::info!(phase = %self.phase(), "demo disposed");
    }

    /// Due time of the next scheduled step, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// True when nothing is left to fire.
    pub fn is_settled(&self) -> bool {
        self.scheduler.pending() == 0
    }

    /// Fire every step due at or before `now`.
    ///
    /// Returns true if the state changed.
    pub fn advance_to(&mut self, now: Duration) -> bool {
        if self.is_disposed() {
            return false;
        }

        let mut changed = false;
        while let Some(event) = self.scheduler.pop_due(now) {
            let before = self.state.phase();
            let ctx = ReduceContext {
                thinking_steps: &self.script.thinking_steps,
                response: &self.script.response,
                reduced_motion: self.reduced_motion,
            };
            for follow_up in self.state.apply(event, &ctx) {
                self.scheduler.schedule(follow_up.delay, follow_up.event);
            }
            if self.state.phase() != before {
                self.record_phase();
            }
            changed = true;
        }
        self.scheduler.advance_clock(now);
        changed
    }

    /// Advance the clock by `delta`.
    pub fn advance_by(&mut self, delta: Duration) -> bool {
        self.advance_to(self.now().saturating_add(delta))
    }

    /// Fire every remaining step, moving the clock as far as needed.
    pub fn run_to_completion(&mut self) {
        while let Some(deadline) = self.next_deadline() {
            self.advance_to(deadline);
        }
    }

    /// Phase changes recorded since the last call, at most the latest
    /// `MAX_TRANSITIONS` of them.
    pub fn drain_transitions(&mut self) -> Vec<PhaseChange> {
        std::mem::take(&mut self.transitions)
    }

    /// The current frame.
    pub fn view(&self) -> DemoView<'_> {
        let revealed = self.state.revealed(self.response.len());
        DemoView {
            phase: self.phase(),
            status: self.phase().status_text(),
            elapsed: self.run_elapsed(),
            user_message: self
                .state
                .user_message_visible()
                .then_some(self.script.user_message.as_str()),
            steps: self.state.steps(),
            streamed_text: self.response.prefix(revealed),
            response: self.response.render(revealed, &self.script.citations),
            artifact: if self.state.artifact_visible() {
                self.script.artifact.as_ref()
            } else {
                None
            },
        }
    }

    fn record_phase(&mut self) {
        let change = PhaseChange {
            at: self.scheduler.now(),
            phase: self.state.phase(),
        };
        tracing::debug!(phase = %change.phase, at = ?change.at, "phase changed");
        if self.transitions.len() == MAX_TRANSITIONS {
            self.transitions.remove(0);
        }
        self.transitions.push(change);
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}
