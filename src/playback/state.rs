//! Demo state and its reducer.
//!
//! The whole sequence is one tagged value. Scheduled events are fed to
//! [`DemoState::apply`], which moves to the next state and returns the
//! follow-up events to schedule. Events that do not belong to the current
//! state are ignored, so a state can never be half-updated.

use std::time::Duration;

use serde::Serialize;

use super::phase::DemoPhase;
use super::timing::{
    char_delay, step_delay, ARTIFACT_DELAY, STREAMING_DELAY, THINKING_DELAY, USER_MESSAGE_DELAY,
};

/// Scheduled events that drive the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    ShowUserMessage,
    BeginThinking,
    CompleteStep(usize),
    BeginStreaming,
    RevealNext,
    RevealArtifact,
}

impl PlaybackEvent {
    /// The event that opens a run, and its delay from `start()`.
    pub const FIRST: (Duration, PlaybackEvent) = (USER_MESSAGE_DELAY, PlaybackEvent::ShowUserMessage);
}

/// One item of the thinking checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThinkingStep {
    pub text: String,
    pub completed: bool,
}

impl ThinkingStep {
    pub fn pending(text: &str) -> Self {
        Self {
            text: text.to_string(),
            completed: false,
        }
    }
}

/// An event to schedule after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUp {
    pub delay: Duration,
    pub event: PlaybackEvent,
}

impl FollowUp {
    fn after(delay: Duration, event: PlaybackEvent) -> Self {
        Self { delay, event }
    }
}

/// Read-only inputs the reducer needs.
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
    pub thinking_steps: &'a [String],
    pub response: &'a str,
    /// Consulted only when streaming begins
    pub reduced_motion: bool,
}

/// The state of one demo run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DemoState {
    #[default]
    Idle,
    UserMessage,
    Thinking {
        steps: Vec<ThinkingStep>,
    },
    Streaming {
        steps: Vec<ThinkingStep>,
        /// Bytes of the response revealed so far (always a char boundary)
        revealed: usize,
        /// Reduced motion was on when streaming began
        instant: bool,
    },
    Complete {
        steps: Vec<ThinkingStep>,
        artifact_visible: bool,
    },
}

impl DemoState {
    pub fn phase(&self) -> DemoPhase {
        match self {
            DemoState::Idle => DemoPhase::Idle,
            DemoState::UserMessage => DemoPhase::UserMessage,
            DemoState::Thinking { .. } => DemoPhase::Thinking,
            DemoState::Streaming { .. } => DemoPhase::Streaming,
            DemoState::Complete { .. } => DemoPhase::Complete,
        }
    }

    /// Thinking checklist (empty before `thinking`).
    pub fn steps(&self) -> &[ThinkingStep] {
        match self {
            DemoState::Idle | DemoState::UserMessage => &[],
            DemoState::Thinking { steps }
            | DemoState::Streaming { steps, .. }
            | DemoState::Complete { steps, .. } => steps,
        }
    }

    /// Bytes of a response of `full_len` bytes that are visible.
    pub fn revealed(&self, full_len: usize) -> usize {
        match self {
            DemoState::Streaming { revealed, .. } => *revealed,
            DemoState::Complete { .. } => full_len,
            _ => 0,
        }
    }

    pub fn user_message_visible(&self) -> bool {
        self.phase() >= DemoPhase::UserMessage
    }

    pub fn artifact_visible(&self) -> bool {
        matches!(
            self,
            DemoState::Complete {
                artifact_visible: true,
                ..
            }
        )
    }

    /// Apply one scheduled event and return what to schedule next.
    pub fn apply(&mut self, event: PlaybackEvent, ctx: &ReduceContext<'_>) -> Vec<FollowUp> {
        match (std::mem::take(self), event) {
            (DemoState::Idle, PlaybackEvent::ShowUserMessage) => {
                *self = DemoState::UserMessage;
                vec![FollowUp::after(THINKING_DELAY, PlaybackEvent::BeginThinking)]
            }

            (DemoState::UserMessage, PlaybackEvent::BeginThinking) => {
                let steps: Vec<ThinkingStep> = ctx
                    .thinking_steps
                    .iter()
                    .map(|text| ThinkingStep::pending(text))
                    .collect();
                let follow_ups = if steps.is_empty() {
                    vec![FollowUp::after(STREAMING_DELAY, PlaybackEvent::BeginStreaming)]
                } else {
                    // One batch of independent timers, all measured from now
                    (0..steps.len())
                        .map(|i| FollowUp::after(step_delay(i), PlaybackEvent::CompleteStep(i)))
                        .collect()
                };
                *self = DemoState::Thinking { steps };
                follow_ups
            }

            (DemoState::Thinking { mut steps }, PlaybackEvent::CompleteStep(index))
                if index < steps.len() =>
            {
                steps[index].completed = true;
                let last = index + 1 == steps.len();
                *self = DemoState::Thinking { steps };
                if last {
                    vec![FollowUp::after(STREAMING_DELAY, PlaybackEvent::BeginStreaming)]
                } else {
                    Vec::new()
                }
            }

            (DemoState::Thinking { steps }, PlaybackEvent::BeginStreaming) => {
                let instant = ctx.reduced_motion;
                let revealed = if instant { ctx.response.len() } else { 0 };
                *self = DemoState::Streaming {
                    steps,
                    revealed,
                    instant,
                };
                vec![FollowUp::after(Duration::ZERO, PlaybackEvent::RevealNext)]
            }

            (
                DemoState::Streaming {
                    steps,
                    revealed,
                    instant,
                },
                PlaybackEvent::RevealNext,
            ) => match ctx.response.get(revealed..).and_then(|rest| rest.chars().next()) {
                Some(c) => {
                    *self = DemoState::Streaming {
                        steps,
                        revealed: revealed + c.len_utf8(),
                        instant,
                    };
                    vec![FollowUp::after(char_delay(c), PlaybackEvent::RevealNext)]
                }
                None => {
                    *self = DemoState::Complete {
                        steps,
                        artifact_visible: instant,
                    };
                    if instant {
                        Vec::new()
                    } else {
                        vec![FollowUp::after(ARTIFACT_DELAY, PlaybackEvent::RevealArtifact)]
                    }
                }
            },

            (DemoState::Complete { steps, .. }, PlaybackEvent::RevealArtifact) => {
                *self = DemoState::Complete {
                    steps,
                    artifact_visible: true,
                };
                Vec::new()
            }

            (state, event) => {
                tracing::debug!(?event, phase = %state.phase(), "ignoring out-of-sequence event");
                *self = state;
                Vec::new()
            }
        }
    }
}
