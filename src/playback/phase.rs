//! Demo phases.
//!
//! The sequence is strictly linear: `idle → user-message → thinking →
//! streaming → complete`. Only a replay goes back to `idle`.

use std::fmt;

use serde::Serialize;

/// Current stage of the scripted demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemoPhase {
    /// Waiting for the first scheduled transition
    #[default]
    Idle,
    /// The user's question is visible
    UserMessage,
    /// The thinking checklist is completing step by step
    Thinking,
    /// The response is being revealed character by character
    Streaming,
    /// The full response is visible
    Complete,
}

impl DemoPhase {
    /// All phases in playback order.
    pub const ALL: [DemoPhase; 5] = [
        DemoPhase::Idle,
        DemoPhase::UserMessage,
        DemoPhase::Thinking,
        DemoPhase::Streaming,
        DemoPhase::Complete,
    ];

    /// Kebab-case name, as used in transcripts and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            DemoPhase::Idle => "idle",
            DemoPhase::UserMessage => "user-message",
            DemoPhase::Thinking => "thinking",
            DemoPhase::Streaming => "streaming",
            DemoPhase::Complete => "complete",
        }
    }

    /// Status line shown by hosts for this phase.
    pub fn status_text(self) -> &'static str {
        match self {
            DemoPhase::Idle => "Starting demo…",
            DemoPhase::UserMessage => "User query",
            DemoPhase::Thinking => "Analyzing sources…",
            DemoPhase::Streaming => "Generating response…",
            DemoPhase::Complete => "Response complete",
        }
    }
}

impl fmt::Display for DemoPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
