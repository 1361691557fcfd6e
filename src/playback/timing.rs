//! Scripted delays for the demo sequence.
//!
//! Every delay is relative to the event that schedules it. Character delays
//! apply after the character has been revealed.

use std::time::Duration;

/// From `start()` to the user message appearing.
pub const USER_MESSAGE_DELAY: Duration = Duration::from_millis(500);
/// From the user message to the thinking checklist.
pub const THINKING_DELAY: Duration = Duration::from_millis(1000);
/// Spacing between thinking step completions.
pub const STEP_INTERVAL: Duration = Duration::from_millis(400);
/// From the last completed step to streaming.
pub const STREAMING_DELAY: Duration = Duration::from_millis(500);
/// From `complete` to the artifact card.
pub const ARTIFACT_DELAY: Duration = Duration::from_millis(300);

/// Pause after `.`, `!` or `?`.
pub const SENTENCE_END_DELAY: Duration = Duration::from_millis(80);
/// Pause after `,` or `:`.
pub const CLAUSE_DELAY: Duration = Duration::from_millis(40);
/// Pause after a newline.
pub const NEWLINE_DELAY: Duration = Duration::from_millis(60);
/// Pause after any other character.
pub const CHAR_DELAY: Duration = Duration::from_millis(10);

/// Delay before the character after `c` is revealed.
#[inline]
pub fn char_delay(c: char) -> Duration {
    match c {
        '.' | '!' | '?' => SENTENCE_END_DELAY,
        ',' | ':' => CLAUSE_DELAY,
        '\n' => NEWLINE_DELAY,
        _ => CHAR_DELAY,
    }
}

/// Offset of step `index` completing, measured from the start of `thinking`.
pub fn step_delay(index: usize) -> Duration {
    let n = u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX);
    STEP_INTERVAL.saturating_mul(n)
}

/// Total reveal time for a response.
pub fn streaming_duration(response: &str) -> Duration {
    response.chars().map(char_delay).sum()
}

/// Phase boundaries of one run, measured from `start()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    pub user_message: Duration,
    pub thinking: Duration,
    pub streaming: Duration,
    pub complete: Duration,
    pub artifact: Duration,
}

impl Timeline {
    /// Compute the scripted timeline for a run.
    ///
    /// # Arguments
    /// * `step_count` - Number of thinking steps
    /// * `response` - Full response text
    /// * `reduced_motion` - Whether streaming jumps straight to the final state
    pub fn compute(step_count: usize, response: &str, reduced_motion: bool) -> Self {
        let user_message = USER_MESSAGE_DELAY;
        let thinking = user_message + THINKING_DELAY;
        let last_step = if step_count == 0 {
            Duration::ZERO
        } else {
            step_delay(step_count - 1)
        };
        let streaming = thinking + last_step + STREAMING_DELAY;
        let (complete, artifact) = if reduced_motion {
            (streaming, streaming)
        } else {
            let complete = streaming + streaming_duration(response);
            (complete, complete + ARTIFACT_DELAY)
        };

        Self {
            user_message,
            thinking,
            streaming,
            complete,
            artifact,
        }
    }

    /// Total length of the run.
    pub fn total(&self) -> Duration {
        self.artifact
    }
}
