//! Host-facing output of the engine.
//!
//! [`DemoView`] borrows from the engine and is what renderers consume.
//! [`FrameReport`] is its owned, serializable form for headless output.

use std::fmt::Write as _;
use std::time::Duration;

use serde::Serialize;

use super::phase::DemoPhase;
use super::state::ThinkingStep;
use crate::script::{Artifact, Citation, ResponsePiece};

/// Everything a host needs to draw the current frame.
#[derive(Debug, Clone)]
pub struct DemoView<'a> {
    pub phase: DemoPhase,
    pub status: &'static str,
    /// Time since the current run started
    pub elapsed: Duration,
    pub user_message: Option<&'a str>,
    pub steps: &'a [ThinkingStep],
    /// Revealed prefix of the response, markers as written
    pub streamed_text: &'a str,
    /// Revealed prefix with citations substituted
    pub response: Vec<ResponsePiece<'a>>,
    pub artifact: Option<&'a Artifact>,
}

impl<'a> DemoView<'a> {
    pub fn is_complete(&self) -> bool {
        self.phase == DemoPhase::Complete
    }

    /// Citations shown so far, in order of first appearance.
    pub fn cited(&self) -> Vec<&'a Citation> {
        let mut cited: Vec<&'a Citation> = Vec::new();
        for piece in &self.response {
            if let ResponsePiece::Citation { citation, .. } = piece {
                if !cited.iter().any(|c| c.number == citation.number) {
                    cited.push(*citation);
                }
            }
        }
        cited
    }

    /// Owned snapshot for serialization.
    pub fn report(&self) -> FrameReport {
        FrameReport {
            phase: self.phase,
            status: self.status.to_string(),
            elapsed_ms: duration_ms(self.elapsed),
            user_message: self.user_message.map(str::to_string),
            thinking_steps: self.steps.to_vec(),
            streamed_text: self.streamed_text.to_string(),
            segments: self.response.iter().map(SegmentReport::from).collect(),
            artifact: self.artifact.cloned(),
        }
    }

    /// Plain-text rendering of the frame.
    ///
    /// Citations appear as `⟨n⟩` and are listed under "Sources".
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Status: {}", self.status);

        if let Some(message) = self.user_message {
            let _ = writeln!(out, "\nYou: {}", message);
        }

        if !self.steps.is_empty() {
            out.push_str("\nThinking:\n");
            for step in self.steps {
                let mark = if step.completed { '✓' } else { '○' };
                let _ = writeln!(out, "  {} {}", mark, step.text);
            }
        }

        if !self.response.is_empty() {
            out.push_str("\nAssistant:\n");
            for piece in &self.response {
                match piece {
                    ResponsePiece::Text(text) => out.push_str(text),
                    ResponsePiece::Citation { citation, .. } => {
                        let _ = write!(out, "⟨{}⟩", citation.number);
                    }
                }
            }
            out.push('\n');
        }

        let cited = self.cited();
        if !cited.is_empty() {
            out.push_str("\nSources:\n");
            for citation in cited {
                let _ = writeln!(out, "  ⟨{}⟩ {}", citation.number, citation.label());
            }
        }

        if let Some(artifact) = self.artifact {
            let _ = writeln!(out, "\nArtifact [{}] {}", artifact.kind, artifact.title);
            let _ = writeln!(out, "  {}", artifact.preview);
        }

        out
    }
}

/// Serializable frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub phase: DemoPhase,
    pub status: String,
    pub elapsed_ms: u64,
    pub user_message: Option<String>,
    pub thinking_steps: Vec<ThinkingStep>,
    pub streamed_text: String,
    pub segments: Vec<SegmentReport>,
    pub artifact: Option<Artifact>,
}

/// Serializable response piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentReport {
    Text {
        text: String,
    },
    Citation {
        number: u32,
        source: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
    },
}

impl From<&ResponsePiece<'_>> for SegmentReport {
    fn from(piece: &ResponsePiece<'_>) -> Self {
        match piece {
            ResponsePiece::Text(text) => SegmentReport::Text {
                text: text.to_string(),
            },
            ResponsePiece::Citation { citation, .. } => SegmentReport::Citation {
                number: citation.number,
                source: citation.source.clone(),
                page: citation.page,
            },
        }
    }
}

/// Whole milliseconds, saturating.
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
