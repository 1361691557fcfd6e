//! Demo scripts.
//!
//! A script is the static input of a demo run: the user's question, the
//! canned response (with `[n]` citation markers), the thinking checklist,
//! citation records and an optional artifact card. Scripts are written in
//! TOML; [`DemoScript::builtin`] provides the default RAG comparison demo.

mod segments;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use segments::{find_markers, ResponsePiece, ResponseText, Segment};

/// Errors raised while loading or validating a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Script not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize script: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Script has an empty user message")]
    EmptyUserMessage,

    #[error("Duplicate citation number {0}")]
    DuplicateCitationNumber(u32),

    #[error("Duplicate citation id '{0}'")]
    DuplicateCitationId(String),
}

/// A source reference that response markers can point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub id: String,
    /// Number used by `[n]` markers in the response
    pub number: u32,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl Citation {
    /// Source with page suffix, e.g. `"Model card, p. 12"`.
    pub fn label(&self) -> String {
        match self.page {
            Some(page) => format!("{}, p. {}", self.source, page),
            None => self.source.clone(),
        }
    }
}

/// Supplementary result card revealed after the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub preview: String,
}

/// Static input for one demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoScript {
    pub user_message: String,
    pub response: String,
    #[serde(default)]
    pub thinking_steps: Vec<String>,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Artifact>,
}

impl Default for DemoScript {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DemoScript {
    /// The bundled demo: comparing two models for a RAG pipeline.
    pub fn builtin() -> Self {
        Self {
            user_message: "Compare Claude Sonnet 4 and GPT-4o for our RAG pipeline.".to_string(),
            response: concat!(
                "Here's how they compare across your connected sources.\n",
                "\n",
                "Coding: Claude Sonnet 4 scores 93.7% on HumanEval[1], ",
                "while GPT-4o reaches 90.2%[2] on the same benchmark.\n",
                "\n",
                "Context: Sonnet 4 accepts 200K tokens per request, ",
                "which fits your longest contracts without chunking[3].\n",
                "\n",
                "Recommendation: use Sonnet 4 for retrieval-heavy answers ",
                "and keep GPT-4o as a fallback for short, latency-sensitive queries."
            )
            .to_string(),
            thinking_steps: vec![
                "Searching 12 connected sources".to_string(),
                "Reading benchmark reports".to_string(),
                "Cross-referencing context limits".to_string(),
                "Drafting comparison".to_string(),
            ],
            citations: vec![
                Citation {
                    id: "cite-sonnet-card".to_string(),
                    number: 1,
                    source: "Claude Sonnet 4 model card".to_string(),
                    page: Some(12),
                    excerpt: Some("HumanEval pass@1: 93.7%".to_string()),
                },
                Citation {
                    id: "cite-gpt4o-report".to_string(),
                    number: 2,
                    source: "GPT-4o technical report".to_string(),
                    page: Some(4),
                    excerpt: Some("HumanEval: 90.2%".to_string()),
                },
                Citation {
                    id: "cite-contracts".to_string(),
                    number: 3,
                    source: "Legal contracts index".to_string(),
                    page: None,
                    excerpt: Some("Longest document: 148K tokens".to_string()),
                },
            ],
            artifact: Some(Artifact {
                kind: "document".to_string(),
                title: "Model comparison: Claude Sonnet 4 vs GPT-4o".to_string(),
                preview: "Side-by-side table of accuracy, context window, latency and cost."
                    .to_string(),
            }),
        }
    }

    /// Parse and validate a script from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ScriptError> {
        let script: DemoScript = toml::from_str(content)?;
        script.validate()?;
        Ok(script)
    }

    /// Load and validate a script file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        if !path.exists() {
            return Err(ScriptError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::from_toml_str(&content)?;
        for number in script.orphan_markers() {
            tracing::warn!(number, path = %path.display(), "citation marker has no record");
        }
        Ok(script)
    }

    /// Serialize as TOML.
    pub fn to_toml_string(&self) -> Result<String, ScriptError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check structural rules that playback relies on.
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.user_message.trim().is_empty() {
            return Err(ScriptError::EmptyUserMessage);
        }

        let mut numbers = HashSet::new();
        let mut ids = HashSet::new();
        for citation in &self.citations {
            if !numbers.insert(citation.number) {
                return Err(ScriptError::DuplicateCitationNumber(citation.number));
            }
            if !ids.insert(citation.id.as_str()) {
                return Err(ScriptError::DuplicateCitationId(citation.id.clone()));
            }
        }
        Ok(())
    }

    /// Look up a citation record by marker number.
    pub fn citation(&self, number: u32) -> Option<&Citation> {
        self.citations.iter().find(|c| c.number == number)
    }

    /// Marker numbers in the response with no citation record, in order of
    /// first appearance. These render as literal text.
    pub fn orphan_markers(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        find_markers(&self.response)
            .into_iter()
            .map(|(_, number)| number)
            .filter(|n| self.citation(*n).is_none() && seen.insert(*n))
            .collect()
    }

    /// Citation records never referenced by a marker.
    pub fn unused_citations(&self) -> Vec<&Citation> {
        let referenced: HashSet<u32> = find_markers(&self.response)
            .into_iter()
            .map(|(_, number)| number)
            .collect();
        self.citations
            .iter()
            .filter(|c| !referenced.contains(&c.number))
            .collect()
    }
}
