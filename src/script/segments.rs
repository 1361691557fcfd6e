//! Citation marker segmentation.
//!
//! The response is split once, when a script is loaded, into literal text
//! and `[n]` markers that resolve to a citation record. Rendering a partially
//! revealed response then walks the segments up to the revealed byte offset
//! instead of rescanning the text on every character.

use std::ops::Range;

use super::Citation;

/// Find every `[<digits>]` marker in `text`.
///
/// Returns the byte range of each marker (brackets included) and its number.
/// Numbers that overflow `u32` are not markers.
pub fn find_markers(text: &str) -> Vec<(Range<usize>, u32)> {
    let bytes = text.as_bytes();
    let mut markers = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'[' {
            let digits_start = i + 1;
            let mut j = digits_start;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > digits_start && j < bytes.len() && bytes[j] == b']' {
                if let Ok(number) = text[digits_start..j].parse::<u32>() {
                    markers.push((i..j + 1, number));
                    i = j + 1;
                    continue;
                }
            }
        }
        i += 1;
    }

    markers
}

/// One slice of the response text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, including markers with no citation record
    Text(Range<usize>),
    /// A marker resolved to `citations[index]`
    Citation { range: Range<usize>, index: usize },
}

impl Segment {
    fn range(&self) -> &Range<usize> {
        match self {
            Segment::Text(range) | Segment::Citation { range, .. } => range,
        }
    }
}

/// A renderable piece of a (possibly partial) response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsePiece<'a> {
    Text(&'a str),
    Citation {
        /// The marker as written, e.g. `"[2]"`
        marker: &'a str,
        citation: &'a Citation,
    },
}

/// Response text with its citation markers resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseText {
    text: String,
    segments: Vec<Segment>,
}

impl ResponseText {
    /// Segment `text` against the available citation records.
    pub fn parse(text: &str, citations: &[Citation]) -> Self {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for (range, number) in find_markers(text) {
            let Some(index) = citations.iter().position(|c| c.number == number) else {
                continue;
            };
            if range.start > cursor {
                segments.push(Segment::Text(cursor..range.start));
            }
            cursor = range.end;
            segments.push(Segment::Citation { range, index });
        }
        if cursor < text.len() {
            segments.push(Segment::Text(cursor..text.len()));
        }

        Self {
            text: text.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The first `revealed` bytes, clamped down to a character boundary.
    pub fn prefix(&self, revealed: usize) -> &str {
        &self.text[..self.clamp(revealed)]
    }

    /// Render the first `revealed` bytes.
    ///
    /// A marker becomes a citation piece only once it is fully revealed; a
    /// partially revealed marker is literal text. Adjacent text is merged.
    pub fn render<'a>(&'a self, revealed: usize, citations: &'a [Citation]) -> Vec<ResponsePiece<'a>> {
        let limit = self.clamp(revealed);
        let mut pieces = Vec::new();
        let mut run_start: Option<usize> = None;

        for segment in &self.segments {
            let range = segment.range();
            if range.start >= limit {
                break;
            }
            if let Segment::Citation { range, index } = segment {
                if range.end <= limit {
                    if let Some(citation) = citations.get(*index) {
                        if let Some(start) = run_start.take() {
                            pieces.push(ResponsePiece::Text(&self.text[start..range.start]));
                        }
                        pieces.push(ResponsePiece::Citation {
                            marker: &self.text[range.clone()],
                            citation,
                        });
                        continue;
                    }
                }
            }
            run_start.get_or_insert(range.start);
        }

        if let Some(start) = run_start {
            pieces.push(ResponsePiece::Text(&self.text[start..limit]));
        }
        pieces
    }

    fn clamp(&self, revealed: usize) -> usize {
        let mut limit = revealed.min(self.text.len());
        while !self.text.is_char_boundary(limit) {
            limit -= 1;
        }
        limit
    }
}
