/*!
 * Structure analysis: raw input text to a paragraph/sentence tree.
 *
 * Parsing is a pure function over the input. The produced `Document` owns a
 * normalized copy of the text plus the blank-line metadata needed to put
 * translated paragraphs back exactly where the source had them.
 *
 * Normalization folds whitespace runs inside a line into single spaces and
 * intra-paragraph line breaks into spaces; runs of two or more newlines are
 * paragraph separators and their lengths are preserved.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::EngineError;

/// Sentence boundary: a run of Latin or Arabic sentence enders followed by
/// whitespace. Numbers like "3.5" never match (no whitespace after the dot).
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?؟۔…]+)\s+").unwrap());

/// Paragraph separator: a run of two or more newlines
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// A contiguous sentence span within the normalized document text
#[derive(Debug, Clone)]
pub struct Sentence {
    /// Sentence text, terminator included
    pub text: String,

    /// Byte offset of the sentence start in the normalized document text
    pub start: usize,

    /// Byte offset one past the sentence end
    pub end: usize,
}

impl Sentence {
    /// Length in characters, the unit the chunk budget is expressed in
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One paragraph: ordered sentences plus the newline run separating it
/// from the previous paragraph.
#[derive(Debug, Clone)]
pub struct Paragraph {
    /// Sentences in document order
    pub sentences: Vec<Sentence>,

    /// Length of the newline run before this paragraph (0 for the first);
    /// blank lines between paragraphs = separator_newlines - 1
    pub separator_newlines: usize,
}

impl Paragraph {
    /// The normalized paragraph text.
    /// Invariant: equals the sentences joined with single spaces.
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The parsed input: normalized text plus derived paragraph structure.
/// Immutable once parsed and owned by a single request.
#[derive(Debug, Clone)]
pub struct Document {
    /// Normalized input text; sentence offsets point into this string
    text: String,

    /// Paragraphs in document order
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Parse raw input into a structure tree.
    ///
    /// Fails with [`EngineError::InputTooLong`] when the raw input exceeds
    /// `max_input_length` characters and [`EngineError::EmptyInput`] when
    /// it is empty after trimming.
    pub fn parse(raw: &str, max_input_length: usize) -> Result<Self, EngineError> {
        let length = raw.chars().count();
        if length > max_input_length {
            return Err(EngineError::InputTooLong {
                length,
                max: max_input_length,
            });
        }
        if raw.trim().is_empty() {
            return Err(EngineError::EmptyInput);
        }

        let normalized = normalize(raw);
        let mut text = String::with_capacity(normalized.len());
        let mut paragraphs = Vec::new();
        let mut cursor = 0;

        for (separator_newlines, block) in split_paragraph_blocks(&normalized) {
            if !paragraphs.is_empty() {
                for _ in 0..separator_newlines {
                    text.push('\n');
                }
                cursor += separator_newlines;
            }
            let flat = block.replace('\n', " ");
            let sentences = split_sentences(&flat, cursor);
            text.push_str(&flat);
            cursor += flat.len();
            paragraphs.push(Paragraph {
                sentences,
                separator_newlines: if paragraphs.is_empty() {
                    0
                } else {
                    separator_newlines
                },
            });
        }

        debug!(
            "parsed document: {} paragraphs, {} sentences, {} chars",
            paragraphs.len(),
            paragraphs.iter().map(|p| p.sentences.len()).sum::<usize>(),
            length
        );

        Ok(Self { text, paragraphs })
    }

    /// The normalized document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of paragraphs
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Total number of sentences across all paragraphs
    pub fn sentence_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.sentences.len()).sum()
    }

    /// Count paragraph blocks in arbitrary text using the same separator
    /// rule the parser uses. Used to verify structure preservation on the
    /// reassembled output.
    pub fn count_paragraph_blocks(text: &str) -> usize {
        PARAGRAPH_BREAK
            .split(text.trim())
            .filter(|block| !block.trim().is_empty())
            .count()
    }
}

/// Collapse whitespace runs within lines to single spaces, turn
/// whitespace-only lines into empty lines, and trim the outer edges.
/// Blank-line structure survives so paragraph breaks stay detectable.
fn normalize(raw: &str) -> String {
    let cleaned: Vec<String> = raw
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.split_whitespace().collect::<Vec<_>>().join(" ")
            }
        })
        .collect();
    cleaned.join("\n").trim_matches('\n').to_string()
}

/// Split normalized text into (separator length, paragraph block) pairs.
/// The first block's separator length is 0 by construction.
fn split_paragraph_blocks(normalized: &str) -> Vec<(usize, &str)> {
    let mut blocks = Vec::new();
    let mut cursor = 0;
    let mut pending_separator = 0;

    for separator in PARAGRAPH_BREAK.find_iter(normalized) {
        let block = &normalized[cursor..separator.start()];
        if !block.is_empty() {
            blocks.push((pending_separator, block));
        }
        pending_separator = separator.as_str().len();
        cursor = separator.end();
    }
    let tail = &normalized[cursor..];
    if !tail.is_empty() {
        blocks.push((pending_separator, tail));
    }
    blocks
}

/// Split one flattened paragraph into sentences, keeping terminators
/// attached. `base_offset` is the paragraph's byte offset in the document
/// text, so sentence offsets are document-global.
fn split_sentences(paragraph: &str, base_offset: usize) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut cursor = 0;

    for caps in SENTENCE_BOUNDARY.captures_iter(paragraph) {
        let terminator = caps.get(1).expect("terminator group");
        let whole = caps.get(0).expect("whole match");
        let text = &paragraph[cursor..terminator.end()];
        if !text.trim().is_empty() {
            sentences.push(Sentence {
                text: text.to_string(),
                start: base_offset + cursor,
                end: base_offset + terminator.end(),
            });
        }
        cursor = whole.end();
    }

    let tail = &paragraph[cursor..];
    if !tail.trim().is_empty() {
        sentences.push(Sentence {
            text: tail.to_string(),
            start: base_offset + cursor,
            end: base_offset + paragraph.len(),
        });
    }
    sentences
}
