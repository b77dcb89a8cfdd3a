/*!
 * Chunking: grouping sentences into model-safe translation units.
 *
 * Chunks are transient, created and discarded within one request. The
 * grouping is greedy and paragraph-local: sentences accumulate while the
 * chunk stays within the character budget, and a chunk never mixes
 * sentences from two paragraphs.
 */

use log::debug;

use crate::config::ChunkConfig;
use crate::pipeline::document::Document;

/// An ordered group of sentences bound for one model invocation
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Index of the owning paragraph
    pub paragraph_index: usize,

    /// First sentence index within the paragraph
    pub sentence_start: usize,

    /// One past the last sentence index within the paragraph
    pub sentence_end: usize,

    /// Combined chunk text, sentences joined with single spaces
    pub text: String,

    /// True when this chunk starts mid-sentence because the sentence was
    /// force-split; reassembly joins it to the previous chunk without a
    /// separator.
    pub continues_sentence: bool,
}

impl Chunk {
    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Group a document's sentences into chunks under `config.budget`.
///
/// A single sentence longer than the budget becomes its own chunk; only
/// sentences longer than `config.sentence_ceiling` are force-split at
/// whitespace boundaries. Output order is document order.
pub fn chunk_document(doc: &Document, config: &ChunkConfig) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for (paragraph_index, paragraph) in doc.paragraphs.iter().enumerate() {
        let mut current: Option<Chunk> = None;

        for (sentence_index, sentence) in paragraph.sentences.iter().enumerate() {
            let sentence_len = sentence.char_len();

            if sentence_len > config.sentence_ceiling {
                // Oversized sentence: flush whatever accumulated, then emit
                // the forced pieces as standalone chunks.
                if let Some(chunk) = current.take() {
                    chunks.push(chunk);
                }
                for (piece_index, piece) in
                    force_split(&sentence.text, config.sentence_ceiling).into_iter().enumerate()
                {
                    chunks.push(Chunk {
                        paragraph_index,
                        sentence_start: sentence_index,
                        sentence_end: sentence_index + 1,
                        text: piece,
                        continues_sentence: piece_index > 0,
                    });
                }
                continue;
            }

            // Budget-inclusive: a sentence exactly filling the remaining
            // budget is taken. The joining space counts.
            let fits_current = current
                .as_ref()
                .is_some_and(|chunk| chunk.char_len() + 1 + sentence_len <= config.budget);

            if fits_current {
                let chunk = current.as_mut().expect("accumulating chunk");
                chunk.text.push(' ');
                chunk.text.push_str(&sentence.text);
                chunk.sentence_end = sentence_index + 1;
            } else {
                if let Some(chunk) = current.take() {
                    chunks.push(chunk);
                }
                current = Some(Chunk {
                    paragraph_index,
                    sentence_start: sentence_index,
                    sentence_end: sentence_index + 1,
                    text: sentence.text.clone(),
                    continues_sentence: false,
                });
            }

            // A single sentence above the budget (but under the ceiling)
            // stands alone; nothing may join it.
            if current.as_ref().is_some_and(|c| c.char_len() > config.budget) {
                chunks.push(current.take().unwrap());
            }
        }

        if let Some(chunk) = current.take() {
            chunks.push(chunk);
        }
    }

    debug!(
        "chunked document: {} chunks from {} sentences (budget {})",
        chunks.len(),
        doc.sentence_count(),
        config.budget
    );
    chunks
}

/// Split an oversized sentence into pieces of at most `ceiling` characters,
/// cutting at the last space inside the window, or hard-cutting when the
/// window has none.
fn force_split(text: &str, ceiling: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = text;

    while rest.chars().count() > ceiling {
        let window_end = rest
            .char_indices()
            .nth(ceiling)
            .map(|(byte, _)| byte)
            .unwrap_or(rest.len());
        match rest[..window_end].rfind(' ') {
            Some(space) if space > 0 => {
                pieces.push(rest[..space].to_string());
                rest = &rest[space + 1..];
            }
            _ => {
                pieces.push(rest[..window_end].to_string());
                rest = &rest[window_end..];
            }
        }
    }
    if !rest.is_empty() {
        pieces.push(rest.to_string());
    }
    pieces
}
