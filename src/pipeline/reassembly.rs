/*!
 * Reassembly: stitching translated chunks back into document structure.
 *
 * Chunks arrive in document order keyed by paragraph index. Within one
 * paragraph chunks join with a single space, except across a forced
 * intra-sentence split where no separator is inserted. Paragraphs join
 * with the newline runs recorded at parse time, so vertical spacing is
 * restored exactly.
 */

use log::debug;

use crate::pipeline::chunker::Chunk;
use crate::pipeline::document::Document;
use crate::pipeline::quality::ChunkTranslation;

/// Reassemble translated chunk texts into the final output string.
///
/// `chunks` and `translations` are parallel slices in chunker order.
/// Invariant: the output has exactly one paragraph per input paragraph.
pub fn reassemble(doc: &Document, chunks: &[Chunk], translations: &[ChunkTranslation]) -> String {
    debug_assert_eq!(chunks.len(), translations.len());

    let mut paragraph_texts: Vec<String> = vec![String::new(); doc.paragraphs.len()];

    for (chunk, translation) in chunks.iter().zip(translations.iter()) {
        let target = &mut paragraph_texts[chunk.paragraph_index];
        let piece = translation.text.trim();
        if piece.is_empty() {
            continue;
        }
        if !target.is_empty() && !chunk.continues_sentence {
            target.push(' ');
        }
        target.push_str(piece);
    }

    let mut output = String::new();
    for (index, paragraph) in doc.paragraphs.iter().enumerate() {
        if index > 0 {
            for _ in 0..paragraph.separator_newlines {
                output.push('\n');
            }
        }
        output.push_str(&paragraph_texts[index]);
    }

    debug!(
        "reassembled {} chunks into {} paragraphs",
        chunks.len(),
        doc.paragraphs.len()
    );
    output
}
