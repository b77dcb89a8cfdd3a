/*!
 * The translation orchestration pipeline.
 *
 * Data flows raw text → structure analysis → chunking → per-chunk
 * translation under the quality guard → reassembly, driven by the
 * orchestrator. It is split into several submodules:
 *
 * - `document`: Structure analysis into paragraphs and sentences
 * - `chunker`: Budget-bounded grouping of sentences into chunks
 * - `quality`: Degenerate-output checks, verdicts and retry policy
 * - `reassembly`: Structure-preserving output stitching
 * - `orchestrator`: Per-request state machine and response assembly
 * - `workers`: Bounded concurrency across requests
 */

// Re-export main types for easier usage
pub use self::chunker::{Chunk, chunk_document};
pub use self::document::{Document, Paragraph, Sentence};
pub use self::orchestrator::{
    RequestPhase, TranslationEngine, TranslationRequest, TranslationResponse,
};
pub use self::quality::{ChunkTranslation, QualityGuard, QualityIssue, Verdict};
pub use self::reassembly::reassemble;
pub use self::workers::WorkerPool;

// Submodules
pub mod chunker;
pub mod document;
pub mod orchestrator;
pub mod quality;
pub mod reassembly;
pub mod workers;
