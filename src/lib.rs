/*!
 * # mutarjim - Bilingual EN/AR Translation Engine
 *
 * A Rust library implementing the translation orchestration pipeline of an
 * offline English/Arabic translator.
 *
 * ## Features
 *
 * - Parse arbitrary text into a paragraph/sentence structure tree
 * - Group sentences into model-safe chunks under a character budget
 * - Drive a neural seq2seq capability over each chunk, one model per direction
 * - Reject degenerate output (mixed scripts, empty or truncated results,
 *   runaway repetition) with bounded retry and best-effort fallback
 * - Reassemble translated chunks while preserving paragraph spacing
 * - Configurable decoding parameters and quality thresholds
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `config`: Engine configuration (chunking, decoding, quality thresholds)
 * - `language`: Translation directions and ISO language resolution
 * - `models`: Model adapter seam over the two directional capabilities:
 *   - `models::mock`: Mock model for tests and benchmarks
 * - `pipeline`: The orchestration pipeline:
 *   - `pipeline::document`: Structure analysis (paragraphs, sentences)
 *   - `pipeline::chunker`: Budget-bounded sentence grouping
 *   - `pipeline::quality`: Degenerate-output detection and retry policy
 *   - `pipeline::reassembly`: Structure-preserving output stitching
 *   - `pipeline::orchestrator`: Per-request state machine and diagnostics
 *   - `pipeline::workers`: Bounded cross-request concurrency
 * - `errors`: Custom error types for the engine
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod config;
pub mod errors;
pub mod language;
pub mod models;
pub mod pipeline;

// Re-export main types for easier usage
pub use config::{ChunkConfig, DecodeConfig, EngineConfig, QualityConfig};
pub use errors::{EngineError, ModelError};
pub use language::Direction;
pub use models::{ModelLoader, ModelSet, ModelSetStatus, TranslationModel};
pub use pipeline::orchestrator::{TranslationEngine, TranslationRequest, TranslationResponse};
