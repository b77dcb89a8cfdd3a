/*!
 * Orchestrator: the per-request state machine driving the full pipeline.
 *
 * One request runs `Received → Parsed → Chunked → Translating →
 * Reassembling → Completed`, or `→ Failed` on input faults. Chunk-level
 * quality problems never fail a request: the guard's retry/fallback policy
 * guarantees a response, with degradation reported through the
 * `complete_translation` and `mixed_languages` flags.
 */

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use crate::config::{DecodeConfig, EngineConfig};
use crate::errors::EngineError;
use crate::language::Direction;
use crate::models::{ModelSet, ModelSetStatus};
use crate::pipeline::chunker::{Chunk, chunk_document};
use crate::pipeline::document::Document;
use crate::pipeline::quality::{ChunkTranslation, QualityGuard, QualityIssue, Verdict};
use crate::pipeline::reassembly::reassemble;

/// Phases of one translation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    /// Request accepted, nothing parsed yet
    Received,
    /// Structure analysis finished
    Parsed,
    /// Chunking finished
    Chunked,
    /// Chunks are being translated
    Translating,
    /// Output is being stitched back together
    Reassembling,
    /// Response ready
    Completed,
    /// Aborted on an input fault
    Failed,
}

/// A translation request as received from the transport boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Raw input text
    pub text: String,

    /// Requested direction
    pub direction: Direction,
}

/// The response contract returned to the transport boundary
#[derive(Debug, Clone, Serialize)]
pub struct TranslationResponse {
    /// Request identifier for log correlation
    pub request_id: String,

    /// The input text as received
    pub original_text: String,

    /// The reassembled translation
    pub translated_text: String,

    /// Direction served
    pub direction: Direction,

    /// Always true for a returned response; failures are errors instead
    pub success: bool,

    /// Number of paragraphs in the parsed document
    pub paragraphs_processed: usize,

    /// Number of chunks driven through the model
    pub chunks_processed: usize,

    /// Whether the output kept the input's paragraph structure
    pub formatting_preserved: bool,

    /// False when any chunk ended in fallback
    pub complete_translation: bool,

    /// True when wrong-script content remains in the output
    pub mixed_languages: bool,

    /// Wall-clock processing time in milliseconds
    pub duration_ms: u64,
}

/// The translation engine: configuration, loaded models, quality guard.
///
/// Stateless across requests; one instance serves concurrent requests
/// through a shared reference.
#[derive(Debug, Clone)]
pub struct TranslationEngine {
    config: EngineConfig,
    models: ModelSet,
    guard: QualityGuard,
}

impl TranslationEngine {
    /// Create an engine, validating the configuration first
    pub fn new(config: EngineConfig, models: ModelSet) -> Result<Self, EngineError> {
        config
            .validate()
            .map_err(|e| EngineError::Config(e.to_string()))?;
        let guard = QualityGuard::new(config.quality.clone());
        Ok(Self {
            config,
            models,
            guard,
        })
    }

    /// Create an engine with default configuration
    pub fn with_defaults(models: ModelSet) -> Self {
        let config = EngineConfig::default();
        let guard = QualityGuard::new(config.quality.clone());
        Self {
            config,
            models,
            guard,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Health snapshot for the status boundary
    pub fn status(&self) -> ModelSetStatus {
        self.models.status()
    }

    /// Handle one request from the transport boundary
    pub async fn handle(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, EngineError> {
        self.translate(&request.text, request.direction).await
    }

    /// Translate `text` in the given direction through the full pipeline.
    ///
    /// Returns `Err` only for input faults ([`EngineError::InputTooLong`],
    /// [`EngineError::EmptyInput`]); degraded chunks surface as response
    /// flags, never as errors.
    pub async fn translate(
        &self,
        text: &str,
        direction: Direction,
    ) -> Result<TranslationResponse, EngineError> {
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        let mut phase = RequestPhase::Received;

        info!(
            "request {}: direction {}, {} chars",
            request_id,
            direction,
            text.chars().count()
        );

        let doc = match Document::parse(text, self.config.max_input_length) {
            Ok(doc) => doc,
            Err(e) => {
                self.advance(&request_id, &mut phase, RequestPhase::Failed);
                warn!("request {}: rejected: {}", request_id, e);
                return Err(e);
            }
        };
        self.advance(&request_id, &mut phase, RequestPhase::Parsed);

        let chunks = chunk_document(&doc, &self.config.chunking);
        self.advance(&request_id, &mut phase, RequestPhase::Chunked);

        self.advance(&request_id, &mut phase, RequestPhase::Translating);
        let mut translations = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            translations.push(self.translate_chunk(&request_id, chunk, direction).await);
        }

        self.advance(&request_id, &mut phase, RequestPhase::Reassembling);
        let translated_text = reassemble(&doc, &chunks, &translations);

        let complete_translation = translations
            .iter()
            .all(|t| t.verdict != Verdict::RejectedFallback);
        let mixed_languages = translations.iter().any(|t| t.contaminates_output());
        let formatting_preserved =
            Document::count_paragraph_blocks(&translated_text) == doc.paragraph_count();

        self.advance(&request_id, &mut phase, RequestPhase::Completed);
        let duration_ms = started.elapsed().as_millis() as u64;
        info!(
            "request {}: completed in {} ms ({} paragraphs, {} chunks, complete: {})",
            request_id,
            duration_ms,
            doc.paragraph_count(),
            chunks.len(),
            complete_translation
        );

        Ok(TranslationResponse {
            request_id,
            original_text: text.to_string(),
            translated_text,
            direction,
            success: true,
            paragraphs_processed: doc.paragraph_count(),
            chunks_processed: chunks.len(),
            formatting_preserved,
            complete_translation,
            mixed_languages,
            duration_ms,
        })
    }

    /// Translate one chunk under the guard's retry/fallback policy.
    ///
    /// Attempt order: pinned decode parameters, then up to
    /// `quality.max_retries` relaxed attempts. A model inference error
    /// counts as an empty attempt. When every attempt fails the checks,
    /// the best attempt is kept; when none produced text at all, the
    /// chunk's source text is carried through.
    async fn translate_chunk(
        &self,
        request_id: &str,
        chunk: &Chunk,
        direction: Direction,
    ) -> ChunkTranslation {
        let model = self.models.model(direction);
        let mut attempts: Vec<(String, DecodeConfig, Vec<QualityIssue>)> = Vec::new();

        let max_attempts = 1 + self.config.quality.max_retries;
        for attempt in 0..max_attempts {
            let decode = if attempt == 0 {
                self.config.decode.clone()
            } else {
                self.config.decode.relaxed()
            };

            let candidate = match model.translate(&chunk.text, &decode).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(
                        "request {}: chunk {}/{} inference error: {}",
                        request_id, chunk.paragraph_index, chunk.sentence_start, e
                    );
                    String::new()
                }
            };
            let issues = self.guard.assess(&chunk.text, &candidate, direction);

            if issues.is_empty() {
                let verdict = if attempt == 0 {
                    Verdict::Accepted
                } else {
                    debug!(
                        "request {}: chunk {}/{} recovered on retry {}",
                        request_id, chunk.paragraph_index, chunk.sentence_start, attempt
                    );
                    Verdict::Retried
                };
                return ChunkTranslation {
                    text: candidate,
                    verdict,
                    decode,
                    issues,
                    fell_back_to_source: false,
                };
            }

            debug!(
                "request {}: chunk {}/{} attempt {} flagged: [{}]",
                request_id,
                chunk.paragraph_index,
                chunk.sentence_start,
                attempt,
                issues
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            attempts.push((candidate, decode, issues));
        }

        // All attempts degenerate: keep the least-flagged one, first wins
        // ties, and fall back to the source text when nothing is usable.
        let (text, decode, issues) = attempts
            .into_iter()
            .min_by_key(|(_, _, issues)| issues.len())
            .expect("at least one attempt");

        let fell_back_to_source = text.trim().is_empty();
        let final_text = if fell_back_to_source {
            chunk.text.clone()
        } else {
            text
        };
        warn!(
            "request {}: chunk {}/{} degraded (source fallback: {})",
            request_id, chunk.paragraph_index, chunk.sentence_start, fell_back_to_source
        );

        ChunkTranslation {
            text: final_text,
            verdict: Verdict::RejectedFallback,
            decode,
            issues,
            fell_back_to_source,
        }
    }

    fn advance(&self, request_id: &str, phase: &mut RequestPhase, next: RequestPhase) {
        debug!("request {}: {:?} -> {:?}", request_id, *phase, next);
        *phase = next;
    }
}
