/*!
 * Error types for the mutarjim engine.
 *
 * This module contains custom error types for the different failure classes
 * of the pipeline, using the thiserror crate for ergonomic error definitions.
 *
 * The taxonomy follows the engine's propagation policy: input faults abort a
 * request immediately, model load failures are fatal at startup, and
 * chunk-level quality problems never become errors at all (they surface as
 * response flags instead).
 */

use thiserror::Error;

use crate::language::Direction;

/// Errors raised by the translation models and their loader
#[derive(Error, Debug)]
pub enum ModelError {
    /// A directional model could not be loaded at startup.
    ///
    /// This is fatal: a bidirectional tool cannot serve traffic with only
    /// one direction available.
    #[error("failed to load {direction} model: {reason}")]
    LoadFailed {
        /// Direction whose model failed to load
        direction: Direction,
        /// Underlying loader message
        reason: String,
    },

    /// A loaded model failed while translating a chunk
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Errors returned to callers of the translation engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The input exceeds the configured maximum length
    #[error("input is {length} characters, maximum allowed is {max}")]
    InputTooLong {
        /// Character count of the rejected input
        length: usize,
        /// Configured limit
        max: usize,
    },

    /// The input is empty or whitespace-only
    #[error("no text provided")]
    EmptyInput,

    /// A model-level failure that could not be recovered per chunk
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Invalid engine configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    /// Whether the error is a client input fault (reported immediately,
    /// never retried) rather than an engine-side failure.
    pub fn is_input_fault(&self) -> bool {
        matches!(self, Self::InputTooLong { .. } | Self::EmptyInput)
    }
}
