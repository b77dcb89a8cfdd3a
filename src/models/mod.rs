/*!
 * Model adapter layer for the two directional translation capabilities.
 *
 * This module defines the interface the pipeline drives models through,
 * allowing the neural backend to stay opaque and swappable:
 * - `TranslationModel`: one loaded seq2seq capability for one direction
 * - `ModelLoader`: the boundary to the external model store
 * - `ModelSet`: both directions, loaded once at process start
 * - `SerializedModel`: mutex wrapper for non-reentrant backends
 */

use async_trait::async_trait;
use log::info;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::DecodeConfig;
use crate::errors::ModelError;
use crate::language::Direction;

pub mod mock;

/// Common trait for loaded translation models
///
/// A model translates one bounded unit of text in one fixed direction.
/// Implementations carry no per-request state and must be safely shareable
/// across concurrent requests; backends that cannot serve concurrent calls
/// should be wrapped in [`SerializedModel`].
#[async_trait]
pub trait TranslationModel: Send + Sync + Debug {
    /// Translate one chunk of text
    ///
    /// # Arguments
    /// * `text` - The source text, bounded by the chunker
    /// * `decode` - Decoding parameters for this invocation
    ///
    /// # Returns
    /// * `Result<String, ModelError>` - The translated text or an error
    async fn translate(&self, text: &str, decode: &DecodeConfig) -> Result<String, ModelError>;

    /// Identifier of the underlying model, for diagnostics
    fn name(&self) -> &str;
}

/// Boundary to the external model store.
///
/// Downloading, file layout and weight formats are the store's concern;
/// the engine only asks for a ready-to-use capability per direction.
#[async_trait]
pub trait ModelLoader {
    /// Load the model serving the given direction
    async fn load(&self, direction: Direction) -> Result<Arc<dyn TranslationModel>, ModelError>;
}

/// Both directional models, loaded once for the process lifetime.
///
/// A `ModelSet` can only be observed fully loaded: construction fails if
/// either direction is unavailable, so no partial-availability window
/// exists. Models are treated as read-only after initialization.
#[derive(Debug, Clone)]
pub struct ModelSet {
    /// English → Arabic model
    en_ar: Arc<dyn TranslationModel>,

    /// Arabic → English model
    ar_en: Arc<dyn TranslationModel>,
}

impl ModelSet {
    /// Create a set from two already-loaded models
    pub fn new(en_ar: Arc<dyn TranslationModel>, ar_en: Arc<dyn TranslationModel>) -> Self {
        Self { en_ar, ar_en }
    }

    /// Load both directions from the model store.
    ///
    /// Fails with the first [`ModelError::LoadFailed`] encountered; callers
    /// are expected to abort process startup on error rather than serve
    /// with a single direction.
    pub async fn load<L: ModelLoader>(loader: &L) -> Result<Self, ModelError> {
        info!("Loading translation models...");

        let en_ar = loader.load(Direction::EnToAr).await?;
        info!("{} model loaded: {}", Direction::EnToAr, en_ar.name());

        let ar_en = loader.load(Direction::ArToEn).await?;
        info!("{} model loaded: {}", Direction::ArToEn, ar_en.name());

        Ok(Self::new(en_ar, ar_en))
    }

    /// The model serving the given direction
    pub fn model(&self, direction: Direction) -> &Arc<dyn TranslationModel> {
        match direction {
            Direction::EnToAr => &self.en_ar,
            Direction::ArToEn => &self.ar_en,
        }
    }

    /// Snapshot of the set for the health/status surface
    pub fn status(&self) -> ModelSetStatus {
        ModelSetStatus {
            both_loaded: true,
            directions: Direction::ALL
                .iter()
                .map(|&direction| DirectionStatus {
                    direction,
                    model: self.model(direction).name().to_string(),
                })
                .collect(),
        }
    }
}

/// Health snapshot of the loaded model set
#[derive(Debug, Clone, Serialize)]
pub struct ModelSetStatus {
    /// Whether both directions are available.
    /// Always true for an existing set; the field is part of the
    /// health boundary contract.
    pub both_loaded: bool,

    /// Per-direction model identifiers
    pub directions: Vec<DirectionStatus>,
}

/// Health entry for one direction
#[derive(Debug, Clone, Serialize)]
pub struct DirectionStatus {
    /// The direction served
    pub direction: Direction,

    /// Name of the loaded model
    pub model: String,
}

/// Wrapper serializing access to a model that is not safe for concurrent
/// invocation. Requests queue on the mutex; within one request chunks are
/// already translated sequentially.
#[derive(Debug)]
pub struct SerializedModel {
    inner: Arc<dyn TranslationModel>,
    lock: Mutex<()>,
}

impl SerializedModel {
    /// Wrap a model behind a per-instance mutex
    pub fn new(inner: Arc<dyn TranslationModel>) -> Self {
        Self {
            inner,
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl TranslationModel for SerializedModel {
    async fn translate(&self, text: &str, decode: &DecodeConfig) -> Result<String, ModelError> {
        let _guard = self.lock.lock().await;
        self.inner.translate(text, decode).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
