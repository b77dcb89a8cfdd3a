use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration module
/// This module handles the engine configuration including loading,
/// validating and saving configuration settings.
/// Represents the full engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    /// Maximum accepted input length in characters
    #[serde(default = "default_max_input_length")]
    pub max_input_length: usize,

    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkConfig,

    /// Decoding configuration applied to every chunk
    #[serde(default)]
    pub decode: DecodeConfig,

    /// Quality guard configuration
    #[serde(default)]
    pub quality: QualityConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_input_length: default_max_input_length(),
            chunking: ChunkConfig::default(),
            decode: DecodeConfig::default(),
            quality: QualityConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Self =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.max_input_length == 0 {
            return Err(anyhow!("max_input_length must be greater than zero"));
        }
        if self.chunking.budget == 0 {
            return Err(anyhow!("chunk budget must be greater than zero"));
        }
        if self.chunking.sentence_ceiling < self.chunking.budget {
            return Err(anyhow!(
                "sentence_ceiling ({}) must be at least the chunk budget ({})",
                self.chunking.sentence_ceiling,
                self.chunking.budget
            ));
        }
        if self.decode.beam_count == 0 {
            return Err(anyhow!("beam_count must be greater than zero"));
        }
        if !(0.0..=1.0).contains(&self.quality.mixed_language_threshold) {
            return Err(anyhow!(
                "mixed_language_threshold must be within 0.0..=1.0, got {}",
                self.quality.mixed_language_threshold
            ));
        }
        if !(0.0..=1.0).contains(&self.quality.max_repeated_ngram_ratio) {
            return Err(anyhow!(
                "max_repeated_ngram_ratio must be within 0.0..=1.0, got {}",
                self.quality.max_repeated_ngram_ratio
            ));
        }
        if self.quality.repetition_ngram == 0 {
            return Err(anyhow!("repetition_ngram must be greater than zero"));
        }
        Ok(())
    }
}

/// Chunking configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChunkConfig {
    /// Maximum characters per chunk
    #[serde(default = "default_chunk_budget")]
    pub budget: usize,

    /// Hard per-sentence ceiling; sentences above this are force-split
    /// at a whitespace boundary. Always at least the chunk budget.
    #[serde(default = "default_sentence_ceiling")]
    pub sentence_ceiling: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            budget: default_chunk_budget(),
            sentence_ceiling: default_sentence_ceiling(),
        }
    }
}

/// Decoding parameters for one model invocation.
///
/// Defaults match the pinned generation settings of the production models.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DecodeConfig {
    /// Number of beams for beam search
    #[serde(default = "default_beam_count")]
    pub beam_count: u32,

    /// Length penalty applied during decoding
    #[serde(default = "default_length_penalty")]
    pub length_penalty: f32,

    /// Repetition penalty applied during decoding
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: f32,

    /// N-gram size blocked from repeating during generation
    #[serde(default = "default_no_repeat_ngram")]
    pub no_repeat_ngram: usize,

    /// Hard cap on generated sequence length
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Sampling temperature; None means deterministic decoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            beam_count: default_beam_count(),
            length_penalty: default_length_penalty(),
            repetition_penalty: default_repetition_penalty(),
            no_repeat_ngram: default_no_repeat_ngram(),
            max_length: default_max_length(),
            temperature: None,
        }
    }
}

impl DecodeConfig {
    /// Relaxed parameters used for the single quality retry: fewer beams
    /// and sampling enabled, trading determinism for a different candidate.
    pub fn relaxed(&self) -> Self {
        Self {
            beam_count: default_retry_beam_count(),
            temperature: Some(default_retry_temperature()),
            ..self.clone()
        }
    }

    /// Upper bound on generated output length for the given input length.
    /// The cap is proportional to the input but never exceeds `max_length`.
    pub fn max_output_len(&self, input_chars: usize) -> usize {
        (input_chars * 2).clamp(16, self.max_length.max(16))
    }

    /// Whether sampling is enabled
    pub fn is_sampling(&self) -> bool {
        self.temperature.is_some()
    }
}

/// Quality guard configuration.
///
/// The contamination and repetition heuristics are approximations, so every
/// threshold is tunable rather than hard-coded.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QualityConfig {
    /// Maximum tolerated fraction of wrong-script letters in a translation
    #[serde(default = "default_mixed_language_threshold")]
    pub mixed_language_threshold: f32,

    /// Minimum letter count before the script check applies
    #[serde(default = "default_min_chars_for_script_check")]
    pub min_chars_for_script_check: usize,

    /// N-gram size used for the repetition check
    #[serde(default = "default_repetition_ngram")]
    pub repetition_ngram: usize,

    /// Maximum tolerated fraction of duplicate n-grams
    #[serde(default = "default_max_repeated_ngram_ratio")]
    pub max_repeated_ngram_ratio: f32,

    /// Minimum token count before the repetition check applies
    #[serde(default = "default_min_tokens_for_repetition_check")]
    pub min_tokens_for_repetition_check: usize,

    /// Number of retries for a chunk that fails the quality checks
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            mixed_language_threshold: default_mixed_language_threshold(),
            min_chars_for_script_check: default_min_chars_for_script_check(),
            repetition_ngram: default_repetition_ngram(),
            max_repeated_ngram_ratio: default_max_repeated_ngram_ratio(),
            min_tokens_for_repetition_check: default_min_tokens_for_repetition_check(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_max_input_length() -> usize {
    5000
}

fn default_chunk_budget() -> usize {
    300
}

fn default_sentence_ceiling() -> usize {
    1200
}

fn default_beam_count() -> u32 {
    5
}

fn default_length_penalty() -> f32 {
    1.2
}

fn default_repetition_penalty() -> f32 {
    1.1
}

fn default_no_repeat_ngram() -> usize {
    3
}

fn default_max_length() -> usize {
    512
}

fn default_retry_beam_count() -> u32 {
    3
}

fn default_retry_temperature() -> f32 {
    0.7
}

fn default_mixed_language_threshold() -> f32 {
    0.15
}

fn default_min_chars_for_script_check() -> usize {
    20
}

fn default_repetition_ngram() -> usize {
    3
}

fn default_max_repeated_ngram_ratio() -> f32 {
    0.5
}

fn default_min_tokens_for_repetition_check() -> usize {
    8
}

fn default_max_retries() -> u32 {
    1
}
