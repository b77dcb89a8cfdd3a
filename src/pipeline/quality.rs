/*!
 * Quality guard: degenerate-output detection for translated chunks.
 *
 * Three checks run in order on each candidate translation:
 * 1. Emptiness - whitespace-only output for a non-empty source
 * 2. Script contamination - too many wrong-script letters for the direction
 * 3. Runaway repetition - duplicate n-gram ratio above threshold
 *
 * The checks are heuristics, not proofs; every threshold is configurable
 * through [`QualityConfig`].
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{DecodeConfig, QualityConfig};
use crate::language::Direction;

/// Arabic-script letters, presentation forms included
static ARABIC_LETTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{0600}-\u{06FF}\u{0750}-\u{077F}\u{08A0}-\u{08FF}\u{FB50}-\u{FDFF}\u{FE70}-\u{FEFF}]")
        .unwrap()
});

/// Basic Latin letters
static LATIN_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]").unwrap());

/// A single defect found in a candidate translation
#[derive(Debug, Clone, PartialEq)]
pub enum QualityIssue {
    /// Output empty or whitespace-only while the source was not
    EmptyOutput,

    /// Too many wrong-script letters for the requested direction
    MixedLanguage {
        /// Observed fraction of wrong-script letters
        foreign_ratio: f32,
    },

    /// Output dominated by repeated n-grams (looping/truncated decode)
    RunawayRepetition {
        /// Observed fraction of duplicate n-grams
        repeated_ratio: f32,
    },
}

impl std::fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyOutput => write!(f, "empty_output"),
            Self::MixedLanguage { foreign_ratio } => {
                write!(f, "mixed_language({:.2})", foreign_ratio)
            }
            Self::RunawayRepetition { repeated_ratio } => {
                write!(f, "runaway_repetition({:.2})", repeated_ratio)
            }
        }
    }
}

/// Final disposition of one chunk after the retry policy ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// First attempt passed every check
    Accepted,

    /// A retry with relaxed decoding passed
    Retried,

    /// All attempts failed; the best one (or the source text) was kept
    RejectedFallback,
}

/// Per-chunk translation outcome carried to reassembly and diagnostics
#[derive(Debug, Clone)]
pub struct ChunkTranslation {
    /// The text carried into the reassembled output
    pub text: String,

    /// Disposition after the retry policy
    pub verdict: Verdict,

    /// Decode parameters of the attempt that produced `text`
    pub decode: DecodeConfig,

    /// Issues observed on `text` (empty for accepted chunks)
    pub issues: Vec<QualityIssue>,

    /// True when no attempt was usable and the chunk's source text was
    /// carried through instead
    pub fell_back_to_source: bool,
}

impl ChunkTranslation {
    /// Whether this chunk leaves wrong-script content in the output
    pub fn contaminates_output(&self) -> bool {
        self.fell_back_to_source
            || self
                .issues
                .iter()
                .any(|i| matches!(i, QualityIssue::MixedLanguage { .. }))
    }
}

/// Inspects candidate translations for degenerate output
#[derive(Debug, Clone)]
pub struct QualityGuard {
    config: QualityConfig,
}

impl QualityGuard {
    /// Create a guard with the given thresholds
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Run all checks and return the issues found, in check order
    pub fn assess(
        &self,
        source: &str,
        candidate: &str,
        direction: Direction,
    ) -> Vec<QualityIssue> {
        let mut issues = Vec::new();

        if candidate.trim().is_empty() {
            if !source.trim().is_empty() {
                issues.push(QualityIssue::EmptyOutput);
            }
            // Nothing else to measure on empty output
            return issues;
        }

        if let Some(foreign_ratio) = self.script_contamination(candidate, direction) {
            issues.push(QualityIssue::MixedLanguage { foreign_ratio });
        }

        if let Some(repeated_ratio) = self.runaway_repetition(candidate) {
            issues.push(QualityIssue::RunawayRepetition { repeated_ratio });
        }

        issues
    }

    /// Whether the candidate passes every check
    pub fn is_acceptable(&self, source: &str, candidate: &str, direction: Direction) -> bool {
        self.assess(source, candidate, direction).is_empty()
    }

    /// Fraction of wrong-script letters among scripted letters, when above
    /// threshold. Returns None below the minimum sample size or threshold.
    fn script_contamination(&self, candidate: &str, direction: Direction) -> Option<f32> {
        let arabic = ARABIC_LETTER.find_iter(candidate).count();
        let latin = LATIN_LETTER.find_iter(candidate).count();
        let total = arabic + latin;
        if total < self.config.min_chars_for_script_check {
            return None;
        }

        let foreign = match direction {
            Direction::EnToAr => latin,
            Direction::ArToEn => arabic,
        };
        let ratio = foreign as f32 / total as f32;
        (ratio > self.config.mixed_language_threshold).then_some(ratio)
    }

    /// Fraction of duplicate n-grams, when above threshold. Returns None
    /// for outputs too short to measure or below threshold.
    fn runaway_repetition(&self, candidate: &str) -> Option<f32> {
        let tokens: Vec<&str> = candidate.split_whitespace().collect();
        let n = self.config.repetition_ngram;
        if tokens.len() < self.config.min_tokens_for_repetition_check || tokens.len() < n {
            return None;
        }

        let ngrams: Vec<&[&str]> = tokens.windows(n).collect();
        let distinct: std::collections::HashSet<&[&str]> = ngrams.iter().copied().collect();
        let ratio = 1.0 - distinct.len() as f32 / ngrams.len() as f32;
        (ratio > self.config.max_repeated_ngram_ratio).then_some(ratio)
    }
}
