/*!
 * Mock translation models for tests and benchmarks.
 *
 * The mock simulates the behaviors the quality guard has to handle:
 * - `MockModel::working(direction)` - plausible target-script output
 * - `MockBehavior::Echo` - returns the source text unchanged
 * - `MockBehavior::Empty` - returns an empty string
 * - `MockBehavior::Repetitive` - returns a degenerate token loop
 * - `MockBehavior::MixedScript` - returns half source-, half target-script
 * - `MockBehavior::Failing` - always errors
 * - `MockBehavior::Slow` - delays before answering
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::DecodeConfig;
use crate::errors::ModelError;
use crate::language::Direction;
use crate::models::TranslationModel;

/// Arabic filler vocabulary for simulated EN→AR output
const ARABIC_WORDS: [&str; 10] = [
    "ترجمة", "نص", "جملة", "كلمة", "فقرة", "لغة", "كتاب", "معنى", "مثال", "سطر",
];

/// English filler vocabulary for simulated AR→EN output
const ENGLISH_WORDS: [&str; 10] = [
    "translation",
    "text",
    "sentence",
    "word",
    "paragraph",
    "language",
    "book",
    "meaning",
    "example",
    "line",
];

/// Behavior mode for the mock model
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Produces target-script filler text, one word per source token
    Working,
    /// Empty on even invocations, working output on odd ones; exercises
    /// the retry path
    FlakyFirstAttempt,
    /// Returns the source text unchanged (wrong-script output)
    Echo,
    /// Returns an empty string
    Empty,
    /// Returns one target-script word looped (runaway repetition)
    Repetitive,
    /// Returns alternating source-script and target-script words
    MixedScript,
    /// Always fails with an inference error
    Failing,
    /// Fails every Nth request
    Intermittent {
        /// Every n-th request fails
        fail_every: usize,
    },
    /// Simulates slow inference (for concurrency testing)
    Slow {
        /// Delay before answering
        delay_ms: u64,
    },
}

/// One recorded model invocation
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Source text passed to the model
    pub text: String,
    /// Decode parameters used for the invocation
    pub decode: DecodeConfig,
}

/// Mock model for exercising the pipeline without a neural backend
#[derive(Debug)]
pub struct MockModel {
    /// Direction this instance pretends to serve
    direction: Direction,
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures and retry-aware modes
    request_count: AtomicUsize,
    /// Every invocation, in order
    calls: Mutex<Vec<RecordedCall>>,
    /// Model identifier reported to diagnostics
    name: String,
}

impl MockModel {
    /// Create a new mock model with the specified behavior
    pub fn new(direction: Direction, behavior: MockBehavior) -> Self {
        Self {
            direction,
            behavior,
            request_count: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            name: format!("mock-{}", direction),
        }
    }

    /// Create a working mock that produces plausible target-script output
    pub fn working(direction: Direction) -> Self {
        Self::new(direction, MockBehavior::Working)
    }

    /// Create a mock that echoes the source (flagged as contaminated)
    pub fn echo(direction: Direction) -> Self {
        Self::new(direction, MockBehavior::Echo)
    }

    /// Create a mock that always returns empty output
    pub fn empty(direction: Direction) -> Self {
        Self::new(direction, MockBehavior::Empty)
    }

    /// Create a mock that produces degenerate repeated output
    pub fn repetitive(direction: Direction) -> Self {
        Self::new(direction, MockBehavior::Repetitive)
    }

    /// Create a mock that always fails
    pub fn failing(direction: Direction) -> Self {
        Self::new(direction, MockBehavior::Failing)
    }

    /// Create a mock that fails on the first attempt for each chunk but
    /// produces working output on retries (odd-numbered invocations).
    pub fn flaky_first_attempt(direction: Direction) -> Self {
        Self::new(direction, MockBehavior::FlakyFirstAttempt)
    }

    /// Number of invocations so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of every invocation, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Target-script filler output: one vocabulary word per source token.
    /// Tokens carry a numeric suffix so long outputs stay n-gram-diverse
    /// and never trip the repetition check.
    fn filler_output(&self, text: &str) -> String {
        let vocabulary = match self.direction {
            Direction::EnToAr => &ARABIC_WORDS,
            Direction::ArToEn => &ENGLISH_WORDS,
        };
        let token_count = text.split_whitespace().count().max(1);
        (0..token_count)
            .map(|i| format!("{}{}", vocabulary[i % vocabulary.len()], i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn degenerate_loop(&self) -> String {
        let word = match self.direction {
            Direction::EnToAr => ARABIC_WORDS[0],
            Direction::ArToEn => ENGLISH_WORDS[0],
        };
        std::iter::repeat(word).take(24).collect::<Vec<_>>().join(" ")
    }

    fn mixed_output(&self, text: &str) -> String {
        let token_count = text.split_whitespace().count().max(2);
        (0..token_count)
            .map(|i| {
                let wrong_script = i % 2 == 1;
                let word = match (self.direction, wrong_script) {
                    (Direction::EnToAr, false) | (Direction::ArToEn, true) => {
                        ARABIC_WORDS[i % ARABIC_WORDS.len()]
                    }
                    (Direction::EnToAr, true) | (Direction::ArToEn, false) => {
                        ENGLISH_WORDS[i % ENGLISH_WORDS.len()]
                    }
                };
                format!("{}{}", word, i)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl TranslationModel for MockModel {
    async fn translate(&self, text: &str, decode: &DecodeConfig) -> Result<String, ModelError> {
        let call_index = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().push(RecordedCall {
            text: text.to_string(),
            decode: decode.clone(),
        });

        match self.behavior {
            MockBehavior::Working => Ok(self.filler_output(text)),
            MockBehavior::FlakyFirstAttempt => {
                if call_index % 2 == 0 {
                    Ok(String::new())
                } else {
                    Ok(self.filler_output(text))
                }
            }
            MockBehavior::Echo => Ok(text.to_string()),
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Repetitive => Ok(self.degenerate_loop()),
            MockBehavior::MixedScript => Ok(self.mixed_output(text)),
            MockBehavior::Failing => {
                Err(ModelError::Inference("mock model failure".to_string()))
            }
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && (call_index + 1) % fail_every == 0 {
                    Err(ModelError::Inference(format!(
                        "mock intermittent failure on call {}",
                        call_index + 1
                    )))
                } else {
                    Ok(self.filler_output(text))
                }
            }
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self.filler_output(text))
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
