/*!
 * Tests for the quality guard heuristics and their tolerance bands
 */

use mutarjim::pipeline::{QualityGuard, QualityIssue};
use mutarjim::{Direction, QualityConfig};

const ARABIC_LONG: &str =
    "تقع المدينة القديمة على ضفاف النهر وتشتهر بأسواقها الضيقة ومبانيها الحجرية الجميلة";
const ENGLISH_LONG: &str =
    "The old city lies on the river bank and is famous for its narrow markets and stone buildings";

fn default_guard() -> QualityGuard {
    QualityGuard::new(QualityConfig::default())
}

fn guard_with(configure: impl FnOnce(&mut QualityConfig)) -> QualityGuard {
    let mut config = QualityConfig::default();
    configure(&mut config);
    QualityGuard::new(config)
}

#[test]
fn test_guard_cleanTranslations_shouldPassBothDirections() {
    let guard = default_guard();
    assert!(guard.is_acceptable(ENGLISH_LONG, ARABIC_LONG, Direction::EnToAr));
    assert!(guard.is_acceptable(ARABIC_LONG, ENGLISH_LONG, Direction::ArToEn));
}

#[test]
fn test_guard_wrongDirectionOutputs_shouldFlagBoth() {
    let guard = default_guard();
    assert!(!guard.is_acceptable(ENGLISH_LONG, ENGLISH_LONG, Direction::EnToAr));
    assert!(!guard.is_acceptable(ARABIC_LONG, ARABIC_LONG, Direction::ArToEn));
}

/// True-positive band: contamination well above the threshold is caught
/// for any threshold in a sensible range
#[test]
fn test_contamination_truePositiveBand_shouldFlagHalfForeignText() {
    let half_and_half = format!("{} {}", ARABIC_LONG, ENGLISH_LONG);
    for threshold in [0.05_f32, 0.15, 0.30] {
        let guard = guard_with(|c| c.mixed_language_threshold = threshold);
        let issues = guard.assess(ENGLISH_LONG, &half_and_half, Direction::EnToAr);
        assert!(
            issues
                .iter()
                .any(|i| matches!(i, QualityIssue::MixedLanguage { .. })),
            "threshold {} missed ~50% contamination",
            threshold
        );
    }
}

/// False-positive band: a trace of foreign script stays unflagged for
/// any threshold at or above the default
#[test]
fn test_contamination_falsePositiveBand_shouldTolerateTraceForeignText() {
    let trace = format!("{} {} ok", ARABIC_LONG, ARABIC_LONG);
    for threshold in [0.15_f32, 0.30] {
        let guard = guard_with(|c| c.mixed_language_threshold = threshold);
        let issues = guard.assess(ENGLISH_LONG, &trace, Direction::EnToAr);
        assert!(
            issues.is_empty(),
            "threshold {} false-flagged trace contamination: {:?}",
            threshold,
            issues
        );
    }
}

#[test]
fn test_repetition_loopedOutput_shouldFlagForDefaultConfig() {
    let guard = default_guard();
    let looped = format!("{} ", ARABIC_LONG.split(' ').next().unwrap()).repeat(16);
    let issues = guard.assess(ENGLISH_LONG, looped.trim(), Direction::EnToAr);
    assert!(
        issues
            .iter()
            .any(|i| matches!(i, QualityIssue::RunawayRepetition { .. }))
    );
}

#[test]
fn test_repetition_raisedThreshold_shouldTolerateLoops() {
    let guard = guard_with(|c| c.max_repeated_ngram_ratio = 0.99);
    let looped = "كلمة ".repeat(16);
    let issues = guard.assess(ENGLISH_LONG, looped.trim(), Direction::EnToAr);
    assert!(issues.is_empty(), "raised threshold still flagged: {:?}", issues);
}

#[test]
fn test_guard_checkOrder_emptinessShortCircuits() {
    let guard = default_guard();
    let issues = guard.assess(ENGLISH_LONG, "", Direction::EnToAr);
    assert_eq!(issues, vec![QualityIssue::EmptyOutput]);
}

#[test]
fn test_guard_numbersAndPunctuation_shouldNotCountAsLetters() {
    // Digits and punctuation carry no script signal
    let guard = default_guard();
    let candidate = format!("{} 1985 - 2024 (3.5%)", ARABIC_LONG);
    assert!(guard.is_acceptable(ENGLISH_LONG, &candidate, Direction::EnToAr));
}
