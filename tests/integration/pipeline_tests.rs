/*!
 * End-to-end pipeline tests driving the engine with mock models
 */

use mutarjim::models::mock::MockBehavior;
use mutarjim::pipeline::Document;
use mutarjim::{Direction, EngineConfig, EngineError};

use crate::common::{
    ARABIC_PASSAGE, ENGLISH_ARTICLE, engine_with_behavior, init_logging, working_engine,
    working_engine_with_config,
};

#[tokio::test]
async fn test_pipeline_twoParagraphScenario_shouldMatchContract() {
    init_logging();
    let response = working_engine()
        .translate("Hello world.\n\nThis is a test.", Direction::EnToAr)
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.paragraphs_processed, 2);
    assert_eq!(response.chunks_processed, 2);
    assert!(response.formatting_preserved);
    assert!(response.complete_translation);
    assert!(!response.mixed_languages);
    assert_eq!(response.original_text, "Hello world.\n\nThis is a test.");
    assert_eq!(response.direction, Direction::EnToAr);
}

#[tokio::test]
async fn test_pipeline_oversizedInput_shouldFailBeforeChunking() {
    let text = "Hello world. ".repeat(400);
    assert!(text.chars().count() > 5000);
    let result = working_engine().translate(&text, Direction::EnToAr).await;
    assert!(matches!(result, Err(EngineError::InputTooLong { .. })));
}

#[tokio::test]
async fn test_pipeline_blankLinePattern_shouldSurviveTranslation() {
    let raw = "First block here.\n\n\nSecond block here.\n\nThird block here.";
    let response = working_engine()
        .translate(raw, Direction::EnToAr)
        .await
        .unwrap();

    assert_eq!(response.paragraphs_processed, 3);
    assert!(response.formatting_preserved);
    // The exact separator widths survive: three newlines, then two
    let parts: Vec<&str> = response.translated_text.split("\n\n\n").collect();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[1].split("\n\n").count(), 2);
}

#[tokio::test]
async fn test_pipeline_alwaysEmptyModel_shouldDegradeGracefully() {
    init_logging();
    let engine = engine_with_behavior(MockBehavior::Empty);
    let response = engine
        .translate(ENGLISH_ARTICLE, Direction::EnToAr)
        .await
        .unwrap();

    // Never throws: success with degradation flags and fallback text
    assert!(response.success);
    assert!(!response.complete_translation);
    assert!(response.mixed_languages);
    assert!(!response.translated_text.trim().is_empty());
    assert_eq!(
        Document::count_paragraph_blocks(&response.translated_text),
        response.paragraphs_processed
    );
}

#[tokio::test]
async fn test_pipeline_failingModel_shouldDegradeNotError() {
    let engine = engine_with_behavior(MockBehavior::Failing);
    let response = engine
        .translate("Model failure should not abort this.", Direction::EnToAr)
        .await
        .unwrap();

    assert!(response.success);
    assert!(!response.complete_translation);
    assert!(!response.translated_text.trim().is_empty());
}

#[tokio::test]
async fn test_pipeline_echoModel_shouldFlagMixedLanguages() {
    let engine = engine_with_behavior(MockBehavior::Echo);
    let response = engine
        .translate(ENGLISH_ARTICLE, Direction::EnToAr)
        .await
        .unwrap();

    assert!(response.success);
    assert!(response.mixed_languages);
    assert!(!response.complete_translation);
}

#[tokio::test]
async fn test_pipeline_mixedScriptModel_shouldFlagButKeepBestAttempt() {
    let engine = engine_with_behavior(MockBehavior::MixedScript);
    let response = engine
        .translate(ENGLISH_ARTICLE, Direction::EnToAr)
        .await
        .unwrap();

    assert!(response.success);
    assert!(response.mixed_languages);
    assert!(!response.complete_translation);
    // The best attempt is kept rather than the source text
    assert_ne!(response.translated_text, response.original_text);
}

#[tokio::test]
async fn test_pipeline_repetitiveModel_shouldRejectAndFallBack() {
    let engine = engine_with_behavior(MockBehavior::Repetitive);
    let response = engine
        .translate(ENGLISH_ARTICLE, Direction::EnToAr)
        .await
        .unwrap();

    assert!(response.success);
    assert!(!response.complete_translation);
}

#[tokio::test]
async fn test_pipeline_arabicToEnglish_shouldProcessArabicInput() {
    let response = working_engine()
        .translate(ARABIC_PASSAGE, Direction::ArToEn)
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.paragraphs_processed, 2);
    assert!(response.complete_translation);
    assert!(!response.mixed_languages);
}

#[tokio::test]
async fn test_pipeline_singleLongSentence_shouldUseOneChunk() {
    let sentence = "word ".repeat(200).trim_end().to_string();
    let response = working_engine()
        .translate(&sentence, Direction::EnToAr)
        .await
        .unwrap();

    assert_eq!(response.paragraphs_processed, 1);
    assert_eq!(response.chunks_processed, 1);
}

#[tokio::test]
async fn test_pipeline_smallBudgetConfig_shouldProduceMoreChunks() {
    let mut config = EngineConfig::default();
    config.chunking.budget = 40;
    config.chunking.sentence_ceiling = 160;
    let engine = working_engine_with_config(config);

    let response = engine
        .translate(ENGLISH_ARTICLE, Direction::EnToAr)
        .await
        .unwrap();
    let baseline = working_engine()
        .translate(ENGLISH_ARTICLE, Direction::EnToAr)
        .await
        .unwrap();

    assert!(response.chunks_processed > baseline.chunks_processed);
    assert!(response.formatting_preserved);
}

#[tokio::test]
async fn test_pipeline_responseJson_shouldExposeContractFields() {
    let response = working_engine()
        .translate("Hello world.", Direction::EnToAr)
        .await
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();

    for field in [
        "original_text",
        "translated_text",
        "direction",
        "success",
        "paragraphs_processed",
        "chunks_processed",
        "formatting_preserved",
        "complete_translation",
        "mixed_languages",
    ] {
        assert!(json.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(json["direction"], "en-ar");
}

#[tokio::test]
async fn test_pipeline_engineStatus_shouldReportBothDirections() {
    let status = working_engine().status();
    assert!(status.both_loaded);
    assert_eq!(status.directions.len(), 2);
    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["both_loaded"], true);
}
