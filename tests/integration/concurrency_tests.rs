/*!
 * Cross-request concurrency tests for the worker pool
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use mutarjim::models::mock::{MockBehavior, MockModel};
use mutarjim::pipeline::WorkerPool;
use mutarjim::{Direction, EngineError, ModelSet, TranslationEngine, TranslationRequest};

use crate::common::working_engine;

fn slow_engine(delay_ms: u64) -> TranslationEngine {
    let models = ModelSet::new(
        Arc::new(MockModel::new(
            Direction::EnToAr,
            MockBehavior::Slow { delay_ms },
        )),
        Arc::new(MockModel::new(
            Direction::ArToEn,
            MockBehavior::Slow { delay_ms },
        )),
    );
    TranslationEngine::with_defaults(models)
}

fn simple_requests(count: usize) -> Vec<TranslationRequest> {
    (0..count)
        .map(|i| TranslationRequest {
            text: format!("Sentence number {} waits for translation.", i),
            direction: Direction::EnToAr,
        })
        .collect()
}

#[tokio::test]
async fn test_workerPool_mixedDirections_shouldServeBothModels() {
    let engine = Arc::new(working_engine());
    let pool = WorkerPool::new(engine, 4);

    let requests = vec![
        TranslationRequest {
            text: "English input heading to Arabic.".to_string(),
            direction: Direction::EnToAr,
        },
        TranslationRequest {
            text: "نص عربي متجه إلى الإنجليزية.".to_string(),
            direction: Direction::ArToEn,
        },
    ];
    let results = pool.run(requests, |_, _| {}).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().direction, Direction::EnToAr);
    assert_eq!(results[1].as_ref().unwrap().direction, Direction::ArToEn);
}

#[tokio::test]
async fn test_workerPool_concurrentSlowRequests_shouldOverlap() {
    // 6 requests at 30 ms each: serial execution would need ~180 ms,
    // 6 concurrent workers finish in roughly one model delay
    let pool = WorkerPool::new(Arc::new(slow_engine(30)), 6);
    let started = Instant::now();
    let results = pool.run(simple_requests(6), |_, _| {}).await;
    let elapsed = started.elapsed();

    assert!(results.iter().all(|r| r.is_ok()));
    assert!(
        elapsed.as_millis() < 150,
        "requests did not overlap: {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_workerPool_progress_shouldReachTotalExactlyOnce() {
    let finished = Arc::new(AtomicUsize::new(0));
    let finished_clone = finished.clone();
    let pool = WorkerPool::new(Arc::new(working_engine()), 3);

    pool.run(simple_requests(10), move |done, total| {
        if done == total {
            finished_clone.fetch_add(1, Ordering::SeqCst);
        }
    })
    .await;

    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_workerPool_inputFaults_shouldNotPoisonOtherRequests() {
    let pool = WorkerPool::new(Arc::new(working_engine()), 2);
    let mut requests = simple_requests(4);
    requests[0].text = "   ".to_string();
    requests[2].text = "x".repeat(6000);

    let results = pool.run(requests, |_, _| {}).await;

    assert!(matches!(results[0], Err(EngineError::EmptyInput)));
    assert!(results[1].is_ok());
    assert!(matches!(results[2], Err(EngineError::InputTooLong { .. })));
    assert!(results[3].is_ok());
}

#[tokio::test]
async fn test_engine_sharedAcrossTasks_shouldServeConcurrently() {
    let engine = Arc::new(working_engine());
    let mut handles = Vec::new();

    for i in 0..8 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine
                .translate(&format!("Task {} says hello.", i), Direction::EnToAr)
                .await
        }));
    }

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert!(response.success);
    }
}
