/*!
 * Bounded cross-request concurrency.
 *
 * One request is always processed end-to-end by a single logical worker;
 * this module runs many such workers over a shared engine, capped by a
 * semaphore. Results come back in submission order regardless of
 * completion order.
 */

use futures::stream::{self, StreamExt};
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

use crate::errors::EngineError;
use crate::pipeline::orchestrator::{TranslationEngine, TranslationRequest, TranslationResponse};

/// Worker pool processing translation requests concurrently
pub struct WorkerPool {
    /// Shared engine; models inside are read-only after load
    engine: Arc<TranslationEngine>,

    /// Maximum number of requests in flight
    max_concurrent_requests: usize,
}

impl WorkerPool {
    /// Create a pool over a shared engine
    pub fn new(engine: Arc<TranslationEngine>, max_concurrent_requests: usize) -> Self {
        Self {
            engine,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Process all requests, at most `max_concurrent_requests` at a time.
    ///
    /// The returned vector is in submission order. The progress callback
    /// receives (completed, total) after each request finishes.
    pub async fn run(
        &self,
        requests: Vec<TranslationRequest>,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Vec<Result<TranslationResponse, EngineError>> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_requests));
        let total = requests.len();
        let completed = Arc::new(AtomicUsize::new(0));

        let mut results: Vec<(usize, Result<TranslationResponse, EngineError>)> =
            stream::iter(requests.into_iter().enumerate())
                .map(|(index, request)| {
                    let engine = self.engine.clone();
                    let semaphore = semaphore.clone();
                    let completed = completed.clone();
                    let progress_callback = progress_callback.clone();

                    async move {
                        let _permit = semaphore.acquire().await.expect("semaphore open");
                        debug!("worker picked up request {} of {}", index + 1, total);

                        let result = engine.handle(&request).await;

                        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                        progress_callback(done, total);
                        (index, result)
                    }
                })
                .buffer_unordered(self.max_concurrent_requests)
                .collect()
                .await;

        // Restore submission order
        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }
}
