//! Bulk submission driver.
//!
//! Fans batches out to a fixed pool of workers:
//!
//! ```text
//! generator ──▶ producer ──[bounded queue, queue_size]──▶ worker × N ──▶ aggregator
//! ```
//!
//! The producer blocks when the queue is full, so generation never runs more
//! than `queue_size` batches ahead of submission. Outcomes arrive in
//! completion order, not submission order.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::PipelineError;
use song_seeder_repository::{BatchOperationSummary, SearchIndexError, SearchIndexProvider};
use song_seeder_shared::SongAction;

/// Configuration for the bulk driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Number of concurrent submitting workers.
    pub workers: usize,
    /// Number of documents per bulk request.
    pub batch_size: usize,
    /// Number of batches the producer may prepare ahead of the workers.
    pub queue_size: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            batch_size: 5_000,
            queue_size: 8,
        }
    }
}

impl DriverConfig {
    /// Reject zero-sized pools, batches or queues.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.workers == 0 {
            return Err(PipelineError::config("workers must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(PipelineError::config("batch_size must be at least 1"));
        }
        if self.queue_size == 0 {
            return Err(PipelineError::config("queue_size must be at least 1"));
        }
        Ok(())
    }
}

/// Totals of a completed driver run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverReport {
    /// Documents the backend answered for.
    pub submitted: usize,
    /// Documents accepted.
    pub succeeded: usize,
    /// Documents rejected.
    pub failed: usize,
    /// Bulk requests completed.
    pub batches: usize,
    /// Wall time of the run.
    pub elapsed: Duration,
}

impl DriverReport {
    /// Accepted documents per second.
    pub fn docs_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.succeeded as f64 / secs
        } else {
            0.0
        }
    }

    fn record(&mut self, summary: &BatchOperationSummary) {
        self.batches += 1;
        self.submitted += summary.total;
        self.succeeded += summary.succeeded;
        self.failed += summary.failed;
    }
}

/// What a worker reports back for one batch.
#[derive(Debug)]
enum BatchOutcome {
    Completed {
        worker_id: usize,
        summary: BatchOperationSummary,
    },
    Failed {
        worker_id: usize,
        size: usize,
        error: SearchIndexError,
    },
}

/// Worker pool submitting batches of actions through a search provider.
pub struct BulkDriver {
    provider: Arc<dyn SearchIndexProvider>,
    config: DriverConfig,
}

impl BulkDriver {
    /// Create a driver, validating its configuration.
    pub fn new(
        provider: Arc<dyn SearchIndexProvider>,
        config: DriverConfig,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    /// Submit every action produced by `actions`.
    ///
    /// Rejected documents are logged and counted; the run continues. A batch
    /// whose bulk request fails as a whole stops the run: the producer and the
    /// remaining workers are shut down and `PipelineError::SubmissionError` is
    /// returned. Documents accepted before that stay indexed.
    #[instrument(
        skip(self, actions),
        fields(workers = self.config.workers, batch_size = self.config.batch_size)
    )]
    pub async fn run<I>(&self, actions: I) -> Result<DriverReport, PipelineError>
    where
        I: Iterator<Item = SongAction> + Send + 'static,
    {
        let started = Instant::now();

        let (batch_tx, batch_rx) = mpsc::channel::<Vec<SongAction>>(self.config.queue_size);
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<BatchOutcome>(self.config.workers);

        let producer = spawn_producer(actions, self.config.batch_size, batch_tx);

        let batch_rx = Arc::new(Mutex::new(batch_rx));
        let workers: Vec<JoinHandle<()>> = (0..self.config.workers)
            .map(|worker_id| {
                spawn_worker(
                    worker_id,
                    Arc::clone(&self.provider),
                    Arc::clone(&batch_rx),
                    outcome_tx.clone(),
                )
            })
            .collect();
        // Workers hold the only senders; the loop below ends when they all exit.
        drop(outcome_tx);

        let mut report = DriverReport::default();

        while let Some(outcome) = outcome_rx.recv().await {
            match outcome {
                BatchOutcome::Completed { worker_id, summary } => {
                    for failure in summary.failures() {
                        let reason = failure
                            .error
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "unknown".to_string());
                        warn!(
                            document_id = %failure.document_id,
                            status = ?failure.status,
                            error = %reason,
                            "Document failed"
                        );
                    }
                    report.record(&summary);
                    debug!(
                        worker_id = worker_id,
                        succeeded = summary.succeeded,
                        failed = summary.failed,
                        "Batch completed"
                    );
                    info!(
                        batches = report.batches,
                        succeeded = report.succeeded,
                        failed = report.failed,
                        "Progress"
                    );
                }
                BatchOutcome::Failed {
                    worker_id,
                    size,
                    error,
                } => {
                    error!(
                        worker_id = worker_id,
                        batch_size = size,
                        error = %error,
                        "Bulk request failed, aborting"
                    );

                    for worker in &workers {
                        worker.abort();
                    }
                    for worker in workers {
                        let _ = worker.await;
                    }
                    // Dropping the last receiver unblocks a producer waiting on a full queue.
                    drop(batch_rx);
                    let _ = producer.await;

                    return Err(PipelineError::submission(error.to_string()));
                }
            }
        }

        for worker in workers {
            worker
                .await
                .map_err(|e| PipelineError::channel(format!("Worker task failed: {}", e)))?;
        }
        let produced = producer
            .await
            .map_err(|e| PipelineError::channel(format!("Producer task failed: {}", e)))?;

        report.elapsed = started.elapsed();

        debug!(produced = produced, completed = report.batches, "Driver finished");

        Ok(report)
    }
}

/// Cut `actions` into batches and push them into the queue.
///
/// Runs on the blocking pool since generation is synchronous. Returns the
/// number of batches sent.
fn spawn_producer<I>(
    mut actions: I,
    batch_size: usize,
    batch_tx: mpsc::Sender<Vec<SongAction>>,
) -> JoinHandle<usize>
where
    I: Iterator<Item = SongAction> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut produced = 0;
        loop {
            let batch: Vec<SongAction> = actions.by_ref().take(batch_size).collect();
            if batch.is_empty() {
                break;
            }
            if batch_tx.blocking_send(batch).is_err() {
                debug!("Batch queue closed, producer stopping");
                break;
            }
            produced += 1;
        }
        produced
    })
}

fn spawn_worker(
    worker_id: usize,
    provider: Arc<dyn SearchIndexProvider>,
    batch_rx: Arc<Mutex<mpsc::Receiver<Vec<SongAction>>>>,
    outcome_tx: mpsc::Sender<BatchOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let batch = { batch_rx.lock().await.recv().await };
            let Some(batch) = batch else {
                break;
            };

            let outcome = match provider.bulk_index_documents(&batch).await {
                Ok(summary) => BatchOutcome::Completed { worker_id, summary },
                Err(error) => BatchOutcome::Failed {
                    worker_id,
                    size: batch.len(),
                    error,
                },
            };

            if outcome_tx.send(outcome).await.is_err() {
                break;
            }
        }
        debug!(worker_id = worker_id, "Worker finished");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GeneratorConfig, SongGenerator};
    use async_trait::async_trait;
    use song_seeder_repository::BatchOperationResult;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock provider for testing.
    #[derive(Default)]
    struct MockProvider {
        bulk_calls: AtomicUsize,
        max_batch_seen: AtomicUsize,
        indexed: std::sync::Mutex<Vec<String>>,
        reject_ids: HashSet<String>,
        fail_on_call: Option<usize>,
        stall: bool,
    }

    #[async_trait]
    impl SearchIndexProvider for MockProvider {
        async fn health_check(&self) -> Result<bool, SearchIndexError> {
            Ok(true)
        }

        async fn ensure_index_exists(&self, _index: &str) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn bulk_index_documents(
            &self,
            actions: &[SongAction],
        ) -> Result<BatchOperationSummary, SearchIndexError> {
            let call = self.bulk_calls.fetch_add(1, Ordering::SeqCst);
            self.max_batch_seen.fetch_max(actions.len(), Ordering::SeqCst);

            if self.stall {
                std::future::pending::<()>().await;
            }

            if self.fail_on_call == Some(call) {
                return Err(SearchIndexError::bulk_operation("Mock failure"));
            }

            let results = actions
                .iter()
                .map(|action| {
                    let id = action.document_id();
                    if self.reject_ids.contains(&id) {
                        BatchOperationResult::failed(
                            id,
                            Some(400),
                            SearchIndexError::rejected(400, "mapper_parsing_exception"),
                        )
                    } else {
                        self.indexed.lock().unwrap().push(id.clone());
                        BatchOperationResult::succeeded(id, Some(201))
                    }
                })
                .collect();

            Ok(BatchOperationSummary::from_results(results))
        }
    }

    fn actions(total: usize) -> SongGenerator {
        SongGenerator::new(GeneratorConfig::new("music_id3", total).with_seed(9))
    }

    fn config(workers: usize, batch_size: usize, queue_size: usize) -> DriverConfig {
        DriverConfig {
            workers,
            batch_size,
            queue_size,
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(DriverConfig::default().validate().is_ok());
        assert!(config(0, 10, 1).validate().is_err());
        assert!(config(1, 0, 1).validate().is_err());
        assert!(config(1, 10, 0).validate().is_err());
    }

    #[tokio::test]
    async fn test_all_documents_indexed() {
        let provider = Arc::new(MockProvider::default());
        let driver = BulkDriver::new(provider.clone(), config(3, 4, 2)).unwrap();

        let report = driver.run(actions(10)).await.unwrap();

        assert_eq!(report.submitted, 10);
        assert_eq!(report.succeeded, 10);
        assert_eq!(report.failed, 0);
        assert_eq!(report.batches, 3);
        assert_eq!(provider.bulk_calls.load(Ordering::SeqCst), 3);
        assert_eq!(provider.max_batch_seen.load(Ordering::SeqCst), 4);

        let indexed: HashSet<String> = provider.indexed.lock().unwrap().iter().cloned().collect();
        let expected: HashSet<String> = actions(10).map(|a| a.document_id()).collect();
        assert_eq!(indexed, expected);
    }

    #[tokio::test]
    async fn test_zero_documents() {
        let provider = Arc::new(MockProvider::default());
        let driver = BulkDriver::new(provider.clone(), config(4, 100, 8)).unwrap();

        let report = driver.run(actions(0)).await.unwrap();

        assert_eq!(report.succeeded, 0);
        assert_eq!(report.batches, 0);
        assert_eq!(provider.bulk_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rejected_document_is_counted_and_run_continues() {
        let rejected = actions(20).nth(13).unwrap().document_id();
        let provider = Arc::new(MockProvider {
            reject_ids: HashSet::from([rejected.clone()]),
            ..Default::default()
        });
        let driver = BulkDriver::new(provider.clone(), config(2, 5, 1)).unwrap();

        let report = driver.run(actions(20)).await.unwrap();

        assert_eq!(report.submitted, 20);
        assert_eq!(report.succeeded, 19);
        assert_eq!(report.failed, 1);
        assert!(!provider.indexed.lock().unwrap().contains(&rejected));
    }

    #[tokio::test]
    async fn test_bulk_failure_aborts() {
        let provider = Arc::new(MockProvider {
            fail_on_call: Some(0),
            ..Default::default()
        });
        let driver = BulkDriver::new(provider.clone(), config(1, 10, 1)).unwrap();

        let result = driver.run(actions(1_000)).await;

        assert!(matches!(result, Err(PipelineError::SubmissionError(_))));
        // The producer stops once the queue closes instead of generating everything.
        assert!(provider.bulk_calls.load(Ordering::SeqCst) < 100);
    }

    #[tokio::test]
    async fn test_full_queue_blocks_producer() {
        let provider = Arc::new(MockProvider {
            stall: true,
            ..Default::default()
        });
        let (workers, batch_size, queue_size) = (2, 10, 3);
        let driver =
            BulkDriver::new(provider.clone(), config(workers, batch_size, queue_size)).unwrap();

        let produced = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&produced);
        let generator = actions(10_000).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let run = tokio::spawn(async move { driver.run(generator).await });
        tokio::time::sleep(Duration::from_millis(300)).await;

        // Every worker holds one batch, the queue is full and the producer
        // is blocked sending the batch it just cut.
        let produced = produced.load(Ordering::SeqCst);
        assert!(produced > 0);
        assert!(produced <= (queue_size + workers + 1) * batch_size);
        assert_eq!(provider.bulk_calls.load(Ordering::SeqCst), workers);
        assert!(!run.is_finished());

        run.abort();
    }

    #[tokio::test]
    async fn test_single_worker_single_slot_queue() {
        let provider = Arc::new(MockProvider::default());
        let driver = BulkDriver::new(provider.clone(), config(1, 1, 1)).unwrap();

        let report = driver.run(actions(25)).await.unwrap();

        assert_eq!(report.succeeded, 25);
        assert_eq!(report.batches, 25);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let provider = Arc::new(MockProvider::default());
        assert!(matches!(
            BulkDriver::new(provider, config(0, 1, 1)),
            Err(PipelineError::ConfigError(_))
        ));
    }
}
