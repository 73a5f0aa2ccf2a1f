// Background execution context: one worker task running jobs in submission order.
use crate::model::AnalyzerError;
use futures::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

type Job = BoxFuture<'static, ()>;

pub struct Executor {
    sender: Option<mpsc::UnboundedSender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl Executor {
    /// Starts the worker on the current Tokio runtime.
    pub fn spawn() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
        let worker = tokio::spawn(async move {
            info!("▶️ Background worker started");
            while let Some(job) = receiver.recv().await {
                job.await;
            }
            info!("🛑 Background worker stopped");
        });

        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Queues `job` behind any pending work and waits for its output.
    pub async fn submit<F, T>(&self, job: F) -> Result<T, AnalyzerError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(AnalyzerError::ShutDown)?;
        let (tx, rx) = oneshot::channel();
        let wrapped: Job = Box::pin(async move {
            // A panicking job only takes down its own task.
            let outcome = tokio::spawn(job).await.map_err(|e| {
                warn!("❌ Background job failed: {}", e);
                AnalyzerError::TaskFailed(e.to_string())
            });
            let _ = tx.send(outcome);
        });
        sender.send(wrapped).map_err(|_| AnalyzerError::ShutDown)?;
        debug!("Job queued");

        rx.await.map_err(|_| {
            AnalyzerError::TaskFailed("job ended without producing a result".into())
        })?
    }

    /// Closes the queue, lets pending jobs finish and waits for the worker to exit.
    /// Calling it again is a no-op.
    pub async fn shutdown(&mut self) {
        if self.sender.take().is_none() && self.worker.is_none() {
            debug!("Executor already shut down");
            return;
        }
        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.await {
                warn!("❌ Background worker ended abnormally: {}", e);
            }
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.sender.is_none()
    }

    pub fn is_terminated(&self) -> bool {
        self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[tokio::test]
    async fn jobs_run_in_submission_order() {
        let executor = Executor::spawn();
        let log = Arc::new(Mutex::new(Vec::new()));

        let slow_log = log.clone();
        let fast_log = log.clone();
        let (a, b) = tokio::join!(
            executor.submit(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                slow_log.lock().await.push(1);
            }),
            executor.submit(async move {
                fast_log.lock().await.push(2);
            }),
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(*log.lock().await, vec![1, 2]);
    }

    #[tokio::test]
    async fn panicking_job_reports_failure_and_worker_survives() {
        let executor = Executor::spawn();
        let failed = executor
            .submit::<_, ()>(async {
                panic!("boom");
            })
            .await;
        match failed {
            Err(AnalyzerError::TaskFailed(message)) => {
                assert!(message.contains("boom"), "{message}")
            }
            other => panic!("expected TaskFailed, got {other:?}"),
        }

        let value = executor.submit(async { 41 + 1 }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn shutdown_is_idempotent_and_rejects_new_work() {
        let mut executor = Executor::spawn();
        assert!(!executor.is_shutdown());

        executor.shutdown().await;
        assert!(executor.is_shutdown());
        assert!(executor.is_terminated());

        executor.shutdown().await;
        assert!(executor.is_terminated());

        let rejected = executor.submit(async {}).await;
        assert!(matches!(rejected, Err(AnalyzerError::ShutDown)));
    }
}
