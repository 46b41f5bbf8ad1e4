//! Bounded, non-blocking payment notification dispatch.
//!
//! ```text
//! notify() ──try_send──► [bounded queue] ──► dispatch loop ──► spawn(delivery)
//!     │                                          │                 │
//!     └─ full/closed: drop + warn                └─ semaphore      └─ timeout
//! ```
//!
//! Delivery is at-most-once. Failures are logged and counted, never retried.

use carshare_core::{NotificationError, PaymentClient, PaymentNotice, PaymentNotifier};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Notify, Semaphore, mpsc};
use tokio::task::JoinHandle;

/// Dispatcher sizing and timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Notices buffered before new ones are dropped.
    pub queue_capacity: usize,
    /// Deliveries allowed in flight at once.
    pub max_in_flight: usize,
    /// Upper bound on a single delivery.
    pub delivery_timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            max_in_flight: 16,
            delivery_timeout: Duration::from_millis(5000),
        }
    }
}

/// [`PaymentNotifier`] that hands notices to a background dispatch loop.
///
/// Cloning is cheap; clones feed the same queue.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    queue: mpsc::Sender<PaymentNotice>,
}

/// Controls the background dispatch loop.
#[derive(Debug)]
pub struct DispatcherHandle {
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl NotificationDispatcher {
    /// Start the dispatch loop on the current tokio runtime.
    #[must_use]
    pub fn spawn<C>(client: C, config: DispatcherConfig) -> (Self, DispatcherHandle)
    where
        C: PaymentClient + 'static,
    {
        let (queue, intake) = mpsc::channel(config.queue_capacity.max(1));
        let shutdown = Arc::new(Notify::new());
        let task = tokio::spawn(dispatch_loop(
            Arc::new(client),
            intake,
            Arc::clone(&shutdown),
            config,
        ));

        tracing::info!(
            queue_capacity = config.queue_capacity,
            max_in_flight = config.max_in_flight,
            timeout_ms = u64::try_from(config.delivery_timeout.as_millis()).unwrap_or(u64::MAX),
            "Payment notification dispatcher started"
        );

        (Self { queue }, DispatcherHandle { shutdown, task })
    }
}

impl PaymentNotifier for NotificationDispatcher {
    fn notify(&self, notice: PaymentNotice) {
        let reservation_id = notice.reservation_id;
        let error = match self.queue.try_send(notice) {
            Ok(()) => {
                tracing::debug!(%reservation_id, "Payment notice queued");
                return;
            }
            Err(TrySendError::Full(_)) => NotificationError::QueueUnavailable("full".to_string()),
            Err(TrySendError::Closed(_)) => {
                NotificationError::QueueUnavailable("closed".to_string())
            }
        };

        metrics::counter!("payment_notifications_dropped_total").increment(1);
        tracing::warn!(%reservation_id, %error, "Payment notice dropped");
    }
}

impl DispatcherHandle {
    /// Stop accepting notices and wait for queued and in-flight deliveries.
    ///
    /// Returns `false` if `grace` elapsed first; remaining deliveries are
    /// then abandoned to the runtime.
    pub async fn shutdown(self, grace: Duration) -> bool {
        self.shutdown.notify_one();

        if tokio::time::timeout(grace, self.task).await.is_ok() {
            tracing::info!("Payment notification dispatcher drained");
            true
        } else {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "Payment notification dispatcher did not drain in time"
            );
            false
        }
    }
}

async fn dispatch_loop<C>(
    client: Arc<C>,
    mut intake: mpsc::Receiver<PaymentNotice>,
    shutdown: Arc<Notify>,
    config: DispatcherConfig,
) where
    C: PaymentClient + 'static,
{
    let max_in_flight = config.max_in_flight.clamp(1, Semaphore::MAX_PERMITS);
    let permits = Arc::new(Semaphore::new(max_in_flight));

    loop {
        let next = tokio::select! {
            notice = intake.recv() => notice,
            () = shutdown.notified() => {
                // Close intake; buffered notices are still drained below
                intake.close();
                intake.recv().await
            }
        };
        let Some(notice) = next else { break };

        let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
            break;
        };
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            deliver(client.as_ref(), notice, config.delivery_timeout).await;
            drop(permit);
        });
    }

    // Every permit back means every delivery finished
    let all = u32::try_from(max_in_flight).unwrap_or(u32::MAX);
    let _ = permits.acquire_many(all).await;
}

async fn deliver<C: PaymentClient>(client: &C, notice: PaymentNotice, timeout: Duration) {
    let started = Instant::now();
    let outcome = tokio::time::timeout(timeout, client.deliver(&notice))
        .await
        .unwrap_or(Err(NotificationError::Timeout));
    metrics::histogram!("payment_notification_duration_seconds")
        .record(started.elapsed().as_secs_f64());

    match outcome {
        Ok(()) => {
            metrics::counter!("payment_notifications_sent_total").increment(1);
            tracing::info!(
                reservation_id = %notice.reservation_id,
                "Payment service notified"
            );
        }
        Err(error) => {
            metrics::counter!("payment_notifications_failed_total", "reason" => error.reason())
                .increment(1);
            tracing::warn!(
                reservation_id = %notice.reservation_id,
                %error,
                "Payment notification failed"
            );
        }
    }
}
