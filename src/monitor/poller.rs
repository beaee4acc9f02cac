use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use quotaboard_core::QuotaSnapshot;

use crate::client::SnapshotSource;

/// Message sent from poller to main loop
#[derive(Debug)]
pub enum PollMessage {
    /// A fetch is starting
    Started,
    /// Fetch succeeded
    Snapshot(QuotaSnapshot),
    /// Fetch failed
    Error(String),
}

/// Periodic snapshot poller.
///
/// Polls immediately on start, then every `interval`. Fetches never overlap:
/// ticks that fall due while a fetch is in flight are skipped, and retry
/// requests made during a fetch are satisfied by that fetch.
pub struct Poller<S> {
    source: Arc<S>,
    interval: Duration,
}

/// Control handle for a running poller. Dropping it stops the poller.
pub struct PollerHandle {
    retry_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Request an immediate poll
    pub fn retry(&self) {
        // A full channel already has a retry pending
        let _ = self.retry_tx.try_send(());
    }

    /// Stop polling
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<S: SnapshotSource> Poller<S> {
    /// Create a new poller
    pub fn new(source: S, interval: Duration) -> Self {
        Self {
            source: Arc::new(source),
            interval,
        }
    }

    /// Start polling in a background task
    pub fn start(self) -> (mpsc::Receiver<PollMessage>, PollerHandle) {
        let (tx, rx) = mpsc::channel(32);
        let (retry_tx, retry_rx) = mpsc::channel(1);

        let task = tokio::spawn(async move {
            self.run(tx, retry_rx).await;
        });

        (rx, PollerHandle { retry_tx, task })
    }

    /// Run the polling loop
    async fn run(self, tx: mpsc::Sender<PollMessage>, mut retry_rx: mpsc::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                request = retry_rx.recv() => {
                    if request.is_none() {
                        break;
                    }
                    debug!("Manual retry requested");
                }
            }

            if tx.send(PollMessage::Started).await.is_err() {
                break; // Receiver dropped
            }

            let message = match self.source.fetch_snapshot().await {
                Ok(snapshot) => PollMessage::Snapshot(snapshot),
                Err(e) => {
                    warn!("Fetch error: {}", e);
                    PollMessage::Error(e.to_string())
                }
            };

            // Retries requested while the fetch was in flight are answered by it
            while retry_rx.try_recv().is_ok() {}

            if tx.send(message).await.is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    const LONG: Duration = Duration::from_secs(3600);
    const RECV_TIMEOUT: Duration = Duration::from_secs(5);

    /// Source replaying scripted outcomes, then succeeding
    struct ScriptedSource {
        outcomes: Mutex<VecDeque<Result<f64, String>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<Result<f64, String>>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let source = Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: calls.clone(),
            };
            (source, calls)
        }
    }

    impl SnapshotSource for ScriptedSource {
        async fn fetch_snapshot(&self) -> Result<QuotaSnapshot, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self.outcomes.lock().pop_front().unwrap_or(Ok(0.0));
            outcome
                .map(|credits| QuotaSnapshot {
                    available_prompt_credits: credits,
                    ..Default::default()
                })
                .map_err(ClientError::Application)
        }
    }

    /// Source whose fetch blocks until the gate is opened
    struct GatedSource {
        gate: Arc<Notify>,
        calls: Arc<AtomicUsize>,
    }

    impl SnapshotSource for GatedSource {
        async fn fetch_snapshot(&self) -> Result<QuotaSnapshot, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(QuotaSnapshot::default())
        }
    }

    async fn next(rx: &mut mpsc::Receiver<PollMessage>) -> PollMessage {
        tokio::time::timeout(RECV_TIMEOUT, rx.recv())
            .await
            .expect("poller should send a message")
            .expect("poller channel should be open")
    }

    #[tokio::test]
    async fn test_polls_immediately_on_start() {
        let (source, calls) = ScriptedSource::new(vec![Ok(7.0)]);
        let (mut rx, _handle) = Poller::new(source, LONG).start();

        assert!(matches!(next(&mut rx).await, PollMessage::Started));
        match next(&mut rx).await {
            PollMessage::Snapshot(s) => assert_eq!(s.available_prompt_credits, 7.0),
            other => panic!("expected snapshot, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_triggers_fetch() {
        let (source, calls) = ScriptedSource::new(vec![Err("down".to_string()), Ok(3.0)]);
        let (mut rx, handle) = Poller::new(source, LONG).start();

        assert!(matches!(next(&mut rx).await, PollMessage::Started));
        match next(&mut rx).await {
            PollMessage::Error(message) => assert_eq!(message, "down"),
            other => panic!("expected error, got {:?}", other),
        }

        handle.retry();
        assert!(matches!(next(&mut rx).await, PollMessage::Started));
        assert!(matches!(next(&mut rx).await, PollMessage::Snapshot(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_keeps_polling_on_interval() {
        let (source, calls) =
            ScriptedSource::new(vec![Err("a".to_string()), Err("b".to_string())]);
        let (mut rx, _handle) = Poller::new(source, Duration::from_millis(20)).start();

        let mut completed = 0;
        while completed < 3 {
            match next(&mut rx).await {
                PollMessage::Started => {}
                _ => completed += 1,
            }
        }
        assert!(calls.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_retries_during_fetch_are_coalesced() {
        let gate = Arc::new(Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let source = GatedSource {
            gate: gate.clone(),
            calls: calls.clone(),
        };
        let (mut rx, handle) = Poller::new(source, LONG).start();

        assert!(matches!(next(&mut rx).await, PollMessage::Started));
        handle.retry();
        handle.retry();
        handle.retry();
        gate.notify_one();

        assert!(matches!(next(&mut rx).await, PollMessage::Snapshot(_)));
        let extra = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(extra.is_err(), "unexpected message: {:?}", extra);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stop_closes_channel() {
        let (source, _calls) = ScriptedSource::new(vec![]);
        let (mut rx, handle) = Poller::new(source, LONG).start();
        assert!(matches!(next(&mut rx).await, PollMessage::Started));
        assert!(matches!(next(&mut rx).await, PollMessage::Snapshot(_)));

        handle.stop();
        let closed = tokio::time::timeout(RECV_TIMEOUT, rx.recv()).await.unwrap();
        assert!(closed.is_none());
    }
}
