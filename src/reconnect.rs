//! Reconnection supervision.
//!
//! Two states: connected, and disconnected with a restart pending. Every
//! disconnect schedules a full restart of the connection-establishment
//! procedure after a fixed delay; there is no retry bound, no backoff and
//! no jitter. A superseding disconnect aborts the still-pending timer so
//! at most one restart fires, and reaching the connected state clears any
//! pending timer.

use log::debug;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

pub struct ReconnectSupervisor {
    delay: Duration,
    restart_tx: mpsc::UnboundedSender<()>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl ReconnectSupervisor {
    /// Returns the supervisor and the receiver the bot run loop waits on
    /// for restart signals.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (restart_tx, restart_rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                restart_tx,
                pending: Mutex::new(None),
            },
            restart_rx,
        )
    }

    /// Schedules a restart after the fixed delay, aborting any timer a
    /// previous disconnect left pending.
    pub async fn schedule_restart(&self) {
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
            debug!("Superseding pending reconnect timer");
        }

        let tx = self.restart_tx.clone();
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(());
        }));
    }

    /// Returns to the connected state, aborting a pending timer.
    pub async fn note_connected(&self) {
        if let Some(handle) = self.pending.lock().await.take() {
            handle.abort();
            debug!("Connection is open; cancelled pending reconnect timer");
        }
    }

    /// Whether a restart has been scheduled and not cancelled since.
    pub async fn restart_pending(&self) -> bool {
        self.pending.lock().await.is_some()
    }
}
