//! Background keep-alive task
//!
//! Started once the player is registered. Sends a heartbeat immediately and
//! then on a fixed interval, independent of game ticks, until stopped.

use paintbot_protocol::ClientMessage;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

use crate::connection::MessageSender;

pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Handle to a running keep-alive task
pub struct Heartbeat {
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl Heartbeat {
    /// Spawn the task on the current runtime
    pub fn spawn(sender: MessageSender, player_id: String, period: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    _ = &mut shutdown_rx => {
                        debug!("Heartbeat stopped");
                        break;
                    }

                    _ = ticker.tick() => {
                        debug!("Sending heartbeat");
                        let heartbeat = ClientMessage::HeartBeatRequest;
                        if let Err(e) = sender.send(&heartbeat, Some(&player_id)).await {
                            warn!("Heartbeat failed, stopping: {}", e);
                            break;
                        }
                    }
                }
            }
        });

        Self {
            shutdown_tx: Some(shutdown_tx),
            handle,
        }
    }

    /// Stop the task and wait for it to finish.
    /// A heartbeat already being written completes first.
    pub async fn stop(mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        if let Err(e) = (&mut self.handle).await {
            warn!("Heartbeat task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        // Never outlive the session, even if stop() was skipped
        self.handle.abort();
    }
}
