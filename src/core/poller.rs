use crate::core::workflow::CartWorkflow;
use crate::domain::ports::{MenuCatalog, OrderGateway, ReadyFeed};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// The recurring status poll, owned by the workflow's active lifetime.
///
/// Spawned when polling should start and aborted on `stop()` or drop, so the
/// timer is released on every teardown path. Each tick locks the workflow
/// for its whole duration: one logical writer, and a tick's status updates
/// are atomic with respect to every other trigger.
pub struct StatusPoller {
    handle: JoinHandle<()>,
}

impl StatusPoller {
    pub fn spawn<C, G, F>(workflow: Arc<Mutex<CartWorkflow<C, G, F>>>, period: Duration) -> Self
    where
        C: MenuCatalog + 'static,
        G: OrderGateway + 'static,
        F: ReadyFeed + 'static,
    {
        tracing::debug!("Starting status poller, period {:?}", period);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // A tokio interval fires immediately; skip that first tick so
            // the first poll happens one full period after spawn.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let mut workflow = workflow.lock().await;
                if workflow.history().is_empty() {
                    continue;
                }
                workflow.poll_status().await;
            }
        });
        Self { handle }
    }

    /// Cancels the poll task. Dropping the poller has the same effect.
    pub fn stop(self) {
        tracing::debug!("Stopping status poller");
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
