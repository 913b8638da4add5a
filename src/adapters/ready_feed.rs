use crate::domain::model::ReadyOrder;
use crate::domain::ports::ReadyFeed;
use std::sync::{Arc, Mutex};

/// Process-wide list of orders marked ready.
///
/// An explicit shared-state service instead of hidden global state: clones
/// share one list, producers push into it, and the workflow side only reads
/// and clears through the [`ReadyFeed`] port.
#[derive(Debug, Clone, Default)]
pub struct SharedReadyFeed {
    inner: Arc<Mutex<Vec<ReadyOrder>>>,
}

impl SharedReadyFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Producer side: mark an order as ready. Not part of the workflow-facing
    /// port.
    pub fn push(&self, ready: ReadyOrder) {
        self.inner.lock().unwrap().push(ready);
    }
}

impl ReadyFeed for SharedReadyFeed {
    fn ready_orders(&self) -> Vec<ReadyOrder> {
        self.inner.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.inner.lock().unwrap().clear();
    }
}
