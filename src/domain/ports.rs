use crate::domain::model::{MenuItem, OrderPayload, OrderRecord, ReadyOrder};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Menu catalog service: the menu items offered to a given user.
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    async fn fetch_menu(&self, user_email: &str) -> Result<Vec<MenuItem>>;
}

/// Order-acceptance, order-history and order-status services, all served by
/// the same remote collaborator.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn submit_order(&self, payload: &OrderPayload) -> Result<()>;

    async fn fetch_history(&self, user_email: &str) -> Result<Vec<OrderRecord>>;

    /// `Ok(None)` means the order is no longer in the pending queue.
    /// Absence is data here, not an error.
    async fn fetch_status(&self, order_id: &str) -> Result<Option<OrderRecord>>;
}

/// Shared process-wide list of orders marked ready. The workflow only reads
/// and clears it; something else writes to it.
pub trait ReadyFeed: Send + Sync {
    fn ready_orders(&self) -> Vec<ReadyOrder>;
    fn clear(&self);
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn user_email(&self) -> &str;
    fn serial_number(&self) -> Option<&str>;
    fn poll_interval_seconds(&self) -> u64;
    fn request_timeout_seconds(&self) -> u64;
}
