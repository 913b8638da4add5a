use crate::core::cart::Cart;
use crate::domain::model::{
    order_total, MenuItem, Order, OrderLine, OrderPayload, OrderStatus, ReadyOrder,
};
use crate::domain::ports::{MenuCatalog, OrderGateway, ReadyFeed};
use crate::utils::error::{CartError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};

/// Timestamp of the most recently issued order id. Submissions within the
/// same millisecond get bumped forward so ids stay unique for the session.
static LAST_ORDER_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

fn next_order_id() -> String {
    let now = chrono::Utc::now().timestamp_millis();
    let issued = LAST_ORDER_ID_MILLIS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .map(|last| now.max(last + 1))
        .unwrap_or(now);
    format!("ORD-{}", issued)
}

/// The cart and order-submission workflow.
///
/// Owns the quantity selection, the append-only order history and the last
/// user-visible error message. All collaborators are injected; there is no
/// hidden shared state. Every failure is recovered here: logged, recorded as
/// a single message, and never allowed to propagate further.
pub struct CartWorkflow<C, G, F> {
    catalog: C,
    gateway: G,
    ready_feed: F,
    user_email: String,
    serial_number: Option<String>,
    cart: Cart,
    history: Vec<Order>,
    last_error: Option<String>,
}

impl<C, G, F> CartWorkflow<C, G, F>
where
    C: MenuCatalog,
    G: OrderGateway,
    F: ReadyFeed,
{
    pub fn new(
        catalog: C,
        gateway: G,
        ready_feed: F,
        user_email: impl Into<String>,
        serial_number: Option<String>,
    ) -> Self {
        Self {
            catalog,
            gateway,
            ready_feed,
            user_email: user_email.into(),
            serial_number,
            cart: Cart::new(),
            history: Vec::new(),
            last_error: None,
        }
    }

    pub fn menu(&self) -> &[MenuItem] {
        self.cart.menu()
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.cart.quantity(item_id)
    }

    pub fn history(&self) -> &[Order] {
        &self.history
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetches the menu for this user and installs it with zeroed
    /// quantities. On failure the menu stays empty and the error message is
    /// recorded.
    pub async fn load_menu(&mut self) -> Result<()> {
        tracing::debug!("Fetching menu for {}", self.user_email);
        match self.catalog.fetch_menu(&self.user_email).await {
            Ok(items) => {
                tracing::info!("Loaded {} menu items", items.len());
                self.cart.install(items);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Menu fetch failed: {}", e);
                let err = CartError::MenuFetchError {
                    message: e.to_string(),
                };
                self.last_error = Some(err.user_friendly_message());
                self.cart.install(Vec::new());
                Err(err)
            }
        }
    }

    pub fn adjust_quantity(&mut self, item_id: &str, delta: i32) {
        self.cart.adjust(item_id, delta);
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.cart.remove(item_id);
    }

    /// Projects the current selection into order lines. Only items with a
    /// quantity above zero qualify; an all-zero selection is a reported,
    /// non-fatal condition.
    pub fn build_order(&mut self) -> Result<Vec<OrderLine>> {
        let lines: Vec<OrderLine> = self
            .cart
            .selected()
            .map(|(item, quantity)| OrderLine::new(item.name.clone(), quantity, item.price))
            .collect();

        if lines.is_empty() {
            let err = CartError::EmptyOrderError;
            self.last_error = Some(err.user_friendly_message());
            return Err(err);
        }
        Ok(lines)
    }

    /// Submits the current selection as a new order.
    ///
    /// On success the order is appended to the history as Pending, all
    /// quantities reset to zero, and the history is refreshed from the
    /// server (refresh errors are logged and swallowed; the local append has
    /// already happened). On failure the cart is left untouched so the user
    /// can retry without re-entering quantities.
    pub async fn submit_order(&mut self) -> Result<String> {
        let lines = self.build_order()?;
        let order_id = next_order_id();

        let payload = OrderPayload {
            user_email: self.user_email.clone(),
            items: lines.clone(),
            order_id: order_id.clone(),
            serial_number: self.serial_number.clone(),
        };

        match self.gateway.submit_order(&payload).await {
            Ok(()) => {
                tracing::info!(
                    "Order {} accepted, total {:.2}",
                    order_id,
                    order_total(&lines)
                );
                self.history.push(Order {
                    order_id: order_id.clone(),
                    user_email: self.user_email.clone(),
                    serial_number: self.serial_number.clone(),
                    items: lines,
                    status: OrderStatus::Pending,
                });
                self.cart.reset();
                self.last_error = None;

                // 下單成功後立即刷新訂單歷史
                if let Err(e) = self.refresh_history().await {
                    tracing::warn!("History refresh after submission failed: {}", e);
                }

                Ok(order_id)
            }
            Err(e) => {
                tracing::warn!("Order submission failed: {}", e);
                let err = CartError::SubmissionError {
                    message: e.to_string(),
                };
                self.last_error = Some(err.user_friendly_message());
                Err(err)
            }
        }
    }

    /// Replaces the history with the server's sequence, carrying over known
    /// statuses and keeping local orders the server does not report yet.
    /// The set of known orders never shrinks here.
    pub async fn refresh_history(&mut self) -> Result<()> {
        let records = self.gateway.fetch_history(&self.user_email).await?;
        tracing::debug!("History refresh returned {} orders", records.len());

        let known_statuses: HashMap<String, OrderStatus> = self
            .history
            .iter()
            .map(|order| (order.order_id.clone(), order.status))
            .collect();
        let server_ids: HashSet<String> =
            records.iter().map(|record| record.order_id.clone()).collect();

        let mut merged: Vec<Order> = records
            .into_iter()
            .map(|record| Order {
                status: known_statuses
                    .get(&record.order_id)
                    .copied()
                    .unwrap_or(OrderStatus::Pending),
                order_id: record.order_id,
                user_email: self.user_email.clone(),
                serial_number: record.serial_number,
                items: record.items,
            })
            .collect();

        merged.extend(
            self.history
                .drain(..)
                .filter(|order| !server_ids.contains(&order.order_id)),
        );

        self.history = merged;
        Ok(())
    }

    /// One status poll tick over every order in the history.
    ///
    /// A "not found" reply means the order left the pending queue and is
    /// Ready; a found record means it is still being prepared. Errors are
    /// logged and the previous status kept, so a transient failure never
    /// regresses a Ready order and never breaks the tick. Updates are
    /// applied only after every query has completed.
    pub async fn poll_status(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let mut updates: HashMap<String, OrderStatus> = HashMap::new();
        for order in &self.history {
            match self.gateway.fetch_status(&order.order_id).await {
                Ok(Some(_)) => {
                    updates.insert(order.order_id.clone(), OrderStatus::Pending);
                }
                Ok(None) => {
                    updates.insert(order.order_id.clone(), OrderStatus::Ready);
                }
                Err(e) => {
                    tracing::warn!(
                        "Status fetch for {} failed, keeping previous status: {}",
                        order.order_id,
                        e
                    );
                }
            }
        }

        // Single state replacement; Ready is terminal.
        for order in &mut self.history {
            if order.status.is_ready() {
                continue;
            }
            if let Some(status) = updates.get(&order.order_id) {
                if *status != order.status {
                    tracing::info!("Order {} is now: {}", order.order_id, status);
                }
                order.status = *status;
            }
        }
    }

    /// Discards the order history. The ready-notification feed is a
    /// separate collaborator and is left untouched.
    pub fn clear_history(&mut self) {
        tracing::debug!("Clearing {} orders from history", self.history.len());
        self.history.clear();
    }

    /// Ready notifications relevant to this device, filtered by the serial
    /// correlation token.
    pub fn ready_orders(&self) -> Vec<ReadyOrder> {
        self.ready_feed
            .ready_orders()
            .into_iter()
            .filter(|ready| ready.serial_number.as_deref() == self.serial_number.as_deref())
            .collect()
    }

    pub fn clear_ready_orders(&self) {
        self.ready_feed.clear();
    }
}
