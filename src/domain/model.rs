use serde::{Deserialize, Serialize};

/// One entry of the menu catalog. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One priced, quantified menu item within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub total: f64,
}

impl OrderLine {
    pub fn new(name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
            total: price * quantity as f64,
        }
    }
}

/// Sum of line totals. The order-acceptance service computes the same sum
/// from the same lines; the two must agree.
pub fn order_total(lines: &[OrderLine]) -> f64 {
    lines.iter().map(|line| line.total).sum()
}

/// POST body for the order-acceptance service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub user_email: String,
    pub items: Vec<OrderLine>,
    pub order_id: String,
    #[serde(default)]
    pub serial_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Ready,
}

impl OrderStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, OrderStatus::Ready)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "We are preparing your order"),
            OrderStatus::Ready => write!(f, "Order ready"),
        }
    }
}

/// A submitted order as tracked locally. Appended to the order history at
/// submission time; the status only ever advances Pending -> Ready.
#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: String,
    pub user_email: String,
    pub serial_number: Option<String>,
    pub items: Vec<OrderLine>,
    pub status: OrderStatus,
}

impl Order {
    pub fn total(&self) -> f64 {
        order_total(&self.items)
    }
}

/// Wire shape of an order as returned by the history and status services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_id: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

/// One entry of the ready-notification feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyOrder {
    pub order_id: String,
    pub serial_number: Option<String>,
}
