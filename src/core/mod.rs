pub mod cart;
pub mod poller;
pub mod workflow;

pub use crate::domain::model::{MenuItem, Order, OrderLine, OrderStatus, ReadyOrder};
pub use crate::domain::ports::{ConfigProvider, MenuCatalog, OrderGateway, ReadyFeed};
pub use crate::utils::error::Result;
