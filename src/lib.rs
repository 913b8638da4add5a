pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{ApiClient, SharedReadyFeed};
pub use crate::core::cart::Cart;
pub use crate::core::poller::StatusPoller;
pub use crate::core::workflow::CartWorkflow;
pub use crate::utils::error::{CartError, Result};
