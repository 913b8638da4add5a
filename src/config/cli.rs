use crate::config::toml_config::{
    DEFAULT_POLL_INTERVAL_SECONDS, DEFAULT_REQUEST_TIMEOUT_SECONDS,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "menu-cart")]
#[command(about = "Browse a user's menu, build a cart, submit and track orders")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:5000")]
    pub api_base: String,

    #[arg(long, default_value = "")]
    pub user_email: String,

    #[arg(long, help = "Device serial token for ready-notification filtering")]
    pub serial: Option<String>,

    /// Item selections, repeatable: --item <MENU_ITEM_ID>=<QUANTITY>
    #[arg(long = "item", value_name = "ID=QTY")]
    pub items: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECONDS)]
    pub poll_interval_seconds: u64,

    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECONDS)]
    pub request_timeout_seconds: u64,

    #[arg(long, help = "Keep polling until every submitted order is ready")]
    pub watch: bool,

    #[arg(long, help = "Load service/user/polling settings from a TOML file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 解析 --item ID=QTY 選項
    pub fn parse_selections(&self) -> Result<Vec<(String, u32)>> {
        self.items
            .iter()
            .map(|raw| {
                let (id, qty) =
                    raw.split_once('=')
                        .ok_or_else(|| CartError::InvalidConfigValueError {
                            field: "item".to_string(),
                            value: raw.clone(),
                            reason: "Expected <MENU_ITEM_ID>=<QUANTITY>".to_string(),
                        })?;
                let quantity: u32 = qty.parse().map_err(|_| CartError::InvalidConfigValueError {
                    field: "item".to_string(),
                    value: raw.clone(),
                    reason: "Quantity must be a non-negative integer".to_string(),
                })?;
                Ok((id.to_string(), quantity))
            })
            .collect()
    }
}

impl ConfigProvider for CliConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn user_email(&self) -> &str {
        &self.user_email
    }

    fn serial_number(&self) -> Option<&str> {
        self.serial.as_deref()
    }

    fn poll_interval_seconds(&self) -> u64 {
        self.poll_interval_seconds
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_url("api_base", &self.api_base)?;
        crate::utils::validation::validate_non_empty_string("user_email", &self.user_email)?;
        crate::utils::validation::validate_positive_number(
            "poll_interval_seconds",
            self.poll_interval_seconds,
            1,
        )?;
        crate::utils::validation::validate_range(
            "request_timeout_seconds",
            self.request_timeout_seconds,
            1,
            300,
        )?;
        self.parse_selections()?;
        Ok(())
    }
}
