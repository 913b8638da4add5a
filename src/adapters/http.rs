use crate::domain::model::{MenuItem, OrderPayload, OrderRecord};
use crate::domain::ports::{MenuCatalog, OrderGateway};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// reqwest-backed client for the menu, order, history and status endpoints.
/// One remote collaborator serves all four, so one adapter implements both
/// ports.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl MenuCatalog for ApiClient {
    async fn fetch_menu(&self, user_email: &str) -> Result<Vec<MenuItem>> {
        let url = self.url("/api/menuItems");
        tracing::debug!("GET {} for {}", url, user_email);

        let response = self
            .client
            .get(url)
            .query(&[("userEmail", user_email)])
            .send()
            .await?
            .error_for_status()?;

        let items = response.json::<Vec<MenuItem>>().await?;
        Ok(items)
    }
}

#[async_trait]
impl OrderGateway for ApiClient {
    async fn submit_order(&self, payload: &OrderPayload) -> Result<()> {
        let url = self.url("/api/orders");
        tracing::debug!("POST {} order {}", url, payload.order_id);

        self.client
            .post(url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn fetch_history(&self, user_email: &str) -> Result<Vec<OrderRecord>> {
        let url = self.url("/api/orders/history");
        tracing::debug!("GET {} for {}", url, user_email);

        let response = self
            .client
            .get(url)
            .query(&[("userEmail", user_email)])
            .send()
            .await?
            .error_for_status()?;

        let records = response.json::<Vec<OrderRecord>>().await?;
        Ok(records)
    }

    async fn fetch_status(&self, order_id: &str) -> Result<Option<OrderRecord>> {
        let url = self.url(&format!("/api/orders/{}", order_id));
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        // 404 是資料不是錯誤：代表訂單已離開等待佇列
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let record = response.error_for_status()?.json::<OrderRecord>().await?;
        Ok(Some(record))
    }
}
