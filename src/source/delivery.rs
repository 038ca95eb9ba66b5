// src/source/delivery.rs

//! Delivery API client for the hosted CMS.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::CmsConfig;
use crate::source::{ContentSource, EntryCollection, EntryQuery};
use crate::utils::http::create_async_client;

/// Read-only client for `GET /spaces/{space}/environments/{env}/entries`.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    client: Client,
    entries_url: Url,
    access_token: String,
    default_limit: usize,
}

/// Error body returned by the API (`{"sys": {"id": "unknownContentType"}, "message": ..}`).
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    sys: ApiErrorSys,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorSys {
    #[serde(default)]
    id: String,
}

impl DeliveryClient {
    /// Create a client from CMS settings.
    pub fn new(config: &CmsConfig) -> Result<Self> {
        let client = create_async_client(config)?;
        Self::with_client(client, config)
    }

    /// Create a client around an existing HTTP client.
    pub fn with_client(client: Client, config: &CmsConfig) -> Result<Self> {
        if config.space_id.trim().is_empty() {
            return Err(AppError::config("cms.space_id is required"));
        }

        let entries_url = Self::entries_url(config)?;
        Ok(Self {
            client,
            entries_url,
            access_token: config.access_token.clone(),
            default_limit: config.fetch_limit,
        })
    }

    fn entries_url(config: &CmsConfig) -> Result<Url> {
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let path = format!(
            "spaces/{}/environments/{}/entries",
            config.space_id, config.environment
        );
        Ok(Url::parse(&base)?.join(&path)?)
    }

    /// Translate a query into request parameters.
    fn query_params(&self, query: &EntryQuery) -> Vec<(String, String)> {
        let mut params = vec![
            ("content_type".to_string(), query.content_type.clone()),
            ("include".to_string(), query.include.to_string()),
            (
                "limit".to_string(),
                query.limit.unwrap_or(self.default_limit).to_string(),
            ),
        ];

        if let Some(order) = &query.order {
            params.push(("order".to_string(), order.clone()));
        }
        for (field, value) in &query.field_equals {
            params.push((format!("fields.{field}"), value.clone()));
        }

        params
    }
}

#[async_trait]
impl ContentSource for DeliveryClient {
    fn name(&self) -> &'static str {
        "contentful"
    }

    async fn entries(&self, query: &EntryQuery) -> Result<EntryCollection> {
        log::debug!(
            "Fetching {} (filters: {:?})",
            query.content_type,
            query.field_equals
        );

        let response = self
            .client
            .get(self.entries_url.clone())
            .bearer_auth(&self.access_token)
            .query(&self.query_params(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiError>(&body) {
                Ok(err) if !err.sys.id.is_empty() => format!("{} ({})", err.sys.id, err.message),
                _ => format!("HTTP {status}"),
            };
            return Err(AppError::content(&query.content_type, message));
        }

        Ok(response.json::<EntryCollection>().await?)
    }
}
