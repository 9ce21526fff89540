//! HTTP client for the dance center REST backend

use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use super::Resource;
use crate::config::ApiConfig;
use crate::models::{EntityId, ScheduleItem};
use crate::utils::error::ApiError;

/// Client for the REST backend
///
/// No retries: a failed call is reported once and the user re-triggers it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` for a base URL that does not parse and
    /// `ApiError::Init` if the HTTP client cannot be created
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim_end_matches('/');
        Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .gzip(true)
            .build()
            .map_err(|e| ApiError::Init(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.to_string(),
        })
    }

    /// Create a client with default settings against `base_url`
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// `GET /{path}`
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let url = self.url(R::PATH);
        let body = self.send::<()>(Method::GET, &url, None).await?;
        decode_required(&url, body)
    }

    /// `GET /{path}/:id`
    pub async fn get<R: Resource>(&self, id: EntityId) -> Result<R, ApiError> {
        let url = self.url(&format!("{}/{id}", R::PATH));
        let body = self.send::<()>(Method::GET, &url, None).await?;
        decode_required(&url, body)
    }

    /// `POST /{path}`; `None` when the backend answers without a body
    pub async fn create<R: Resource>(&self, payload: &R::Payload) -> Result<Option<R>, ApiError> {
        let url = self.url(R::PATH);
        let body = self.send(Method::POST, &url, Some(payload)).await?;
        decode_optional(&url, body)
    }

    /// `PUT /{path}/:id`; `None` when the backend answers without a body
    pub async fn update<R: Resource>(
        &self,
        id: EntityId,
        payload: &R::Payload,
    ) -> Result<Option<R>, ApiError> {
        let url = self.url(&format!("{}/{id}", R::PATH));
        let body = self.send(Method::PUT, &url, Some(payload)).await?;
        decode_optional(&url, body)
    }

    /// `DELETE /{path}/:id`
    pub async fn delete<R: Resource>(&self, id: EntityId) -> Result<(), ApiError> {
        let url = self.url(&format!("{}/{id}", R::PATH));
        self.send::<()>(Method::DELETE, &url, None).await?;
        Ok(())
    }

    /// `GET /schedule_item/group/:groupId`
    pub async fn schedule_items_by_group(
        &self,
        group_id: EntityId,
    ) -> Result<Vec<ScheduleItem>, ApiError> {
        let url = self.url(&format!("{}/group/{group_id}", ScheduleItem::PATH));
        let body = self.send::<()>(Method::GET, &url, None).await?;
        decode_required(&url, body)
    }

    // Internal: issue one request; `None` for 204 or an empty body
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Option<String>, ApiError> {
        tracing::debug!(method = %method, url = %url, "API request");

        let mut request = self.http_client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(method = %method, url = %url, error = %e, "Network error");
            ApiError::Network {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        tracing::debug!(method = %method, url = %url, status = status.as_u16(), "API response");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = ApiError::from_response(status, text);
            tracing::warn!(method = %method, url = %url, status = status.as_u16(), error = %err, "API error");
            return Err(err);
        }

        if status == StatusCode::NO_CONTENT || response.content_length() == Some(0) {
            return Ok(None);
        }

        let text = response.text().await.map_err(|e| ApiError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok((!text.trim().is_empty()).then_some(text))
    }
}

fn decode_optional<T: DeserializeOwned>(url: &str, body: Option<String>) -> Result<Option<T>, ApiError> {
    body.map(|text| {
        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    })
    .transpose()
}

fn decode_required<T: DeserializeOwned>(url: &str, body: Option<String>) -> Result<T, ApiError> {
    decode_optional(url, body)?.ok_or_else(|| ApiError::Decode {
        url: url.to_string(),
        message: "empty response body".to_string(),
    })
}
