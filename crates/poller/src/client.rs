use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use homework_common::config::AppConfig;
use homework_common::error::TransportError;

/// Shared HTTP client; `timeout` bounds every request end to end.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// Source of homework status snapshots.
pub trait HomeworkApi {
    /// Fetch statuses changed since `from_date` (Unix seconds).
    ///
    /// The body is returned as parsed JSON without any shape checks.
    fn get_api_answer(
        &self,
        from_date: i64,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

impl<A: HomeworkApi + Sync> HomeworkApi for &A {
    fn get_api_answer(
        &self,
        from_date: i64,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send {
        (**self).get_api_answer(from_date)
    }
}

/// HTTP client for the Practicum homework statuses endpoint.
#[derive(Debug, Clone)]
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &AppConfig) -> Self {
        Self::new(client, config.endpoint.clone(), config.practicum_token.clone())
    }
}

impl HomeworkApi for PracticumClient {
    async fn get_api_answer(&self, from_date: i64) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(
                status = status.as_u16(),
                from_date,
                "Homework API returned an error status"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        tracing::info!(from_date, "Homework API answered 200 OK");
        Ok(body)
    }
}
