//! How the form reaches the record service.

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::ErrorBody;
use crate::record::{NewRecord, Record};

/// Failure to get a record stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server rejected the record ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        error: String,
    },

    /// The server reported success but the body was not a record.
    #[error("unreadable response: {0}")]
    Decode(String),
}

/// Sends one record to the record service.
#[async_trait]
pub trait RecordTransport: Send + Sync {
    async fn submit(&self, record: &NewRecord) -> Result<Record, TransportError>;
}

/// Posts records as JSON to `<base_url>/api/records`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/records", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecordTransport for HttpTransport {
    async fn submit(&self, record: &NewRecord) -> Result<Record, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<Record>()
                .await
                .map_err(|e| TransportError::Decode(e.to_string()));
        }

        let (message, error) = match response.json::<ErrorBody>().await {
            Ok(body) => (body.message, body.error),
            Err(e) => (
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
                e.to_string(),
            ),
        };
        Err(TransportError::Rejected {
            status: status.as_u16(),
            message,
            error,
        })
    }
}
