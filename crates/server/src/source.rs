//! Data source client
//!
//! Fetches the four collections served by the mock REST backend
//! (json-server): `/readings`, `/machines`, `/alerts`,
//! `/recommendations`. Payloads are JSON arrays; anything else is a
//! decode error surfaced to the refresh loop, never to the pure core.

use crate::state::Snapshot;
use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Errors raised while fetching a snapshot.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid source URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request for {collection} failed: {source}")]
    Request {
        collection: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("source returned {status} for {collection}")]
    Status {
        collection: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("invalid {collection} payload: {source}")]
    Decode {
        collection: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Seam for snapshot providers, mockable in refresh-loop tests.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Snapshot, SourceError>;
}

/// REST client for the mock backend.
pub struct RestSource {
    client: reqwest::Client,
    base_url: Url,
}

impl RestSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|source| SourceError::Request {
                collection: "client",
                source,
            })?;
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    async fn fetch_collection<T: DeserializeOwned>(
        &self,
        collection: &'static str,
    ) -> Result<Vec<T>, SourceError> {
        let url = self.base_url.join(collection)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SourceError::Request { collection, source })?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                collection,
                status: response.status(),
            });
        }

        response
            .json()
            .await
            .map_err(|source| SourceError::Decode { collection, source })
    }
}

#[async_trait]
impl DataSource for RestSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot, SourceError> {
        let readings = self.fetch_collection("readings").await?;
        let machines = self.fetch_collection("machines").await?;
        let alerts = self.fetch_collection("alerts").await?;
        let recommendations = self.fetch_collection("recommendations").await?;

        Ok(Snapshot {
            readings,
            machines,
            alerts,
            recommendations,
            fetched_at: Some(Utc::now()),
        })
    }
}
