//! HTTP client for the directory and document-generation endpoints

use super::{DocumentService, ServiceError};
use crate::config::AppConfig;
use crate::state::PartyRecord;
use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, info, warn};

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Thin wrapper around a configured `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpDocumentService {
    http: Client,
    directory_endpoint: String,
    user_agent: String,
}

impl HttpDocumentService {
    pub fn new(config: &AppConfig) -> Result<Self, ServiceError> {
        validate_endpoint(&config.directory_endpoint)?;
        for url in config.document_endpoints.values().filter(|u| !u.is_empty()) {
            validate_endpoint(url)?;
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()
            .map_err(|e| ServiceError::Network {
                url: config.directory_endpoint.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            directory_endpoint: config.directory_endpoint.clone(),
            user_agent: format!("legal-docs-tui/{}; {}", env!("CARGO_PKG_VERSION"), std::env::consts::OS),
        })
    }

    fn network_error(url: &str, err: reqwest::Error) -> ServiceError {
        ServiceError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// Endpoints must be absolute http(s) URLs
fn validate_endpoint(url: &str) -> Result<(), ServiceError> {
    let parsed = Url::parse(url).map_err(|e| ServiceError::InvalidEndpoint {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ServiceError::InvalidEndpoint {
            url: url.to_string(),
            message: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[async_trait]
impl DocumentService for HttpDocumentService {
    async fn list_parties(&self) -> Result<Vec<PartyRecord>, ServiceError> {
        let url = self.directory_endpoint.as_str();
        debug!(%url, "fetching party directory");

        let response = self
            .http
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Self::network_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "directory request failed");
            return Err(ServiceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let parties: Vec<PartyRecord> =
            response.json().await.map_err(|e| ServiceError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        info!(count = parties.len(), "party directory loaded");
        Ok(parties)
    }

    async fn generate_document(
        &self,
        endpoint: &str,
        payload: JsonValue,
    ) -> Result<Vec<u8>, ServiceError> {
        debug!(url = %endpoint, "posting document request");

        let response = self
            .http
            .post(endpoint)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT, DOCX_MIME)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Self::network_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %endpoint, status = status.as_u16(), "document request failed");
            return Err(ServiceError::Status {
                url: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Self::network_error(endpoint, e))?;
        Ok(bytes.to_vec())
    }
}
