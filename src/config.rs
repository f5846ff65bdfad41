//! Configuration handling for the TUI

use crate::state::DocumentType;
use anyhow::Result;
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Default address of the document service
const DEFAULT_SERVICE_BASE: &str = "http://127.0.0.1:5000";

/// Env override for the party directory endpoint
const DIRECTORY_URL_ENV: &str = "LEGAL_DOCS_DIRECTORY_URL";

/// Env override for where generated documents are saved
const DOWNLOAD_DIR_ENV: &str = "LEGAL_DOCS_DOWNLOAD_DIR";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Party directory endpoint
    pub directory_endpoint: String,
    /// Document type label -> generation endpoint
    pub document_endpoints: BTreeMap<String, String>,
    /// Where generated documents are written
    pub download_dir: Option<PathBuf>,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let document_endpoints = DocumentType::ALL
            .into_iter()
            .map(|t| (t.label().to_string(), default_document_endpoint(t)))
            .collect();

        Self {
            directory_endpoint: format!("{DEFAULT_SERVICE_BASE}/api/advogados"),
            document_endpoints,
            download_dir: None,
            request_timeout_secs: 30,
        }
    }
}

fn default_document_endpoint(document_type: DocumentType) -> String {
    let path = match document_type {
        DocumentType::ReceiptOfFees => "/api/gerar-recibo",
        DocumentType::PowerOfAttorney => "/api/gerar-procuracao",
    };
    format!("{DEFAULT_SERVICE_BASE}{path}")
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("br", "magna", "legal-docs-tui")
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        for label in config.document_endpoints.keys() {
            if DocumentType::from_label(label).is_none() {
                warn!(%label, "endpoint configured for unknown document type");
            }
        }
        Ok(config)
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(DIRECTORY_URL_ENV).filter(|v| !v.is_empty()) {
            self.directory_endpoint = url;
        }
        if let Some(dir) = lookup(DOWNLOAD_DIR_ENV).filter(|v| !v.is_empty()) {
            self.download_dir = Some(PathBuf::from(dir));
        }
    }

    /// Endpoint for a document type, if configured
    pub fn endpoint_for(&self, document_type: DocumentType) -> Option<&str> {
        self.document_endpoints
            .get(document_type.label())
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Resolved download directory: configured, then the user's downloads, then cwd
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(|| UserDirs::new().and_then(|d| d.download_dir().map(|p| p.to_path_buf())))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
