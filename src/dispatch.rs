//! Submission: build the payload, POST it, save the returned document

use crate::config::AppConfig;
use crate::service::{DocumentService, ServiceError};
use crate::state::{DocumentType, PartyRecord, ValidatedForm};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::path::{Path, PathBuf};
use tracing::info;

/// Merge party fields and validated form values into one JSON object.
///
/// Party fields go first so that values the user edited after auto-fill win
/// on shared keys.
pub fn build_payload(form: &ValidatedForm, party: &PartyRecord) -> JsonValue {
    let mut body = JsonMap::new();
    for (key, value) in party.form_values() {
        body.insert(key.to_string(), JsonValue::String(value.to_string()));
    }
    for (key, value) in &form.auto_filled {
        body.insert(key.clone(), JsonValue::String(value.clone()));
    }
    for (key, value) in &form.values {
        body.insert((*key).to_string(), value.to_json());
    }
    JsonValue::Object(body)
}

/// `"{label} - {client name}.docx"` with path separators and reserved characters replaced
pub fn download_filename(document_type: DocumentType, client_name: &str) -> String {
    let client: String = client_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{} - {}.docx", document_type.label(), client)
}

/// Write the document into `dir`, creating it if needed
pub async fn save_download(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, ServiceError> {
    let path = dir.join(filename);
    let write_err = |source| ServiceError::Write {
        path: path.clone(),
        source,
    };
    tokio::fs::create_dir_all(dir).await.map_err(write_err)?;
    tokio::fs::write(&path, bytes).await.map_err(write_err)?;
    Ok(path)
}

/// Send one validated submission and save the resulting file
pub async fn submit(
    service: &dyn DocumentService,
    config: &AppConfig,
    form: &ValidatedForm,
    party: &PartyRecord,
) -> Result<PathBuf, ServiceError> {
    let document_type = form.document_type;
    let endpoint = config
        .endpoint_for(document_type)
        .ok_or(ServiceError::MissingEndpoint(document_type.label()))?;

    info!(document = document_type.label(), %endpoint, "submitting document request");
    let bytes = service
        .generate_document(endpoint, build_payload(form, party))
        .await?;
    if bytes.is_empty() {
        return Err(ServiceError::EmptyDocument);
    }

    let filename = download_filename(document_type, form.client_name());
    let path = save_download(&config.resolved_download_dir(), &filename, &bytes).await?;
    info!(path = %path.display(), size = bytes.len(), "document saved");
    Ok(path)
}
