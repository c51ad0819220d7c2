use contracts::domain::a001_log_source::{CreateSourceDto, Source};
use gloo_net::http::Request;

use super::errors::CreateSourceError;
use crate::shared::api_utils::{api_url, auth_header};

const SOURCES_PATH: &str = "/api/sources/";

/// Fetch all sources visible to the current user
pub async fn fetch_sources() -> Result<Vec<Source>, String> {
    let mut request = Request::get(&api_url(SOURCES_PATH));
    if let Some(header) = auth_header() {
        request = request.header("Authorization", &header);
    }

    let response = request
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch sources: {}", response.status()));
    }

    response
        .json::<Vec<Source>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Register a new source.
///
/// Issues exactly one request; there is no retry and no timeout beyond the
/// browser's own.
pub async fn create_source(dto: &CreateSourceDto) -> Result<Source, CreateSourceError> {
    let mut request = Request::post(&api_url(SOURCES_PATH));
    if let Some(header) = auth_header() {
        request = request.header("Authorization", &header);
    }

    let request = request.json(dto).map_err(|e| {
        log::warn!("Failed to serialize create source request: {}", e);
        CreateSourceError::Transport
    })?;

    let response = request.send().await.map_err(|e| {
        log::warn!("Create source request got no response: {}", e);
        CreateSourceError::Transport
    })?;

    let status = response.status();
    if !response.ok() {
        let body = response.text().await.ok();
        return Err(CreateSourceError::classify(Some(status), body.as_deref()));
    }

    response.json::<Source>().await.map_err(|e| {
        log::warn!("Failed to parse created source: {}", e);
        CreateSourceError::Server { status }
    })
}
