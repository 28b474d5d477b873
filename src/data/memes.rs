//! imgflip `get_memes` API client
//!
//! Fetches the list of popular meme templates. The response envelope is
//! validated before anything is handed back, so a malformed response can
//! never end up in the local cache.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::Template;
use crate::config::DEFAULT_API_BASE;

/// Errors that can occur when fetching the template list
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx status whose body carried no usable answer
    #[error("HTTP request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Response body was not valid JSON
    #[error("Failed to parse JSON response: {0}")]
    Parse(serde_json::Error),

    /// Response was JSON but not shaped like a template list
    #[error("Unexpected get_memes response: {0}")]
    RemoteFormat(String),

    /// The service reported a failure
    #[error("imgflip rejected the request: {0}")]
    Rejected(String),
}

/// `{ success, error_message?, data?: { memes: [...] } }`
#[derive(Debug, Deserialize)]
struct MemesEnvelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    data: Option<MemesData>,
}

#[derive(Debug, Deserialize)]
struct MemesData {
    memes: Vec<Value>,
}

/// Client for the imgflip template list endpoint
#[derive(Debug, Clone)]
pub struct MemesClient {
    http_client: Client,
    base_url: String,
}

impl Default for MemesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MemesClient {
    /// Creates a client against the public imgflip API
    pub fn new() -> Self {
        Self::with_client(Client::new(), DEFAULT_API_BASE)
    }

    /// Creates a client with a custom HTTP client and base URL
    pub fn with_client(http_client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/get_memes", self.base_url)
    }

    /// Fetches the template list
    ///
    /// Returns the raw `memes` array entries, each already checked to
    /// deserialize as a [`Template`]. Unknown keys are kept so the entries can
    /// be written to the cache verbatim.
    pub async fn fetch_memes(&self) -> Result<Vec<Value>, FetchError> {
        let response = self.http_client.get(self.endpoint()).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match parse_memes_response(&text) {
            Err(FetchError::Parse(_) | FetchError::RemoteFormat(_)) if !status.is_success() => {
                Err(FetchError::HttpStatus(status))
            }
            result => result,
        }
    }
}

/// Validates a `get_memes` response body and extracts the `memes` array.
pub fn parse_memes_response(body: &str) -> Result<Vec<Value>, FetchError> {
    let envelope: MemesEnvelope = serde_json::from_str(body).map_err(|e| {
        if e.is_data() {
            FetchError::RemoteFormat(e.to_string())
        } else {
            FetchError::Parse(e)
        }
    })?;

    if envelope.success == Some(false) {
        return Err(FetchError::Rejected(
            envelope
                .error_message
                .unwrap_or_else(|| "no error message given".to_string()),
        ));
    }

    let data = envelope
        .data
        .ok_or_else(|| FetchError::RemoteFormat("missing `data` object".to_string()))?;

    for (index, entry) in data.memes.iter().enumerate() {
        Template::deserialize(entry)
            .map_err(|e| FetchError::RemoteFormat(format!("meme #{}: {}", index, e)))?;
    }

    Ok(data.memes)
}
