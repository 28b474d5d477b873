//! imgflip `caption_image` API client
//!
//! Submits top/bottom text for a template and returns the URL of the captioned
//! image. Image rendering happens entirely on imgflip's side.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::Template;
use crate::config::{Credentials, CredentialsError, DEFAULT_API_BASE};

/// Errors that can occur when captioning a template
#[derive(Debug, Error)]
pub enum CaptionError {
    /// Username or password not configured
    #[error(transparent)]
    MissingCredential(#[from] CredentialsError),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx status whose body carried no usable answer
    #[error("HTTP request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Response body was not valid JSON
    #[error("Failed to parse JSON response: {0}")]
    Parse(serde_json::Error),

    /// Response was JSON but missing expected fields
    #[error("Unexpected caption_image response: {0}")]
    RemoteFormat(String),

    /// imgflip declined the request; carries the service's message verbatim
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Deserialize)]
struct CaptionResponse {
    success: bool,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    data: Option<CaptionData>,
}

#[derive(Debug, Deserialize)]
struct CaptionData {
    url: String,
}

/// Client for the imgflip captioning endpoint
#[derive(Debug, Clone)]
pub struct CaptionClient {
    http_client: Client,
    base_url: String,
}

impl Default for CaptionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptionClient {
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
        format!("{}/caption_image", self.base_url)
    }

    /// Captions `template` using credentials from the environment
    ///
    /// Fails with [`CaptionError::MissingCredential`] before any request is
    /// made if `IMGFLIP_USERNAME` or `IMGFLIP_PASSWORD` is unset.
    pub async fn generate(
        &self,
        template: &Template,
        top_text: &str,
        bottom_text: &str,
    ) -> Result<String, CaptionError> {
        let credentials = Credentials::from_env()?;
        self.generate_with(&credentials, template, top_text, bottom_text)
            .await
    }

    /// Captions `template` with explicit credentials and returns the image URL
    pub async fn generate_with(
        &self,
        credentials: &Credentials,
        template: &Template,
        top_text: &str,
        bottom_text: &str,
    ) -> Result<String, CaptionError> {
        let form = [
            ("template_id", template.id.as_str()),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("text0", top_text),
            ("text1", bottom_text),
        ];

        let response = self
            .http_client
            .post(self.endpoint())
            .form(&form)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        // imgflip may explain a failure in the body of an error status
        match parse_caption_response(&text) {
            Err(CaptionError::Parse(_) | CaptionError::RemoteFormat(_)) if !status.is_success() => {
                Err(CaptionError::HttpStatus(status))
            }
            result => result,
        }
    }
}

/// Extracts the image URL from a `caption_image` response body.
pub fn parse_caption_response(body: &str) -> Result<String, CaptionError> {
    let response: CaptionResponse = serde_json::from_str(body).map_err(|e| {
        if e.is_data() {
            CaptionError::RemoteFormat(e.to_string())
        } else {
            CaptionError::Parse(e)
        }
    })?;

    if !response.success {
        return Err(match response.error_message {
            Some(message) => CaptionError::Rejected(message),
            None => CaptionError::RemoteFormat(
                "unsuccessful response without `error_message`".to_string(),
            ),
        });
    }

    response
        .data
        .map(|data| data.url)
        .ok_or_else(|| CaptionError::RemoteFormat("missing `data.url`".to_string()))
}
