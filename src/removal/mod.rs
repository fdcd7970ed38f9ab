//! Background removal collaborators.

use std::time::Duration;

use crate::foundation::error::{BadgeError, BadgeResult};

/// Endpoint used when no other endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.remove.bg/v1.0/removebg";

/// Environment variable holding the removal service API key.
pub const API_KEY_ENV: &str = "REMOVE_BG_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Turns a photo into a cut-out with a transparent background.
///
/// Input and output are encoded image bytes. An `Err` means "no cutout"; what happens next is
/// the caller's [`RemovalFallback`](crate::RemovalFallback).
pub trait BackgroundRemover {
    /// Remove the background of `photo`.
    fn remove(&self, photo: &[u8]) -> BadgeResult<Vec<u8>>;
}

impl<F> BackgroundRemover for F
where
    F: Fn(&[u8]) -> BadgeResult<Vec<u8>>,
{
    fn remove(&self, photo: &[u8]) -> BadgeResult<Vec<u8>> {
        self(photo)
    }
}

/// Remover that hands the photo back unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl BackgroundRemover for Passthrough {
    fn remove(&self, photo: &[u8]) -> BadgeResult<Vec<u8>> {
        Ok(photo.to_vec())
    }
}

/// Blocking HTTP client for a remove.bg-compatible service.
///
/// Sends one multipart POST per photo: an `image_file` part named `upload.png` plus
/// `size=auto`, authenticated with the `X-Api-Key` header. The response body is the cut-out.
#[derive(Clone)]
pub struct RemoveBgClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for RemoveBgClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoveBgClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl RemoveBgClient {
    /// Client for [`DEFAULT_ENDPOINT`] using `api_key`.
    pub fn new(api_key: impl Into<String>) -> BadgeResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BadgeError::validation("removal api key must be non-empty"));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BadgeError::removal(format!("build http client: {e}")))?;
        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
        })
    }

    /// Client keyed from [`API_KEY_ENV`].
    pub fn from_env() -> BadgeResult<Self> {
        let key = std::env::var(API_KEY_ENV)
            .map_err(|_| BadgeError::validation(format!("{API_KEY_ENV} is not set")))?;
        Self::new(key)
    }

    /// Same client posting to `endpoint`.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl BackgroundRemover for RemoveBgClient {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint, bytes = photo.len()))]
    fn remove(&self, photo: &[u8]) -> BadgeResult<Vec<u8>> {
        if photo.is_empty() {
            return Err(BadgeError::removal("photo is empty"));
        }

        let part = reqwest::blocking::multipart::Part::bytes(photo.to_vec())
            .file_name("upload.png")
            .mime_str("image/png")
            .map_err(|e| BadgeError::removal(format!("build multipart part: {e}")))?;
        let form = reqwest::blocking::multipart::Form::new()
            .part("image_file", part)
            .text("size", "auto");

        let resp = self
            .http
            .post(&self.endpoint)
            .header("X-Api-Key", &self.api_key)
            .multipart(form)
            .send()
            .map_err(|e| BadgeError::removal(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let detail: String = body.chars().take(200).collect();
            return Err(BadgeError::removal(format!(
                "service returned {status}: {}",
                detail.trim()
            )));
        }

        let bytes = resp
            .bytes()
            .map_err(|e| BadgeError::removal(format!("read response body: {e}")))?;
        if bytes.is_empty() {
            return Err(BadgeError::removal("service returned an empty body"));
        }
        tracing::debug!(cutout_bytes = bytes.len(), "background removed");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/removal/mod.rs"]
mod tests;
