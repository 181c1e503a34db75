//! Backend location for uploads and uploaded images.
//!
//! The base URL is kept without a trailing slash however it was supplied,
//! so the derived endpoints never contain `//`.

use serde::{Deserialize, Deserializer};
use std::env;

/// Environment variable holding the backend base URL.
pub const API_URL_VAR: &str = "WEBDEVMONK_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:7000";

/// Editor configuration shared by the upload client and image link builder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditorConfig {
    /// Backend base URL, without trailing slash.
    #[serde(default = "default_api_url", deserialize_with = "base_url")]
    pub api_base_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn base_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|url| normalize(&url))
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl EditorConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize(&api_base_url.into()),
        }
    }

    /// Read the base URL from the process environment, then from the value
    /// baked in at compile time (the only option on wasm), then the default.
    pub fn from_env() -> Self {
        let url = env::var(API_URL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| option_env!("WEBDEVMONK_API_URL").map(str::to_string))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_api_url);
        Self::new(url)
    }

    /// Multipart upload endpoint.
    pub fn upload_endpoint(&self) -> String {
        format!("{}/upload", self.api_base_url)
    }

    /// Displayable URL for an uploaded file reference.
    pub fn image_url(&self, reference: &str) -> String {
        format!(
            "{}/uploads/{}",
            self.api_base_url,
            reference.trim_start_matches('/')
        )
    }
}
