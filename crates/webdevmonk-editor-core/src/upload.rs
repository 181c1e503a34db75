//! Image upload client.
//!
//! Files go to the backend as `multipart/form-data` with the picked image
//! under the `image` field and the caller's bearer token attached. A
//! successful response is a JSON object whose `url` field is the stored
//! file's reference; anything else is an error.

use std::future::Future;

use miette::Diagnostic;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

use crate::types::{PickedFile, UploadedImage};

/// Multipart field carrying the file.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Error, Diagnostic)]
pub enum UploadError {
    #[error("no credential available, upload not permitted")]
    #[diagnostic(
        code(webdevmonk::upload::unauthorized),
        help("sign in again to get a fresh token")
    )]
    Unauthorized,

    #[error("upload endpoint responded with status {status}")]
    #[diagnostic(code(webdevmonk::upload::status))]
    Status { status: u16 },

    #[error("upload response did not contain a file reference")]
    #[diagnostic(code(webdevmonk::upload::missing_reference))]
    MissingReference,

    #[error("file has an unusable content type: {mime}")]
    #[diagnostic(code(webdevmonk::upload::invalid_file))]
    InvalidFile { mime: String },

    #[error("network error during upload")]
    #[diagnostic(code(webdevmonk::upload::network))]
    Network(#[from] reqwest::Error),
}

/// Everything needed to send one file.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub file: PickedFile,
    pub token: String,
    pub endpoint: String,
}

/// Sends picked files to storage.
pub trait ImageUploader {
    fn upload(
        &self,
        request: &UploadRequest,
    ) -> impl Future<Output = Result<UploadedImage, UploadError>>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    url: Option<serde_json::Value>,
}

/// Pull the file reference out of an upload response body.
pub fn parse_upload_response(body: &str) -> Result<UploadedImage, UploadError> {
    let response: UploadResponse =
        serde_json::from_str(body).map_err(|_| UploadError::MissingReference)?;
    match response.url {
        Some(serde_json::Value::String(reference)) if !reference.trim().is_empty() => {
            Ok(UploadedImage { reference })
        }
        _ => Err(UploadError::MissingReference),
    }
}

/// `reqwest`-backed uploader. Works natively and on wasm.
#[derive(Debug, Clone, Default)]
pub struct HttpUploader {
    client: reqwest::Client,
}

impl HttpUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn form(file: &PickedFile) -> Result<Form, UploadError> {
        let part = Part::bytes(file.data.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|_| UploadError::InvalidFile {
                mime: file.mime_type.clone(),
            })?;
        Ok(Form::new().part(IMAGE_FIELD, part))
    }
}

impl ImageUploader for HttpUploader {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadedImage, UploadError> {
        if request.token.is_empty() {
            return Err(UploadError::Unauthorized);
        }

        tracing::debug!(
            target: "webdevmonk::upload",
            endpoint = %request.endpoint,
            file = %request.file.name,
            size = request.file.data.len(),
            "uploading image"
        );

        let response = self
            .client
            .post(&request.endpoint)
            .bearer_auth(&request.token)
            .multipart(Self::form(&request.file)?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let uploaded = parse_upload_response(&body)?;
        tracing::debug!(
            target: "webdevmonk::upload",
            reference = %uploaded.reference,
            "image uploaded"
        );
        Ok(uploaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference() {
        let uploaded = parse_upload_response(r#"{"url":"abc123.png","size":10}"#).unwrap();
        assert_eq!(uploaded.reference, "abc123.png");
    }

    #[test]
    fn rejects_missing_or_empty_reference() {
        for body in [
            r#"{}"#,
            r#"{"url":""}"#,
            r#"{"url":null}"#,
            r#"{"url":42}"#,
            r#"{"message":"ok"}"#,
            "not json",
            "",
        ] {
            assert!(
                matches!(
                    parse_upload_response(body),
                    Err(UploadError::MissingReference)
                ),
                "body {body:?} should be rejected"
            );
        }
    }

    #[test]
    fn diagnostic_codes() {
        let err = UploadError::Status { status: 500 };
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("webdevmonk::upload::status")
        );
        assert_eq!(err.to_string(), "upload endpoint responded with status 500");
    }

    #[test]
    fn invalid_mime_is_reported() {
        let file = PickedFile::new("x.png", Some("not a mime".into()), vec![1u8]);
        assert!(matches!(
            HttpUploader::form(&file),
            Err(UploadError::InvalidFile { .. })
        ));
    }
}
