//! Configuration types for docproc-client

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for [`DocumentProcessor`](crate::DocumentProcessor)
///
/// Only `endpoint` is required; everything else has a sensible default
/// matching the production gateway deployment (double-encoded envelope,
/// `x-api-key` header, 60 second deadline).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Remote processing service endpoint (full URL, POST target)
    pub endpoint: String,

    /// How the API key is attached to outgoing requests
    #[serde(default)]
    pub auth: AuthScheme,

    /// Envelope encoding depth on the wire
    #[serde(default)]
    pub encoding: EncodingDepth,

    /// Request deadline (default: 60 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Name under which the credential provider looks up the API key
    /// (default: "API_KEY")
    #[serde(default = "default_api_key_name")]
    pub api_key_name: String,

    /// Download artifact settings (filenames, collision handling)
    #[serde(default)]
    pub download: DownloadConfig,
}

impl Config {
    /// Create a configuration for the given endpoint with all defaults
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth: AuthScheme::default(),
            encoding: EncodingDepth::default(),
            request_timeout: default_request_timeout(),
            api_key_name: default_api_key_name(),
            download: DownloadConfig::default(),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint is empty or does not parse
    /// as an absolute URL.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::Config {
                message: "endpoint must not be empty".to_string(),
            });
        }
        url::Url::parse(&self.endpoint).map_err(|e| Error::Config {
            message: format!("endpoint {:?} is not a valid URL: {e}", self.endpoint),
        })?;
        Ok(())
    }
}

/// How the API key is attached to outgoing requests
///
/// The remote service expects exactly one of these depending on deployment;
/// the two are not interchangeable. This is a configuration choice, never
/// inferred.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `x-api-key: <key>` (default; matches the gateway deployment)
    #[default]
    XApiKey,
}

impl AuthScheme {
    /// Attach the credential to an outgoing request
    pub(crate) fn apply(
        &self,
        request: reqwest::RequestBuilder,
        key: &str,
    ) -> reqwest::RequestBuilder {
        match self {
            AuthScheme::Bearer => request.header("Authorization", format!("Bearer {key}")),
            AuthScheme::XApiKey => request.header("x-api-key", key),
        }
    }
}

/// Envelope encoding depth on the wire
///
/// The gateway deployment expects the payload object serialized to a string
/// and wrapped under a `body` key, with the response mirroring that shape.
/// Older deployments take the flat object and return the processed document
/// directly under `body`. Both are supported; pick the one the target
/// service actually speaks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingDepth {
    /// Flat JSON envelope; response `body` holds the base64 document directly
    Single,
    /// Envelope serialized to a string and wrapped as `{"body": <string>}`;
    /// response `body` is a JSON string containing `processed_document`
    /// (default)
    #[default]
    Double,
}

/// Download artifact configuration (filenames and collision handling)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory artifacts are saved into (default: "downloads")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Suffix appended to the client name when deriving the filename
    /// (default: "_processed")
    #[serde(default = "default_filename_suffix")]
    pub filename_suffix: String,

    /// Basename used when no client name is available
    /// (default: "processed_document")
    #[serde(default = "default_basename")]
    pub default_basename: String,

    /// What to do when the target file already exists
    #[serde(default)]
    pub file_collision: FileCollisionAction,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            filename_suffix: default_filename_suffix(),
            default_basename: default_basename(),
            file_collision: FileCollisionAction::default(),
        }
    }
}

/// File collision handling strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCollisionAction {
    /// Append (1), (2), etc. to filename (default)
    #[default]
    Rename,
    /// Overwrite existing file
    Overwrite,
    /// Skip the file, keep existing
    Skip,
}

// Default value functions
fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_api_key_name() -> String {
    "API_KEY".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_filename_suffix() -> String {
    "_processed".to_string()
}

fn default_basename() -> String {
    "processed_document".to_string()
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
