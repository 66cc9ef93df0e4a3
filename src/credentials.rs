//! Credential lookup for the remote processing service
//!
//! The orchestrator only consumes API keys, it never manages their
//! lifecycle. The seam is a small async trait so embedders can plug in a
//! real secret store; [`EnvCredentials`] covers the common case of keys
//! injected through the process environment.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Supplies API keys by name
///
/// Implementations must never log the returned value.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Look up the credential registered under `name`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credential`] if no credential is registered under
    /// that name or the backing store is unavailable.
    async fn get(&self, name: &str) -> Result<String>;
}

/// Credential provider backed by the process environment
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvCredentials;

#[async_trait]
impl CredentialProvider for EnvCredentials {
    async fn get(&self, name: &str) -> Result<String> {
        std::env::var(name).map_err(|e| Error::Credential {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}

/// In-memory credential provider, for embedding and tests
#[derive(Clone, Debug, Default)]
pub struct StaticCredentials {
    entries: HashMap<String, String>,
}

impl StaticCredentials {
    /// Create an empty provider
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a credential under the given name
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn get(&self, name: &str) -> Result<String> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| Error::Credential {
                name: name.to_string(),
                reason: "not registered".to_string(),
            })
    }
}
