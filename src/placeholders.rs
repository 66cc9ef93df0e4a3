//! Placeholder token mapping
//!
//! A template document carries fixed string markers (e.g. `{{NAME}}`) that
//! the remote service replaces with user-supplied text. The tokens the
//! current form version uses are exposed as constants with builder-style
//! setters; arbitrary tokens remain supported via [`Placeholders::set`] for
//! older templates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Token replaced with the client name
pub const NAME_TOKEN: &str = "{{NAME}}";

/// Token replaced with the engagement date
pub const DATE_TOKEN: &str = "{{DATE}}";

/// Token replaced with the notice period text
pub const NOTICE_PERIOD_TOKEN: &str = "{{NOTICE_PERIOD}}";

/// Mapping from placeholder token to replacement text
///
/// Values are transmitted verbatim; empty strings are permitted. Backed by
/// a `BTreeMap` so the serialized form is deterministic, which keeps the
/// wire envelope reproducible byte for byte.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placeholders(BTreeMap<String, String>);

impl Placeholders {
    /// Create an empty placeholder map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replacement for an arbitrary token
    #[must_use]
    pub fn set(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(token.into(), value.into());
        self
    }

    /// Set the client name (`{{NAME}}`)
    #[must_use]
    pub fn client_name(self, value: impl Into<String>) -> Self {
        self.set(NAME_TOKEN, value)
    }

    /// Set the engagement date (`{{DATE}}`)
    #[must_use]
    pub fn date(self, value: impl Into<String>) -> Self {
        self.set(DATE_TOKEN, value)
    }

    /// Set the notice period text (`{{NOTICE_PERIOD}}`)
    #[must_use]
    pub fn notice_period(self, value: impl Into<String>) -> Self {
        self.set(NOTICE_PERIOD_TOKEN, value)
    }

    /// The replacement configured for `{{NAME}}`, if any
    ///
    /// Used to derive the download filename.
    #[must_use]
    pub fn get_client_name(&self) -> Option<&str> {
        self.0.get(NAME_TOKEN).map(String::as_str)
    }

    /// Number of configured tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no tokens are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over token/replacement pairs in deterministic order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
