//! Common test utilities for docproc-client integration tests

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use docproc_client::{Config, DocumentProcessor, Placeholders, StaticCredentials};
use std::sync::Arc;
use wiremock::MockServer;

/// Minimal docx header bytes used as the test document
pub const DOCX_HEADER: &[u8] = b"PK\x03\x04...";

/// API key registered with the test credential provider
pub const TEST_API_KEY: &str = "integration-test-key";

/// The processing endpoint path served by the mock service
pub const PROCESS_PATH: &str = "/prod/process_document";

/// Build a processor pointed at the given mock server, with config tweaks
#[allow(dead_code)]
pub fn processor_for(server: &MockServer, tweak: impl FnOnce(&mut Config)) -> DocumentProcessor {
    let mut config = Config::new(format!("{}{}", server.uri(), PROCESS_PATH));
    tweak(&mut config);
    let credentials = Arc::new(StaticCredentials::new().with("API_KEY", TEST_API_KEY));
    DocumentProcessor::new(config, credentials).expect("processor construction failed")
}

/// The placeholder set of the current form version
#[allow(dead_code)]
pub fn standard_placeholders() -> Placeholders {
    Placeholders::new()
        .client_name("Acme")
        .date("2024-01-01")
        .notice_period("sixty (60)")
}

/// A well-formed double-encoded success body carrying `payload`
#[allow(dead_code)]
pub fn double_encoded_success(payload: &[u8]) -> serde_json::Value {
    let inner = serde_json::json!({ "processed_document": BASE64.encode(payload) }).to_string();
    serde_json::json!({ "body": inner })
}

/// A well-formed single-encoded success body carrying `payload`
#[allow(dead_code)]
pub fn single_encoded_success(payload: &[u8]) -> serde_json::Value {
    serde_json::json!({ "body": BASE64.encode(payload) })
}
