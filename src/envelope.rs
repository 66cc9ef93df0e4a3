//! Request/response envelopes for the remote processing service
//!
//! This is the external contract and must be matched bit for bit. The
//! request is `{"file": <base64>, "placeholders": {token: value, ...}}`;
//! depending on [`EncodingDepth`] that object either goes on the wire as-is
//! or is first serialized to a string and wrapped under a `body` key. The
//! response mirrors the chosen depth:
//!
//! - `Single`: `{"body": "<base64 of the processed document>"}`
//! - `Double`: `{"body": "{\"processed_document\": \"<base64>\"}"}`
//!
//! Any missing or mistyped key at any nesting level is a distinct,
//! reportable [`Error::ResponseShape`], never a panic.

use crate::config::EncodingDepth;
use crate::error::{Error, Result};
use crate::placeholders::Placeholders;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

/// Serializable request envelope
///
/// Field order matters: the service's gateway integration was captured with
/// `file` before `placeholders`, and serde_json emits struct fields in
/// declaration order.
#[derive(Debug, Serialize)]
struct RequestEnvelope<'a> {
    /// Base64-encoded document bytes
    file: String,
    /// Placeholder token → replacement text
    placeholders: &'a Placeholders,
}

/// Wrapper used by the double-encoded wire shape
#[derive(Debug, Serialize)]
struct BodyWrapper {
    /// The inner envelope, pre-serialized to a JSON string
    body: String,
}

/// Build the JSON request body for one submission
///
/// Encodes the document as base64 and serializes the envelope at the given
/// depth. The result is the exact byte string to POST.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if JSON serialization fails (it cannot
/// for these types in practice, but the error path is propagated rather
/// than unwrapped).
pub fn encode_request(
    document: &[u8],
    placeholders: &Placeholders,
    depth: EncodingDepth,
) -> Result<String> {
    let envelope = RequestEnvelope {
        file: BASE64.encode(document),
        placeholders,
    };
    let inner = serde_json::to_string(&envelope)?;

    match depth {
        EncodingDepth::Single => Ok(inner),
        EncodingDepth::Double => Ok(serde_json::to_string(&BodyWrapper { body: inner })?),
    }
}

/// Decode a 200 response body into the processed document bytes
///
/// # Errors
///
/// Returns [`Error::ResponseShape`] when the text is not JSON, when `body`
/// (or `processed_document` in double mode) is missing or not a string, or
/// when the payload is not valid base64. The offending fragment is carried
/// for diagnostics.
pub fn decode_response(text: &str, depth: EncodingDepth) -> Result<Vec<u8>> {
    let outer: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| Error::shape(format!("response is not valid JSON: {e}"), text))?;

    let body = outer
        .get("body")
        .ok_or_else(|| Error::shape("missing 'body' key", text))?;
    let body = body
        .as_str()
        .ok_or_else(|| Error::shape("'body' is not a string", &body.to_string()))?;

    let payload = match depth {
        EncodingDepth::Single => body,
        EncodingDepth::Double => {
            let inner: serde_json::Value = serde_json::from_str(body)
                .map_err(|e| Error::shape(format!("'body' is not valid JSON: {e}"), body))?;
            let doc = inner
                .get("processed_document")
                .ok_or_else(|| Error::shape("missing 'processed_document' key", body))?;
            let doc = doc.as_str().ok_or_else(|| {
                Error::shape("'processed_document' is not a string", &doc.to_string())
            })?;
            return BASE64.decode(doc).map_err(|e| {
                Error::shape(format!("'processed_document' is not valid base64: {e}"), doc)
            });
        }
    };

    BASE64
        .decode(payload)
        .map_err(|e| Error::shape(format!("'body' is not valid base64: {e}"), payload))
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_placeholders() -> Placeholders {
        Placeholders::new()
            .client_name("Acme")
            .date("2024-01-01")
            .notice_period("sixty (60)")
    }

    // --- request encoding ---

    #[test]
    fn single_encoding_produces_flat_envelope() {
        let body = encode_request(b"PK\x03\x04", &sample_placeholders(), EncodingDepth::Single)
            .expect("encode failed");

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["file"], BASE64.encode(b"PK\x03\x04"));
        assert_eq!(value["placeholders"]["{{NAME}}"], "Acme");
        assert_eq!(value["placeholders"]["{{DATE}}"], "2024-01-01");
        assert!(
            value.get("body").is_none(),
            "single encoding must not wrap under 'body'"
        );
    }

    #[test]
    fn double_encoding_wraps_serialized_envelope_under_body() {
        let body = encode_request(b"PK\x03\x04", &sample_placeholders(), EncodingDepth::Double)
            .expect("encode failed");

        let outer: serde_json::Value = serde_json::from_str(&body).unwrap();
        let inner_str = outer["body"]
            .as_str()
            .expect("'body' must be a JSON string, not an object");

        let inner: serde_json::Value = serde_json::from_str(inner_str).unwrap();
        assert_eq!(inner["file"], BASE64.encode(b"PK\x03\x04"));
        assert_eq!(inner["placeholders"]["{{NOTICE_PERIOD}}"], "sixty (60)");
    }

    #[test]
    fn request_envelope_bytes_are_deterministic() {
        // Same inputs must produce the identical byte string: the remote
        // contract is matched bit for bit.
        let a = encode_request(b"abc", &sample_placeholders(), EncodingDepth::Double).unwrap();
        let b = encode_request(b"abc", &sample_placeholders(), EncodingDepth::Double).unwrap();
        assert_eq!(a, b);

        // Field order: "file" before "placeholders"
        let inner = encode_request(b"abc", &sample_placeholders(), EncodingDepth::Single).unwrap();
        assert!(
            inner.starts_with(r#"{"file":"#),
            "'file' must serialize first: {inner}"
        );
    }

    #[test]
    fn empty_placeholder_map_serializes_as_empty_object() {
        let body =
            encode_request(b"x", &Placeholders::new(), EncodingDepth::Single).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["placeholders"], serde_json::json!({}));
    }

    // --- response decoding ---

    #[test]
    fn double_decode_extracts_nested_processed_document() {
        let inner = serde_json::json!({ "processed_document": BASE64.encode(b"OK") }).to_string();
        let text = serde_json::json!({ "body": inner }).to_string();

        let bytes = decode_response(&text, EncodingDepth::Double).expect("decode failed");
        assert_eq!(bytes, b"OK");
    }

    #[test]
    fn single_decode_reads_body_as_base64_directly() {
        let text = serde_json::json!({ "body": BASE64.encode(b"OK") }).to_string();

        let bytes = decode_response(&text, EncodingDepth::Single).expect("decode failed");
        assert_eq!(bytes, b"OK");
    }

    #[test]
    fn missing_body_key_is_a_shape_error() {
        let err = decode_response(r#"{"result": "ok"}"#, EncodingDepth::Double).unwrap_err();
        match err {
            Error::ResponseShape { reason, fragment } => {
                assert!(reason.contains("'body'"), "reason should name the key: {reason}");
                assert!(fragment.contains("result"), "fragment should show the response");
            }
            other => panic!("expected ResponseShape, got {other:?}"),
        }
    }

    #[test]
    fn missing_processed_document_key_is_a_shape_error() {
        let text = serde_json::json!({ "body": r#"{"something_else": "x"}"# }).to_string();
        let err = decode_response(&text, EncodingDepth::Double).unwrap_err();
        match err {
            Error::ResponseShape { reason, .. } => {
                assert!(
                    reason.contains("processed_document"),
                    "reason should name the missing key: {reason}"
                );
            }
            other => panic!("expected ResponseShape, got {other:?}"),
        }
    }

    #[test]
    fn non_json_response_is_a_shape_error() {
        let err = decode_response("<html>gateway error</html>", EncodingDepth::Double).unwrap_err();
        assert_eq!(err.category(), "response_shape");
    }

    #[test]
    fn body_holding_an_object_instead_of_string_is_a_shape_error() {
        // A flattened (non-double) service answering a double-configured
        // client: body is an object, not a string
        let text = serde_json::json!({ "body": { "processed_document": "x" } }).to_string();
        let err = decode_response(&text, EncodingDepth::Double).unwrap_err();
        match err {
            Error::ResponseShape { reason, .. } => {
                assert!(reason.contains("not a string"), "got: {reason}");
            }
            other => panic!("expected ResponseShape, got {other:?}"),
        }
    }

    #[test]
    fn body_with_invalid_inner_json_is_a_shape_error() {
        let text = serde_json::json!({ "body": "not json at all" }).to_string();
        let err = decode_response(&text, EncodingDepth::Double).unwrap_err();
        assert_eq!(err.category(), "response_shape");
    }

    #[test]
    fn invalid_base64_payload_is_a_shape_error() {
        let inner = serde_json::json!({ "processed_document": "!!! not base64 !!!" }).to_string();
        let text = serde_json::json!({ "body": inner }).to_string();
        let err = decode_response(&text, EncodingDepth::Double).unwrap_err();
        assert_eq!(err.category(), "response_shape");

        let text = serde_json::json!({ "body": "!!! not base64 !!!" }).to_string();
        let err = decode_response(&text, EncodingDepth::Single).unwrap_err();
        assert_eq!(err.category(), "response_shape");
    }

    // --- base64 round-trips ---

    #[test]
    fn base64_round_trip_is_exact_for_boundary_sizes() {
        for size in [0usize, 1, 1_000_000] {
            let original: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();

            let inner =
                serde_json::json!({ "processed_document": BASE64.encode(&original) }).to_string();
            let text = serde_json::json!({ "body": inner }).to_string();

            let decoded = decode_response(&text, EncodingDepth::Double).expect("decode failed");
            assert_eq!(
                decoded, original,
                "round-trip must be byte-identical for {size} bytes"
            );
        }
    }

    #[test]
    fn encode_handles_empty_document() {
        // Envelope-level encoding accepts empty input; the orchestrator is
        // responsible for rejecting missing documents before this point.
        let body = encode_request(b"", &Placeholders::new(), EncodingDepth::Single).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["file"], "");
    }
}
