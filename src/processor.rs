//! Request orchestrator for the remote document processing service
//!
//! One linear pipeline per submission: validate input, fetch the API key,
//! build the envelope, POST, interpret the response. No retries, no
//! backoff, no idempotency key — a resubmission is a fresh, independent
//! call. At most one submission is in flight at a time; a second one is
//! rejected with [`Error::InFlight`] rather than queued.

use crate::artifact::{self, ProcessedDocument};
use crate::config::Config;
use crate::credentials::CredentialProvider;
use crate::envelope;
use crate::error::{Error, Result};
use crate::placeholders::Placeholders;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Client for the remote document template-processing service
///
/// Holds one reqwest client and the injected credential provider. Cheap to
/// share behind an `Arc`; all submission state is per-call.
pub struct DocumentProcessor {
    config: Config,
    client: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
    in_flight: AtomicBool,
}

impl DocumentProcessor {
    /// Create a new processor for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid and
    /// [`Error::Network`] if the HTTP client cannot be built.
    pub fn new(config: Config, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            config,
            client,
            credentials,
            in_flight: AtomicBool::new(false),
        })
    }

    /// Submit a document and its placeholder values for processing
    ///
    /// Encodes the document, POSTs it to the configured endpoint with the
    /// configured auth header, and decodes the returned envelope into a
    /// [`ProcessedDocument`] whose filename is derived from the client-name
    /// placeholder.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingInput`] if `document` is empty (no network call is
    ///   made)
    /// - [`Error::InFlight`] if another submission has not resolved yet
    /// - [`Error::Credential`] if the API key cannot be obtained
    /// - [`Error::Network`] / [`Error::Timeout`] on transport failures
    /// - [`Error::RemoteProcessing`] on a non-200 response
    /// - [`Error::ResponseShape`] on a 200 response with an unexpected body
    pub async fn submit(
        &self,
        document: &[u8],
        placeholders: &Placeholders,
    ) -> Result<ProcessedDocument> {
        if document.is_empty() {
            warn!("submission rejected: no document supplied");
            return Err(Error::MissingInput);
        }

        let _guard = self.acquire_in_flight()?;

        // The key is consumed here and never logged
        let api_key = self.credentials.get(&self.config.api_key_name).await?;

        let body = envelope::encode_request(document, placeholders, self.config.encoding)?;
        debug!(
            endpoint = %self.config.endpoint,
            document_size = document.len(),
            placeholder_count = placeholders.len(),
            encoding = ?self.config.encoding,
            "submitting document"
        );

        let request = self.config.auth.apply(
            self.client
                .post(&self.config.endpoint)
                .header("Content-Type", "application/json")
                .body(body),
            &api_key,
        );

        let timeout = self.config.request_timeout;
        let response = match tokio::time::timeout(timeout, request.send()).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(endpoint = %self.config.endpoint, ?timeout, "request timed out");
                return Err(Error::Timeout { timeout });
            }
        };

        let status = response.status();
        let text = response.text().await?;

        if status != reqwest::StatusCode::OK {
            warn!(
                endpoint = %self.config.endpoint,
                status = status.as_u16(),
                body = %crate::error::truncate_fragment(&text),
                "remote processing failed"
            );
            return Err(Error::RemoteProcessing {
                status: status.as_u16(),
                body: text,
            });
        }

        let bytes = envelope::decode_response(&text, self.config.encoding)?;
        let filename =
            artifact::download_filename(placeholders.get_client_name(), &self.config.download);
        info!(
            filename = %filename,
            size = bytes.len(),
            "document processed"
        );

        Ok(ProcessedDocument { bytes, filename })
    }

    /// Mark a submission as in flight, rejecting concurrent ones
    fn acquire_in_flight(&self) -> Result<InFlightGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("submission rejected: another submission is in flight");
            return Err(Error::InFlight);
        }
        Ok(InFlightGuard {
            flag: &self.in_flight,
        })
    }
}

/// Clears the in-flight flag when the submission resolves, on every path
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
