//! # docproc-client
//!
//! Client library for a remote document template-processing service.
//!
//! The service takes a Word document and a map of placeholder tokens
//! (e.g. `{{NAME}}`) to replacement text, performs the substitution
//! server-side, and returns the processed document. This crate implements
//! the client half of that contract: building the request envelope,
//! attaching the credential, calling the endpoint, and interpreting the
//! response into either a downloadable document or a categorized error.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Exact wire contract** - The envelope shape is an external contract
//!   and is reproduced bit for bit, including the gateway's
//!   envelope-within-envelope quirk (see [`config::EncodingDepth`])
//! - **Configuration over hard-coding** - Auth header scheme and encoding
//!   depth are deployment choices, selected by [`Config`]
//! - **No hidden state** - Credentials come from an injected provider;
//!   every submission builds its own envelope from its own inputs
//!
//! ## Quick Start
//!
//! ```no_run
//! use docproc_client::{Config, DocumentProcessor, EnvCredentials, Placeholders};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("https://api.example.com/prod/process_document");
//!     let processor = DocumentProcessor::new(config, Arc::new(EnvCredentials))?;
//!
//!     let document = std::fs::read("engagement_letter_template.docx")?;
//!     let placeholders = Placeholders::new()
//!         .client_name("Acme")
//!         .date("2024-01-01")
//!         .notice_period("sixty (60)");
//!
//!     let processed = processor.submit(&document, &placeholders).await?;
//!     println!("got {} ({} bytes)", processed.filename, processed.bytes.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Processed document artifact and download handling
pub mod artifact;
/// Configuration types
pub mod config;
/// Credential lookup
pub mod credentials;
/// Request/response wire envelopes
pub mod envelope;
/// Error types
pub mod error;
/// Placeholder token mapping
pub mod placeholders;
/// Request orchestrator
pub mod processor;

// Re-export commonly used types
pub use artifact::{DOCX_MIME, ProcessedDocument};
pub use config::{AuthScheme, Config, DownloadConfig, EncodingDepth, FileCollisionAction};
pub use credentials::{CredentialProvider, EnvCredentials, StaticCredentials};
pub use error::{Error, Result};
pub use placeholders::{DATE_TOKEN, NAME_TOKEN, NOTICE_PERIOD_TOKEN, Placeholders};
pub use processor::DocumentProcessor;
