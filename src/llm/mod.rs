//! AI completion layer.
//!
//! `client` defines the `CompletionClient` seam plus the Ollama implementation,
//! `prompt` holds the single prompt template both code paths share, `schema`
//! the JSON schema constraints sent with each request, and `parser` the
//! extraction of a JSON document from a model response.

pub mod client;
pub mod parser;
pub mod prompt;
pub mod schema;

pub use client::{CompletionClient, CompletionRequest, MockCompletionClient, OllamaClient};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion service is not reachable at {0}")]
    Connection(String),

    #[error("completion service returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("completion service returned no content")]
    EmptyResponse,

    #[error("response parsing error: {0}")]
    ResponseParsing(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),
}
