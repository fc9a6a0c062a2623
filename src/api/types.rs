//! Shared handler state.

use std::path::PathBuf;
use std::sync::Arc;

use crate::llm::CompletionClient;

/// State shared by all endpoint handlers.
#[derive(Clone)]
pub struct ApiContext {
    pub client: Arc<dyn CompletionClient>,
    pub model: String,
    /// Base directory for batch output; dated folders are created under it.
    pub batch_output_base: PathBuf,
    /// Directory for single-report output.
    pub single_output_dir: PathBuf,
}

impl ApiContext {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        model: String,
        batch_output_base: PathBuf,
        single_output_dir: PathBuf,
    ) -> Self {
        Self {
            client,
            model,
            batch_output_base,
            single_output_dir,
        }
    }
}
