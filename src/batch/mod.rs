//! Batch workflow: extract patient identities from intake images, then
//! generate one document pair per patient into a dated output folder.

pub mod runner;
pub mod storage;
pub mod types;

pub use runner::{extract_patients, generate_reports, structured_report};
pub use types::{BatchError, BatchGenerateRecord, BatchItemResult, BatchOutcome, CHUNK_SIZE};
