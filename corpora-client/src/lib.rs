//! Client engine for the corpora knowledge backend.
//!
//! Validation, chunking parameters, and the creation workflow run locally;
//! everything else is a round trip through [`GatewayClient`].

pub mod admission;
pub mod chunking;
pub mod documents;
pub mod errors;
pub mod gateway;
pub mod pending;
pub mod retrieval;
pub mod workflow;

pub use admission::{AdmissionOutcome, MAX_BATCH_FILES, MAX_FILE_BYTES, Rejection, SUPPORTED_FORMATS, admit};
pub use chunking::{ChunkingParams, ChunkingPreview};
pub use documents::{DocumentSession, UploadReport};
pub use errors::{GatewayError, SearchError, WorkflowError};
pub use gateway::GatewayClient;
pub use pending::PendingFile;
pub use retrieval::SearchSession;
pub use workflow::{CreationWorkflow, WorkflowStage};
