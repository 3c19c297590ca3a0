//! Shared configuration and wire types for the corpora client.

pub mod config;
pub mod models;

pub use config::{ConfigError, Settings, load_dotenv};
pub use models::{
    ChunkPreviewRequest, ChunkPreviewResponse, Document, DocumentStatus, KnowledgeBase,
    RetrievalMode, RetrievalResponse, RetrievalResult, SearchRequest, UploadResponse,
};
