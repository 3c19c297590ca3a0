use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named collection of documents indexed for retrieval.
///
/// Owned by the backend; the client holds a read-through cached copy per view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub document_count: u64,
}

/// Lifecycle status of an uploaded document.
///
/// Transitions are backend-driven and observed by refetch; the client never
/// sets a status optimistically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Processing,
    Completed,
    Failed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown document status: {}", other)),
        }
    }
}

/// A source document within a knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub knowledge_base_id: String,
    pub name: String,
    pub file_type: String,
    /// Byte size as reported at upload time.
    pub file_size: u64,
    pub character_count: u64,
    pub chunk_count: u64,
    /// Times a chunk of this document was returned by a search.
    pub recall_count: u64,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Backend strategy used to rank chunks against a query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    #[default]
    Vector,
    Hybrid,
}

impl RetrievalMode {
    /// All modes in presentation order.
    pub const ALL: [RetrievalMode; 2] = [RetrievalMode::Vector, RetrievalMode::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetrievalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vector" => Ok(Self::Vector),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(format!("unknown retrieval mode: {}", other)),
        }
    }
}

/// One ranked chunk returned by a search.
///
/// Ordering within a response is the backend's; the client does not re-sort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub chunk_id: String,
    pub document_id: String,
    pub document_name: String,
    pub content: String,
    /// Similarity in [0, 1].
    pub similarity_score: f64,
    /// Position of the chunk within its document.
    pub chunk_index: u64,
}

/// Full result set for one search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResponse {
    pub query: String,
    pub results: Vec<RetrievalResult>,
    pub total_count: u64,
}

/// Response of a document upload call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub documents: Vec<Document>,
    pub count: u64,
}

/// Request body for `POST /retrieval/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub knowledge_base_id: String,
    pub top_k: u32,
    pub retrieval_type: RetrievalMode,
}

/// Request body for `POST /retrieval/preview-chunks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPreviewRequest {
    pub kb_id: String,
    pub doc_id: String,
    pub chunk_size: u32,
    pub chunk_overlap: u32,
}

/// Backend-defined preview payload.
///
/// Fields mirror what the service returns today; all are optional so a
/// richer payload from a newer backend still parses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkPreviewResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub chunk_size: Option<u32>,
    #[serde(default)]
    pub chunk_overlap: Option<u32>,
    #[serde(default)]
    pub estimated_chunks: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_parses_backend_wire_form() {
        let raw = r#"{
            "id": "doc-1",
            "knowledge_base_id": "kb-1",
            "name": "report.pdf",
            "file_type": "pdf",
            "file_size": 20480,
            "character_count": 15000,
            "chunk_count": 15,
            "recall_count": 3,
            "status": "processing",
            "created_at": "2025-01-10T12:00:00Z",
            "updated_at": "2025-01-10T12:00:05Z"
        }"#;
        let doc: Document = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.status, DocumentStatus::Processing);
        assert_eq!(doc.file_size, 20480);
    }

    #[test]
    fn retrieval_mode_round_trips_as_lowercase() {
        let json = serde_json::to_string(&RetrievalMode::Vector).unwrap();
        assert_eq!(json, "\"vector\"");
        assert_eq!("hybrid".parse::<RetrievalMode>().unwrap(), RetrievalMode::Hybrid);
        assert!("bm25".parse::<RetrievalMode>().is_err());
    }
}
