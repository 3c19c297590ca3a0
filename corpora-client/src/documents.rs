use corpora_core::models::{ChunkPreviewRequest, ChunkPreviewResponse, Document};
use tracing::info;

use crate::admission::{Rejection, admit};
use crate::chunking::ChunkingParams;
use crate::errors::ClientResult;
use crate::gateway::GatewayClient;
use crate::pending::PendingFile;

/// Per-knowledge-base document controller: list, upload, delete, filter.
///
/// The knowledge base is an explicit constructor argument — there is no
/// ambient "current knowledge base". The local list is replaced wholesale on
/// every refresh; document counts are small and staleness must not persist.
pub struct DocumentSession {
    gateway: GatewayClient,
    knowledge_base_id: String,
    documents: Vec<Document>,
    filter: String,
}

/// What an upload attempt did: which files were turned away locally and how
/// many documents the backend accepted.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub rejections: Vec<Rejection>,
    pub uploaded: u64,
}

impl DocumentSession {
    pub fn new(gateway: GatewayClient, knowledge_base_id: impl Into<String>) -> Self {
        Self {
            gateway,
            knowledge_base_id: knowledge_base_id.into(),
            documents: Vec::new(),
            filter: String::new(),
        }
    }

    pub fn knowledge_base_id(&self) -> &str {
        &self.knowledge_base_id
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Fetch all documents for the knowledge base and replace the local
    /// list wholesale.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.documents = self.gateway.list_documents(&self.knowledge_base_id).await?;
        Ok(())
    }

    /// Validate, upload, then refresh.
    ///
    /// Inadmissible files never reach the network; when nothing is admitted
    /// no request is made at all. No placeholder rows are inserted — a
    /// document's status is unknown client-side until the backend reports it.
    pub async fn upload(
        &mut self,
        candidates: Vec<PendingFile>,
        params: ChunkingParams,
    ) -> ClientResult<UploadReport> {
        let outcome = admit(0, candidates);
        let mut report = UploadReport {
            rejections: outcome.rejections,
            uploaded: 0,
        };
        if outcome.admitted.is_empty() {
            return Ok(report);
        }

        let response = self
            .gateway
            .upload_documents(&self.knowledge_base_id, &outcome.admitted, params)
            .await?;
        report.uploaded = response.count;
        info!(kb_id = %self.knowledge_base_id, count = response.count, "documents uploaded");

        self.refresh().await?;
        Ok(report)
    }

    /// Delete one document and drop it from the local list without a
    /// refetch. Confirming the action with the user is the caller's job.
    pub async fn delete(&mut self, document_id: &str) -> ClientResult<()> {
        self.gateway.delete_document(document_id).await?;
        self.documents.retain(|doc| doc.id != document_id);
        Ok(())
    }

    /// Ask the backend how a stored document would split under the given
    /// parameters.
    pub async fn preview_chunks(
        &self,
        document_id: &str,
        params: ChunkingParams,
    ) -> ClientResult<ChunkPreviewResponse> {
        let request = ChunkPreviewRequest {
            kb_id: self.knowledge_base_id.clone(),
            doc_id: document_id.to_string(),
            chunk_size: params.chunk_size(),
            chunk_overlap: params.chunk_overlap(),
        };
        self.gateway.preview_chunks(&request).await
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Case-insensitive substring filter over document names, applied to
    /// the already-fetched list. Never sent to the backend.
    pub fn filtered(&self) -> Vec<&Document> {
        let needle = self.filter.to_lowercase();
        self.documents
            .iter()
            .filter(|doc| needle.is_empty() || doc.name.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use corpora_core::Settings;
    use corpora_core::models::DocumentStatus;

    use super::*;

    fn session() -> DocumentSession {
        let settings = Settings {
            api_base_url: "http://127.0.0.1:9/api".to_string(),
        };
        DocumentSession::new(GatewayClient::new(&settings), "kb-1")
    }

    fn document(name: &str) -> Document {
        let now = Utc::now();
        Document {
            id: format!("doc-{name}"),
            knowledge_base_id: "kb-1".to_string(),
            name: name.to_string(),
            file_type: "txt".to_string(),
            file_size: 100,
            character_count: 100,
            chunk_count: 1,
            recall_count: 0,
            status: DocumentStatus::Completed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn filter_is_case_insensitive_substring_over_names() {
        let mut session = session();
        session.documents = vec![
            document("Quarterly Report.pdf"),
            document("meeting-notes.md"),
            document("summary.txt"),
        ];

        session.set_filter("REPORT");
        let names: Vec<_> = session.filtered().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Quarterly Report.pdf"]);

        session.set_filter("");
        assert_eq!(session.filtered().len(), 3);
    }

    #[test]
    fn filter_never_mutates_the_fetched_list() {
        let mut session = session();
        session.documents = vec![document("a.txt"), document("b.txt")];
        session.set_filter("zzz");
        assert!(session.filtered().is_empty());
        assert_eq!(session.documents().len(), 2);
    }
}
