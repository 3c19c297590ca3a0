use corpora_core::Settings;
use corpora_core::models::{
    ChunkPreviewRequest, ChunkPreviewResponse, Document, KnowledgeBase, RetrievalResponse,
    SearchRequest, UploadResponse,
};
use tracing::debug;

use crate::chunking::ChunkingParams;
use crate::errors::{ClientResult, GatewayError};
use crate::pending::PendingFile;

/// HTTP client for the knowledge backend.
///
/// One method per endpoint. Any non-2xx response surfaces as a
/// [`GatewayError::Api`] named after the operation, carrying the backend's
/// `detail` message when the body has one.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    client: reqwest::Client,
}

impl GatewayClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn create_knowledge_base(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> ClientResult<KnowledgeBase> {
        let url = format!("{}/knowledge-bases", self.base_url);
        let body = KnowledgeBaseCreate {
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        let response = self.client.post(&url).json(&body).send().await?;
        let response = check(response, "failed to create knowledge base").await?;
        Ok(response.json().await?)
    }

    pub async fn list_knowledge_bases(&self) -> ClientResult<Vec<KnowledgeBase>> {
        let url = format!("{}/knowledge-bases", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check(response, "failed to list knowledge bases").await?;
        Ok(response.json().await?)
    }

    pub async fn get_knowledge_base(&self, id: &str) -> ClientResult<KnowledgeBase> {
        let url = format!("{}/knowledge-bases/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        let response = check(response, "failed to get knowledge base").await?;
        Ok(response.json().await?)
    }

    pub async fn update_knowledge_base(
        &self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> ClientResult<KnowledgeBase> {
        let url = format!("{}/knowledge-bases/{}", self.base_url, id);
        let body = KnowledgeBaseUpdate {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
        };
        let response = self.client.put(&url).json(&body).send().await?;
        let response = check(response, "failed to update knowledge base").await?;
        Ok(response.json().await?)
    }

    pub async fn delete_knowledge_base(&self, id: &str) -> ClientResult<()> {
        let url = format!("{}/knowledge-bases/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?;
        check(response, "failed to delete knowledge base").await?;
        Ok(())
    }

    /// Upload files as one multipart request carrying the chunking
    /// parameters. File contents are read from disk here; an unreadable
    /// file fails the whole call before anything is sent.
    pub async fn upload_documents(
        &self,
        kb_id: &str,
        files: &[PendingFile],
        params: ChunkingParams,
    ) -> ClientResult<UploadResponse> {
        let url = format!("{}/documents/{}/upload", self.base_url, kb_id);

        let mut form = reqwest::multipart::Form::new()
            .text("chunk_size", params.chunk_size().to_string())
            .text("chunk_overlap", params.chunk_overlap().to_string());
        for file in files {
            let bytes = tokio::fs::read(&file.path).await?;
            let part = reqwest::multipart::Part::bytes(bytes).file_name(file.name.clone());
            form = form.part("files", part);
        }

        debug!(kb_id, files = files.len(), "uploading documents");
        let response = self.client.post(&url).multipart(form).send().await?;
        let response = check(response, "failed to upload documents").await?;
        Ok(response.json().await?)
    }

    pub async fn list_documents(&self, kb_id: &str) -> ClientResult<Vec<Document>> {
        let url = format!("{}/documents/{}", self.base_url, kb_id);
        let response = self.client.get(&url).send().await?;
        let response = check(response, "failed to list documents").await?;
        Ok(response.json().await?)
    }

    pub async fn delete_document(&self, doc_id: &str) -> ClientResult<()> {
        let url = format!("{}/documents/{}", self.base_url, doc_id);
        let response = self.client.delete(&url).send().await?;
        check(response, "failed to delete document").await?;
        Ok(())
    }

    pub async fn search(&self, request: &SearchRequest) -> ClientResult<RetrievalResponse> {
        let url = format!("{}/retrieval/search", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        let response = check(response, "failed to search knowledge base").await?;
        Ok(response.json().await?)
    }

    pub async fn preview_chunks(
        &self,
        request: &ChunkPreviewRequest,
    ) -> ClientResult<ChunkPreviewResponse> {
        let url = format!("{}/retrieval/preview-chunks", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        let response = check(response, "failed to preview chunks").await?;
        Ok(response.json().await?)
    }
}

/// Pass a successful response through, or turn a non-2xx one into a named
/// operation failure.
async fn check(
    response: reqwest::Response,
    operation: &'static str,
) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Api {
        operation,
        message: api_message(status, &body),
    })
}

/// Prefer the backend's `detail` field, fall back to the raw body, then to
/// the status line.
fn api_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(detail) = value.get("detail").and_then(|v| v.as_str())
    {
        return detail.to_string();
    }
    if body.trim().is_empty() {
        format!("backend returned {status}")
    } else {
        format!("{status}: {}", body.trim())
    }
}

#[derive(Debug, Clone, serde::Serialize)]
struct KnowledgeBaseCreate {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct KnowledgeBaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed_of_trailing_slash() {
        let settings = Settings {
            api_base_url: "http://127.0.0.1:8000/api/".to_string(),
        };
        let gateway = GatewayClient::new(&settings);
        assert_eq!(gateway.base_url, "http://127.0.0.1:8000/api");
    }

    #[test]
    fn api_message_prefers_backend_detail() {
        let status = reqwest::StatusCode::NOT_FOUND;
        let message = api_message(status, r#"{"detail": "Knowledge base not found"}"#);
        assert_eq!(message, "Knowledge base not found");
    }

    #[test]
    fn api_message_falls_back_to_body_then_status() {
        let status = reqwest::StatusCode::INTERNAL_SERVER_ERROR;
        assert_eq!(
            api_message(status, "boom"),
            "500 Internal Server Error: boom"
        );
        assert_eq!(
            api_message(status, "  "),
            "backend returned 500 Internal Server Error"
        );
    }
}
