use tracing::warn;

use corpora_client::WorkflowError;
use corpora_client::chunking::ChunkingParams;
use corpora_client::{DocumentSession, SearchSession};
use corpora_core::models::{KnowledgeBase, RetrievalMode};

use crate::state::{DetailTab, Screen};

use super::{App, DetailState};

impl App {
    pub(super) async fn refresh_knowledge_bases(&mut self) {
        match self.gateway.list_knowledge_bases().await {
            Ok(knowledge_bases) => {
                self.knowledge_bases = knowledge_bases;
                if self.kb_selected >= self.knowledge_bases.len() {
                    self.kb_selected = self.knowledge_bases.len().saturating_sub(1);
                }
            }
            Err(e) => {
                warn!("knowledge base list refresh failed: {e}");
                self.notify(e.to_string());
            }
        }
    }

    pub(super) async fn open_detail(&mut self, knowledge_base: KnowledgeBase) {
        let mut documents = DocumentSession::new(self.gateway.clone(), knowledge_base.id.clone());
        if let Err(e) = documents.refresh().await {
            self.notify(e.to_string());
        }
        let search = SearchSession::new(self.gateway.clone(), knowledge_base.id.clone());

        self.status = format!("knowledge base: {}", knowledge_base.name);
        self.detail = Some(DetailState {
            knowledge_base,
            tab: DetailTab::default(),
            documents,
            search,
            doc_selected: 0,
            query: String::new(),
            top_k: 5,
            mode: RetrievalMode::Vector,
        });
        self.screen = Screen::Detail;
    }

    pub(super) async fn refresh_documents(&mut self) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let err = detail.documents.refresh().await.err();
        if let Some(e) = err {
            self.notify(e.to_string());
        }
        self.refresh_detail_counts().await;
    }

    /// Re-fetch the open knowledge base so aggregate counts stay current.
    pub(super) async fn refresh_detail_counts(&mut self) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let result = self.gateway.get_knowledge_base(&detail.knowledge_base.id).await;
        let err = match result {
            Ok(kb) => {
                detail.knowledge_base = kb;
                None
            }
            Err(e) => Some(e.to_string()),
        };
        if let Some(message) = err {
            warn!("knowledge base refetch failed: {message}");
        }
    }

    pub(super) async fn submit_creation(&mut self) {
        let name = self.name_input.clone();
        let description = self.description_input.clone();
        match self.workflow.submit(&name, &description).await {
            Ok(kb) => {
                self.notify(format!("knowledge base {:?} created", kb.name));
                self.refresh_knowledge_bases().await;
            }
            Err(WorkflowError::UploadAfterCreate {
                knowledge_base,
                source,
            }) => {
                self.notify(source.to_string());
                self.notify(format!(
                    "knowledge base {:?} exists — open it to retry the upload",
                    knowledge_base.name
                ));
                self.refresh_knowledge_bases().await;
            }
            Err(e) => self.notify(e.to_string()),
        }
    }

    pub(super) async fn perform_upload(&mut self) {
        let Some(draft) = self.upload.as_ref() else {
            return;
        };
        if draft.files.is_empty() {
            self.notify("add files to upload first");
            return;
        }
        let files = draft.files.clone();
        let params = draft.params;

        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let mut messages = Vec::new();
        let mut uploaded = 0;
        match detail.documents.upload(files, params).await {
            Ok(report) => {
                messages.extend(report.rejections.iter().map(|r| r.to_string()));
                uploaded = report.uploaded;
            }
            Err(e) => messages.push(e.to_string()),
        }
        for message in messages {
            self.notify(message);
        }
        if uploaded > 0 {
            self.notify(format!("uploaded {uploaded} documents"));
            self.upload = None;
            self.screen = Screen::Detail;
            self.refresh_detail_counts().await;
        }
    }

    pub(super) async fn rename_knowledge_base(&mut self, name: String) {
        let name = name.trim().to_string();
        if name.is_empty() {
            self.notify("knowledge base name must not be empty");
            return;
        }
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let result = self
            .gateway
            .update_knowledge_base(&detail.knowledge_base.id, Some(&name), None)
            .await;
        let message = match result {
            Ok(kb) => {
                let message = format!("renamed to {:?}", kb.name);
                detail.knowledge_base = kb;
                message
            }
            Err(e) => e.to_string(),
        };
        if let Some(detail) = self.detail.as_ref() {
            self.status = format!("knowledge base: {}", detail.knowledge_base.name);
        }
        self.notify(message);
    }

    pub(super) async fn delete_knowledge_base(&mut self, id: String) {
        match self.gateway.delete_knowledge_base(&id).await {
            Ok(()) => {
                self.knowledge_bases.retain(|kb| kb.id != id);
                if self.kb_selected >= self.knowledge_bases.len() {
                    self.kb_selected = self.knowledge_bases.len().saturating_sub(1);
                }
                self.notify("knowledge base deleted");
            }
            Err(e) => self.notify(e.to_string()),
        }
    }

    pub(super) async fn delete_document(&mut self, document_id: String) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let result = detail.documents.delete(&document_id).await;
        let deleted = result.is_ok();
        let message = match result {
            Ok(()) => "document deleted".to_string(),
            Err(e) => e.to_string(),
        };
        let filtered_len = detail.documents.filtered().len();
        if detail.doc_selected >= filtered_len {
            detail.doc_selected = filtered_len.saturating_sub(1);
        }
        self.notify(message);
        if deleted {
            self.refresh_detail_counts().await;
        }
    }

    pub(super) async fn run_search(&mut self) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let query = detail.query.clone();
        let top_k = detail.top_k;
        let mode = detail.mode;
        let message = match detail.search.search(&query, top_k, mode).await {
            Ok(response) => format!("{} results for {:?}", response.total_count, response.query),
            Err(e) => e.to_string(),
        };
        self.notify(message);
    }

    pub(super) async fn preview_selected(&mut self) {
        let Some(detail) = self.detail.as_ref() else {
            return;
        };
        let Some((doc_id, doc_name)) = detail.selected_document() else {
            self.notify("no document selected");
            return;
        };
        let result = detail
            .documents
            .preview_chunks(&doc_id, ChunkingParams::default())
            .await;
        let message = match result {
            Ok(preview) => match preview.estimated_chunks {
                Some(n) => format!("{doc_name}: about {n} chunks at default parameters"),
                None => preview
                    .message
                    .unwrap_or_else(|| "no preview available".to_string()),
            },
            Err(e) => e.to_string(),
        };
        self.notify(message);
    }
}
