use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use corpora_client::{PendingFile, WorkflowStage, admit};
use corpora_core::models::RetrievalMode;

use crate::state::{
    ConfigField, DetailTab, PromptKind, Screen, UploadField, step_chunk_overlap, step_chunk_size,
    step_top_k,
};

use super::{App, UploadDraft};

impl App {
    pub(super) async fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_exit = true;
            return;
        }

        if self.prompt.kind.is_some() {
            self.handle_prompt_key(key).await;
            return;
        }

        match self.screen {
            Screen::KnowledgeBases => self.handle_list_key(key).await,
            Screen::Create => self.handle_create_key(key).await,
            Screen::Detail => self.handle_detail_key(key).await,
            Screen::Upload => self.handle_upload_key(key).await,
        }
    }

    async fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.prompt.close(),
            KeyCode::Enter => self.confirm_prompt().await,
            KeyCode::Backspace => {
                self.prompt.buffer.pop();
            }
            KeyCode::Char(c) => self.prompt.buffer.push(c),
            _ => {}
        }
    }

    async fn confirm_prompt(&mut self) {
        let Some(kind) = self.prompt.kind else { return };
        let buffer = self.prompt.buffer.trim().to_string();
        let target_id = self.prompt.target_id.clone();
        self.prompt.close();

        match kind {
            PromptKind::AddCreateFile => self.add_create_file(&buffer),
            PromptKind::AddUploadFile => self.add_upload_file(&buffer),
            PromptKind::FilterDocuments => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.documents.set_filter(buffer);
                    detail.doc_selected = 0;
                }
            }
            PromptKind::SearchQuery => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.query = buffer;
                }
                self.run_search().await;
            }
            PromptKind::RenameKnowledgeBase => self.rename_knowledge_base(buffer).await,
            PromptKind::ConfirmDeleteKnowledgeBase => {
                if buffer.eq_ignore_ascii_case("yes")
                    && let Some(id) = target_id
                {
                    self.delete_knowledge_base(id).await;
                }
            }
            PromptKind::ConfirmDeleteDocument => {
                if buffer.eq_ignore_ascii_case("yes")
                    && let Some(id) = target_id
                {
                    self.delete_document(id).await;
                }
            }
        }
    }

    fn add_create_file(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        match PendingFile::from_path(raw) {
            Ok(file) => {
                let rejections = self.workflow.offer_files(vec![file]);
                for rejection in rejections {
                    self.notify(rejection.to_string());
                }
            }
            Err(e) => self.notify(format!("cannot read {raw}: {e}")),
        }
    }

    fn add_upload_file(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let mut messages = Vec::new();
        match PendingFile::from_path(raw) {
            Ok(file) => {
                if let Some(draft) = self.upload.as_mut() {
                    let outcome = admit(draft.files.len(), vec![file]);
                    draft.files.extend(outcome.admitted);
                    messages.extend(outcome.rejections.iter().map(|r| r.to_string()));
                }
            }
            Err(e) => messages.push(format!("cannot read {raw}: {e}")),
        }
        for message in messages {
            self.notify(message);
        }
    }

    async fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Up => self.kb_selected = self.kb_selected.saturating_sub(1),
            KeyCode::Down => {
                if self.kb_selected + 1 < self.knowledge_bases.len() {
                    self.kb_selected += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(kb) = self.knowledge_bases.get(self.kb_selected).cloned() {
                    self.open_detail(kb).await;
                }
            }
            KeyCode::Char('n') => self.start_creation(),
            KeyCode::Char('d') => {
                if let Some(kb) = self.knowledge_bases.get(self.kb_selected) {
                    let (id, name) = (kb.id.clone(), kb.name.clone());
                    self.prompt.open(PromptKind::ConfirmDeleteKnowledgeBase);
                    self.prompt.target_id = Some(id);
                    self.prompt.target_name = Some(name);
                }
            }
            KeyCode::Char('r') => self.refresh_knowledge_bases().await,
            _ => {}
        }
    }

    fn start_creation(&mut self) {
        self.workflow.reset();
        self.name_input.clear();
        self.description_input.clear();
        self.create_field = ConfigField::default();
        self.file_selected = 0;
        self.screen = Screen::Create;
    }

    async fn handle_create_key(&mut self, key: KeyEvent) {
        match self.workflow.stage().position() {
            0 => self.handle_create_upload_key(key),
            1 => self.handle_create_config_key(key).await,
            _ => self.handle_create_complete_key(key).await,
        }
    }

    fn handle_create_upload_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') => self.prompt.open(PromptKind::AddCreateFile),
            KeyCode::Up => self.file_selected = self.file_selected.saturating_sub(1),
            KeyCode::Down => {
                if self.file_selected + 1 < self.workflow.files().len() {
                    self.file_selected += 1;
                }
            }
            KeyCode::Char('x') => {
                self.workflow.remove_file(self.file_selected);
                let len = self.workflow.files().len();
                if self.file_selected >= len {
                    self.file_selected = len.saturating_sub(1);
                }
            }
            KeyCode::Enter | KeyCode::Tab => {
                if !self.workflow.advance_to_config() {
                    self.notify("add at least one file to continue");
                }
            }
            KeyCode::Esc => {
                self.workflow.reset();
                self.screen = Screen::KnowledgeBases;
            }
            _ => {}
        }
    }

    async fn handle_create_config_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.create_field = self.create_field.next(),
            KeyCode::Enter => self.submit_creation().await,
            KeyCode::Esc => self.workflow.back_to_upload(),
            KeyCode::Backspace if self.create_field.is_text() => {
                match self.create_field {
                    ConfigField::Name => {
                        self.name_input.pop();
                    }
                    ConfigField::Description => {
                        self.description_input.pop();
                    }
                    _ => {}
                }
            }
            KeyCode::Char(c) if self.create_field.is_text() => match self.create_field {
                ConfigField::Name => self.name_input.push(c),
                ConfigField::Description => self.description_input.push(c),
                _ => {}
            },
            KeyCode::Left | KeyCode::Right => {
                let up = key.code == KeyCode::Right;
                match self.create_field {
                    ConfigField::ChunkSize => {
                        let next = step_chunk_size(self.workflow.params().chunk_size(), up);
                        self.workflow.set_chunk_size(next);
                    }
                    ConfigField::ChunkOverlap => {
                        let next = step_chunk_overlap(self.workflow.params().chunk_overlap(), up);
                        self.workflow.set_chunk_overlap(next);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    async fn handle_create_complete_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('o') => {
                if let WorkflowStage::Complete { knowledge_base, .. } = self.workflow.stage() {
                    let kb = knowledge_base.clone();
                    self.workflow.reset();
                    self.open_detail(kb).await;
                }
            }
            KeyCode::Char('n') => self.start_creation(),
            KeyCode::Esc => {
                self.workflow.reset();
                self.screen = Screen::KnowledgeBases;
            }
            _ => {}
        }
    }

    async fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.tab = detail.tab.toggle();
                }
            }
            KeyCode::Esc => {
                self.detail = None;
                self.screen = Screen::KnowledgeBases;
                // Aggregate counts may have changed while the detail was open.
                self.refresh_knowledge_bases().await;
            }
            KeyCode::Char('e') => {
                let current = self
                    .detail
                    .as_ref()
                    .map(|d| d.knowledge_base.name.clone())
                    .unwrap_or_default();
                self.prompt.open(PromptKind::RenameKnowledgeBase);
                self.prompt.buffer = current;
            }
            _ => match self.detail.as_ref().map(|d| d.tab) {
                Some(DetailTab::Documents) => self.handle_documents_key(key).await,
                Some(DetailTab::Search) => self.handle_search_key(key).await,
                None => {}
            },
        }
    }

    async fn handle_documents_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.doc_selected = detail.doc_selected.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if let Some(detail) = self.detail.as_mut() {
                    if detail.doc_selected + 1 < detail.documents.filtered().len() {
                        detail.doc_selected += 1;
                    }
                }
            }
            KeyCode::Char('/') => {
                let current = self
                    .detail
                    .as_ref()
                    .map(|d| d.documents.filter().to_string())
                    .unwrap_or_default();
                self.prompt.open(PromptKind::FilterDocuments);
                self.prompt.buffer = current;
            }
            KeyCode::Char('u') => {
                if self.detail.is_some() {
                    self.upload = Some(UploadDraft::new());
                    self.screen = Screen::Upload;
                }
            }
            KeyCode::Char('d') => {
                if let Some(target) = self.detail.as_ref().and_then(|d| d.selected_document()) {
                    self.prompt.open(PromptKind::ConfirmDeleteDocument);
                    self.prompt.target_id = Some(target.0);
                    self.prompt.target_name = Some(target.1);
                }
            }
            KeyCode::Char('p') => self.preview_selected().await,
            KeyCode::Char('r') => self.refresh_documents().await,
            _ => {}
        }
    }

    async fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('/') => {
                let current = self
                    .detail
                    .as_ref()
                    .map(|d| d.query.clone())
                    .unwrap_or_default();
                self.prompt.open(PromptKind::SearchQuery);
                self.prompt.buffer = current;
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.top_k = step_top_k(detail.top_k, key.code == KeyCode::Right);
                }
            }
            KeyCode::Char('m') => {
                // Hybrid is presented but not selectable yet.
                let mut blocked = false;
                if let Some(detail) = self.detail.as_mut() {
                    match detail.mode {
                        RetrievalMode::Vector => blocked = true,
                        RetrievalMode::Hybrid => detail.mode = RetrievalMode::Vector,
                    }
                }
                if blocked {
                    self.notify("hybrid search is coming soon");
                }
            }
            KeyCode::Enter => self.run_search().await,
            _ => {}
        }
    }

    async fn handle_upload_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') => self.prompt.open(PromptKind::AddUploadFile),
            KeyCode::Up => {
                if let Some(draft) = self.upload.as_mut() {
                    draft.selected = draft.selected.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if let Some(draft) = self.upload.as_mut() {
                    if draft.selected + 1 < draft.files.len() {
                        draft.selected += 1;
                    }
                }
            }
            KeyCode::Char('x') => {
                if let Some(draft) = self.upload.as_mut() {
                    if draft.selected < draft.files.len() {
                        draft.files.remove(draft.selected);
                    }
                    if draft.selected >= draft.files.len() {
                        draft.selected = draft.files.len().saturating_sub(1);
                    }
                }
            }
            KeyCode::Tab => {
                if let Some(draft) = self.upload.as_mut() {
                    draft.field = draft.field.toggle();
                }
            }
            KeyCode::Left | KeyCode::Right => {
                let up = key.code == KeyCode::Right;
                if let Some(draft) = self.upload.as_mut() {
                    match draft.field {
                        UploadField::ChunkSize => {
                            let next = step_chunk_size(draft.params.chunk_size(), up);
                            draft.params.set_chunk_size(next);
                        }
                        UploadField::ChunkOverlap => {
                            let next = step_chunk_overlap(draft.params.chunk_overlap(), up);
                            draft.params.set_chunk_overlap(next);
                        }
                    }
                }
            }
            KeyCode::Enter => self.perform_upload().await,
            KeyCode::Esc => {
                self.upload = None;
                self.screen = Screen::Detail;
            }
            _ => {}
        }
    }
}
