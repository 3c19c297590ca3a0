mod actions;
mod input;
mod render;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::*;

use corpora_client::chunking::ChunkingParams;
use corpora_client::{CreationWorkflow, DocumentSession, GatewayClient, PendingFile, SearchSession};
use corpora_core::Settings;
use corpora_core::models::{KnowledgeBase, RetrievalMode};

use crate::state::{ConfigField, DetailTab, PromptState, Screen, UploadField};

/// State of one opened knowledge base: the documents tab and the search tab
/// each own their controller.
pub(crate) struct DetailState {
    knowledge_base: KnowledgeBase,
    tab: DetailTab,
    documents: DocumentSession,
    search: SearchSession,
    doc_selected: usize,
    query: String,
    top_k: u32,
    mode: RetrievalMode,
}

impl DetailState {
    /// Id and name of the document under the cursor in the filtered view.
    fn selected_document(&self) -> Option<(String, String)> {
        let filtered = self.documents.filtered();
        let doc = filtered.get(self.doc_selected)?;
        Some((doc.id.clone(), doc.name.clone()))
    }
}

/// In-place upload draft for the documents tab.
pub(crate) struct UploadDraft {
    files: Vec<PendingFile>,
    params: ChunkingParams,
    selected: usize,
    field: UploadField,
}

impl UploadDraft {
    fn new() -> Self {
        Self {
            files: Vec::new(),
            params: ChunkingParams::default(),
            selected: 0,
            field: UploadField::default(),
        }
    }
}

/// Application state
pub struct App {
    gateway: GatewayClient,
    screen: Screen,
    should_exit: bool,
    /// Persistent context line shown in the header.
    status: String,
    /// Rolling transient messages (validation rejections, failures,
    /// confirmations) shown in the footer — the toast analog.
    notices: Vec<String>,

    knowledge_bases: Vec<KnowledgeBase>,
    kb_selected: usize,

    workflow: CreationWorkflow,
    create_field: ConfigField,
    name_input: String,
    description_input: String,
    file_selected: usize,

    detail: Option<DetailState>,
    upload: Option<UploadDraft>,

    prompt: PromptState,
}

impl App {
    pub async fn new(settings: Settings) -> Self {
        let gateway = GatewayClient::new(&settings);
        let mut app = Self {
            workflow: CreationWorkflow::new(gateway.clone()),
            gateway,
            screen: Screen::KnowledgeBases,
            should_exit: false,
            status: format!("backend: {}", settings.api_base_url),
            notices: Vec::new(),
            knowledge_bases: Vec::new(),
            kb_selected: 0,
            create_field: ConfigField::default(),
            name_input: String::new(),
            description_input: String::new(),
            file_selected: 0,
            detail: None,
            upload: None,
            prompt: PromptState::default(),
        };
        app.refresh_knowledge_bases().await;
        app
    }

    /// Run the application main loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<impl Backend>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        while !self.should_exit {
            terminal.draw(|f| self.draw(f))?;
            self.tick().await?;
        }
        Ok(())
    }

    async fn tick(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key).await;
        }
        Ok(())
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
        if self.notices.len() > 4 {
            self.notices.remove(0);
        }
    }
}
