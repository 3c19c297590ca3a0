use corpora_core::models::KnowledgeBase;
use tracing::info;

use crate::admission::{Rejection, admit};
use crate::chunking::ChunkingParams;
use crate::errors::WorkflowError;
use crate::gateway::GatewayClient;
use crate::pending::PendingFile;

/// Stage of one knowledge-base creation session.
///
/// Linear `Upload -> Config -> Complete`, with `Config -> Upload` allowed as
/// a step back. Each variant carries exactly the data valid for that stage:
/// the created knowledge base exists only once the session is complete.
#[derive(Debug, Clone)]
pub enum WorkflowStage {
    Upload,
    Config,
    Complete {
        knowledge_base: KnowledgeBase,
        params: ChunkingParams,
    },
}

impl WorkflowStage {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Zero-based position for a step indicator.
    pub fn position(&self) -> usize {
        match self {
            Self::Upload => 0,
            Self::Config => 1,
            Self::Complete { .. } => 2,
        }
    }
}

/// Drives one knowledge-base creation session from file selection through
/// chunking configuration to the created knowledge base.
///
/// Submission takes `&mut self`, so a second submission cannot start while
/// one is in flight — the exclusive borrow is the structural guard, matching
/// the single-threaded cooperative model.
pub struct CreationWorkflow {
    gateway: GatewayClient,
    stage: WorkflowStage,
    files: Vec<PendingFile>,
    params: ChunkingParams,
}

impl CreationWorkflow {
    pub fn new(gateway: GatewayClient) -> Self {
        Self {
            gateway,
            stage: WorkflowStage::Upload,
            files: Vec::new(),
            params: ChunkingParams::default(),
        }
    }

    pub fn stage(&self) -> &WorkflowStage {
        &self.stage
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn params(&self) -> ChunkingParams {
        self.params
    }

    pub fn set_chunk_size(&mut self, size: u32) {
        self.params.set_chunk_size(size);
    }

    pub fn set_chunk_overlap(&mut self, overlap: u32) {
        self.params.set_chunk_overlap(overlap);
    }

    /// Offer a candidate batch to the admission validator and merge whatever
    /// it admits. Returns the rejections for notification display.
    pub fn offer_files(&mut self, candidates: Vec<PendingFile>) -> Vec<Rejection> {
        let outcome = admit(self.files.len(), candidates);
        self.files.extend(outcome.admitted);
        outcome.rejections
    }

    /// Drop one pending file by position.
    pub fn remove_file(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    /// Whether the upload stage may advance: at least one admitted file.
    /// The UI disables the control when this is false.
    pub fn can_advance(&self) -> bool {
        matches!(self.stage, WorkflowStage::Upload) && !self.files.is_empty()
    }

    /// Move from upload to configuration. Returns whether the transition
    /// happened; a no-op unless the guard holds.
    pub fn advance_to_config(&mut self) -> bool {
        if self.can_advance() {
            self.stage = WorkflowStage::Config;
            true
        } else {
            false
        }
    }

    /// Step back from configuration to file selection.
    pub fn back_to_upload(&mut self) {
        if matches!(self.stage, WorkflowStage::Config) {
            self.stage = WorkflowStage::Upload;
        }
    }

    /// Create the knowledge base, then upload the pending files with the
    /// current parameters.
    ///
    /// An empty trimmed name fails locally before any network call. A create
    /// failure leaves the session in the configuration stage. An upload
    /// failure after a successful create is not rolled back — the error
    /// carries the created knowledge base so the caller can steer the user
    /// there and retry the upload through a document session.
    pub async fn submit(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<KnowledgeBase, WorkflowError> {
        if !matches!(self.stage, WorkflowStage::Config) {
            return Err(WorkflowError::NotConfiguring);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkflowError::EmptyName);
        }
        let description = description.trim();
        let description = (!description.is_empty()).then_some(description);

        let knowledge_base = self
            .gateway
            .create_knowledge_base(name, description)
            .await
            .map_err(WorkflowError::Create)?;
        info!(id = %knowledge_base.id, "knowledge base created");

        if !self.files.is_empty()
            && let Err(source) = self
                .gateway
                .upload_documents(&knowledge_base.id, &self.files, self.params)
                .await
        {
            return Err(WorkflowError::UploadAfterCreate {
                knowledge_base,
                source,
            });
        }

        self.files.clear();
        self.stage = WorkflowStage::Complete {
            knowledge_base: knowledge_base.clone(),
            params: self.params,
        };
        Ok(knowledge_base)
    }

    /// Discard the session and start a fresh one in the upload stage.
    pub fn reset(&mut self) {
        self.stage = WorkflowStage::Upload;
        self.files.clear();
        self.params = ChunkingParams::default();
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use corpora_core::Settings;

    use super::*;
    use crate::admission::Rejection;

    fn workflow() -> CreationWorkflow {
        // Port 9 (discard) — unit tests never get far enough to connect.
        let settings = Settings {
            api_base_url: "http://127.0.0.1:9/api".to_string(),
        };
        CreationWorkflow::new(GatewayClient::new(&settings))
    }

    fn file(name: &str) -> PendingFile {
        PendingFile {
            name: name.to_string(),
            size: 10,
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn cannot_advance_without_files() {
        let mut flow = workflow();
        assert!(!flow.can_advance());
        assert!(!flow.advance_to_config());
        assert_eq!(flow.stage().position(), 0);
    }

    #[test]
    fn advances_once_a_file_is_admitted() {
        let mut flow = workflow();
        let rejections = flow.offer_files(vec![file("notes.md")]);
        assert!(rejections.is_empty());
        assert!(flow.advance_to_config());
        assert_eq!(flow.stage().position(), 1);

        flow.back_to_upload();
        assert_eq!(flow.stage().position(), 0);
    }

    #[test]
    fn rejections_pass_through_to_the_caller() {
        let mut flow = workflow();
        let rejections = flow.offer_files(vec![file("virus.exe")]);
        assert_eq!(
            rejections,
            vec![Rejection::UnsupportedFormat {
                file: "virus.exe".to_string()
            }]
        );
        assert!(flow.files().is_empty());
    }

    #[test]
    fn remove_file_ignores_out_of_range_index() {
        let mut flow = workflow();
        flow.offer_files(vec![file("a.txt"), file("b.txt")]);
        flow.remove_file(5);
        assert_eq!(flow.files().len(), 2);
        flow.remove_file(0);
        assert_eq!(flow.files()[0].name, "b.txt");
    }

    #[tokio::test]
    async fn submit_outside_config_stage_is_rejected() {
        let mut flow = workflow();
        let err = flow.submit("Docs", "").await.unwrap_err();
        assert!(matches!(err, WorkflowError::NotConfiguring));
    }

    #[tokio::test]
    async fn empty_name_fails_locally_before_any_network_call() {
        let mut flow = workflow();
        flow.offer_files(vec![file("notes.md")]);
        assert!(flow.advance_to_config());
        let err = flow.submit("   ", "desc").await.unwrap_err();
        assert!(matches!(err, WorkflowError::EmptyName));
        // Still configurable after the local failure.
        assert_eq!(flow.stage().position(), 1);
    }

    #[test]
    fn reset_restores_a_fresh_session() {
        let mut flow = workflow();
        flow.offer_files(vec![file("notes.md")]);
        flow.set_chunk_size(512);
        flow.advance_to_config();
        flow.reset();
        assert!(flow.files().is_empty());
        assert_eq!(flow.params(), ChunkingParams::default());
        assert_eq!(flow.stage().position(), 0);
    }
}
