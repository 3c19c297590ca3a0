/// Smallest chunk size offered by the size slider.
pub const CHUNK_SIZE_MIN: u32 = 256;
/// Largest chunk size offered by the size slider.
pub const CHUNK_SIZE_MAX: u32 = 2048;
/// Size slider step.
pub const CHUNK_SIZE_STEP: u32 = 256;
/// Overlap slider step.
pub const CHUNK_OVERLAP_STEP: u32 = 50;
/// Bounds for the result-count control.
pub const TOP_K_MIN: u32 = 1;
pub const TOP_K_MAX: u32 = 20;

/// Top-level screen the TUI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    KnowledgeBases,
    Create,
    Detail,
    Upload,
}

/// Tab within the knowledge-base detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Documents,
    Search,
}

impl DetailTab {
    pub fn toggle(self) -> Self {
        match self {
            Self::Documents => Self::Search,
            Self::Search => Self::Documents,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Documents => "Documents",
            Self::Search => "Search",
        }
    }
}

/// Focused field in the creation config stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigField {
    #[default]
    Name,
    Description,
    ChunkSize,
    ChunkOverlap,
}

impl ConfigField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Description,
            Self::Description => Self::ChunkSize,
            Self::ChunkSize => Self::ChunkOverlap,
            Self::ChunkOverlap => Self::Name,
        }
    }

    /// Whether typed characters go into this field.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Name | Self::Description)
    }
}

/// Focused slider in the in-place upload panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadField {
    #[default]
    ChunkSize,
    ChunkOverlap,
}

impl UploadField {
    pub fn toggle(self) -> Self {
        match self {
            Self::ChunkSize => Self::ChunkOverlap,
            Self::ChunkOverlap => Self::ChunkSize,
        }
    }
}

/// Modal text prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    AddCreateFile,
    AddUploadFile,
    FilterDocuments,
    SearchQuery,
    RenameKnowledgeBase,
    ConfirmDeleteKnowledgeBase,
    ConfirmDeleteDocument,
}

#[derive(Debug, Default)]
pub struct PromptState {
    pub kind: Option<PromptKind>,
    pub buffer: String,
    /// Id of the record a confirmation refers to.
    pub target_id: Option<String>,
    /// Display name for the confirmation text.
    pub target_name: Option<String>,
}

impl PromptState {
    pub fn open(&mut self, kind: PromptKind) {
        self.kind = Some(kind);
        self.buffer.clear();
        self.target_id = None;
        self.target_name = None;
    }

    pub fn close(&mut self) {
        self.kind = None;
        self.buffer.clear();
        self.target_id = None;
        self.target_name = None;
    }
}

/// Step the size slider within its UI range.
pub fn step_chunk_size(current: u32, up: bool) -> u32 {
    if up {
        (current + CHUNK_SIZE_STEP).min(CHUNK_SIZE_MAX)
    } else {
        current.saturating_sub(CHUNK_SIZE_STEP).max(CHUNK_SIZE_MIN)
    }
}

/// Step the overlap slider. The parameter model clamps the result into the
/// valid domain, so only the step itself is handled here.
pub fn step_chunk_overlap(current: u32, up: bool) -> u32 {
    if up {
        current + CHUNK_OVERLAP_STEP
    } else {
        current.saturating_sub(CHUNK_OVERLAP_STEP)
    }
}

/// Step the result-count control within [1, 20].
pub fn step_top_k(current: u32, up: bool) -> u32 {
    if up {
        (current + 1).min(TOP_K_MAX)
    } else {
        current.saturating_sub(1).max(TOP_K_MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_tab_toggle() {
        assert_eq!(DetailTab::Documents.toggle(), DetailTab::Search);
        assert_eq!(DetailTab::Search.toggle(), DetailTab::Documents);
    }

    #[test]
    fn test_config_field_cycle() {
        let mut field = ConfigField::Name;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, ConfigField::Name);
        assert!(ConfigField::Description.is_text());
        assert!(!ConfigField::ChunkSize.is_text());
    }

    #[test]
    fn test_chunk_size_stepping_stays_in_range() {
        assert_eq!(step_chunk_size(1024, true), 1280);
        assert_eq!(step_chunk_size(2048, true), 2048);
        assert_eq!(step_chunk_size(256, false), 256);
        assert_eq!(step_chunk_size(512, false), 256);
    }

    #[test]
    fn test_top_k_stepping_stays_in_bounds() {
        assert_eq!(step_top_k(20, true), 20);
        assert_eq!(step_top_k(1, false), 1);
        assert_eq!(step_top_k(5, true), 6);
    }

    #[test]
    fn test_overlap_stepping_saturates_at_zero() {
        assert_eq!(step_chunk_overlap(30, false), 0);
        assert_eq!(step_chunk_overlap(200, true), 250);
    }
}
