use corpora_core::models::KnowledgeBase;

/// Failures talking to the backend gateway.
///
/// A non-2xx response is always an `Api` failure named after the operation;
/// status codes are not distinguished beyond success/failure.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{operation}: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },
}

/// Failures of the knowledge-base creation workflow.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("knowledge base name must not be empty")]
    EmptyName,
    #[error("submission is only possible from the configuration stage")]
    NotConfiguring,
    #[error("failed to create knowledge base: {0}")]
    Create(#[source] GatewayError),
    /// The knowledge base exists server-side; nothing is rolled back. The
    /// created record rides along so the caller can steer the user to it
    /// and retry the upload there.
    #[error("knowledge base {name:?} was created but the document upload failed: {source}", name = .knowledge_base.name)]
    UploadAfterCreate {
        knowledge_base: KnowledgeBase,
        #[source]
        source: GatewayError,
    },
}

/// Failures of a retrieval query.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search query must not be empty")]
    EmptyQuery,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub type ClientResult<T> = Result<T, GatewayError>;
