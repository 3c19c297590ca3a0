use corpora_core::models::{RetrievalMode, RetrievalResponse, SearchRequest};

use crate::errors::SearchError;
use crate::gateway::GatewayClient;

/// Issues similarity searches against one knowledge base and holds the
/// latest result set.
///
/// A new search replaces the displayed results wholesale; nothing is cached
/// across queries and results die with the session. `search` takes
/// `&mut self`, so at most one request of this kind is in flight.
pub struct SearchSession {
    gateway: GatewayClient,
    knowledge_base_id: String,
    results: Option<RetrievalResponse>,
}

impl SearchSession {
    pub fn new(gateway: GatewayClient, knowledge_base_id: impl Into<String>) -> Self {
        Self {
            gateway,
            knowledge_base_id: knowledge_base_id.into(),
            results: None,
        }
    }

    pub fn knowledge_base_id(&self) -> &str {
        &self.knowledge_base_id
    }

    /// The latest result set, if a search has completed.
    pub fn results(&self) -> Option<&RetrievalResponse> {
        self.results.as_ref()
    }

    /// Run a search.
    ///
    /// An all-whitespace query fails locally without touching the network.
    /// `top_k` is forwarded as given — the UI bounds it to [1, 20], and the
    /// backend is authoritative on rejecting anything else.
    pub async fn search(
        &mut self,
        query: &str,
        top_k: u32,
        mode: RetrievalMode,
    ) -> Result<&RetrievalResponse, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let request = SearchRequest {
            query: query.to_string(),
            knowledge_base_id: self.knowledge_base_id.clone(),
            top_k,
            retrieval_type: mode,
        };
        let response = self.gateway.search(&request).await?;
        Ok(self.results.insert(response))
    }
}

#[cfg(test)]
mod tests {
    use corpora_core::Settings;

    use super::*;

    fn session() -> SearchSession {
        let settings = Settings {
            api_base_url: "http://127.0.0.1:9/api".to_string(),
        };
        SearchSession::new(GatewayClient::new(&settings), "kb-1")
    }

    #[tokio::test]
    async fn whitespace_query_fails_locally_without_a_network_call() {
        let mut search = session();
        let err = search.search("   \t", 5, RetrievalMode::Vector).await.unwrap_err();
        assert!(matches!(err, SearchError::EmptyQuery));
        assert!(search.results().is_none());
    }
}
