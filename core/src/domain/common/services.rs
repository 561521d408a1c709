use std::sync::Arc;

use crate::domain::analysis::ports::LLMClient;

/// Provider-facing service; cheap to clone, the client is shared.
pub struct Service<LLM: LLMClient> {
    pub(crate) llm_client: Arc<LLM>,
}

impl<LLM: LLMClient> Service<LLM> {
    pub fn new(llm_client: LLM) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
        }
    }
}

impl<LLM: LLMClient> Clone for Service<LLM> {
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
        }
    }
}
