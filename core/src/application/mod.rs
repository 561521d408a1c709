use crate::{
    domain::common::{LabelIqConfig, services::Service},
    infrastructure::llm::GeminiLLMClient,
};

pub type LabelIqService = Service<GeminiLLMClient>;

pub fn create_service(config: LabelIqConfig) -> LabelIqService {
    tracing::info!(model = %config.llm.gemini_model, "creating analysis service");
    Service::new(GeminiLLMClient::from(&config.llm))
}
