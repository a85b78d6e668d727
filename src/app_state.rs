use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        model_service::ModelService,
        tool_service::ToolService,
        upstream::{ChatCompletionClient, GroqClient},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub model_service: Arc<ModelService>,
    pub tool_service: Arc<ToolService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let client = Arc::new(GroqClient::new(
            config.groq_api_base.clone(),
            config.groq_api_key.clone(),
        ));
        Self::with_client(config, client)
    }

    /// Builds the services on top of an arbitrary upstream client.
    pub fn with_client(config: Config, client: Arc<dyn ChatCompletionClient>) -> Self {
        let model_service = Arc::new(ModelService::new(client, config.models.clone()));
        let tool_service = Arc::new(ToolService::new(model_service.clone()));

        Self {
            model_service,
            tool_service,
            config: Arc::new(config),
        }
    }
}
