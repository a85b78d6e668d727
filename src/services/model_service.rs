use std::sync::Arc;

use crate::{
    config::ModelConfig,
    errors::{AppError, AppResult},
    models::conversation::Conversation,
    services::upstream::{ChatCompletionClient, UpstreamError, UpstreamErrorKind},
};

/// What the fallback loop does after a candidate fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    TryNextModel,
    Abort,
}

/// Decides whether a failure on `model` is worth retrying on the next candidate.
///
/// Availability failures always move on. A candidate whose id names a vision model
/// also moves on unless the error is about vision input. Remaining invalid requests
/// abort; anything unrecognised moves on.
pub fn failure_action(model: &str, err: &UpstreamError) -> FailureAction {
    match err.kind {
        UpstreamErrorKind::RateLimited
        | UpstreamErrorKind::Overloaded
        | UpstreamErrorKind::ModelUnavailable => FailureAction::TryNextModel,
        _ if is_vision_model(model) && !err.mentions_vision() => FailureAction::TryNextModel,
        UpstreamErrorKind::InvalidRequest => FailureAction::Abort,
        UpstreamErrorKind::Unknown => FailureAction::TryNextModel,
    }
}

pub fn is_vision_model(model: &str) -> bool {
    model.to_lowercase().contains("vision")
}

/// Builds the ordered, duplicate-free list of models to try for one call.
pub fn candidate_models(preferred: Option<&str>, fallback_models: &[String]) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::with_capacity(fallback_models.len() + 1);

    if let Some(model) = preferred.map(str::trim).filter(|m| !m.is_empty()) {
        candidates.push(model.to_string());
    }
    for model in fallback_models {
        if !candidates.contains(model) {
            candidates.push(model.clone());
        }
    }

    candidates
}

pub struct ModelService {
    client: Arc<dyn ChatCompletionClient>,
    models: ModelConfig,
}

impl ModelService {
    pub fn new(client: Arc<dyn ChatCompletionClient>, models: ModelConfig) -> Self {
        Self { client, models }
    }

    pub fn models(&self) -> &ModelConfig {
        &self.models
    }

    /// Sends `conversation` to each candidate model in turn and returns the first
    /// successful completion.
    pub async fn invoke(
        &self,
        conversation: &Conversation,
        preferred_model: Option<&str>,
    ) -> AppResult<String> {
        if conversation.is_empty() {
            return Err(AppError::ValidationError(
                "conversation must contain at least one turn".to_string(),
            ));
        }

        let candidates = candidate_models(preferred_model, &self.models.fallback_models);
        let mut last_error: Option<UpstreamError> = None;

        for model in &candidates {
            log::info!("Attempting chat completion with model {}", model);

            let err = match self
                .client
                .create_chat_completion(model, conversation, &self.models.generation)
                .await
            {
                Ok(text) => {
                    log::info!("Chat completion succeeded with model {}", model);
                    return Ok(text);
                }
                Err(err) => err,
            };

            log::warn!("Model {} failed ({:?}): {}", model, err.kind, err);

            match failure_action(model, &err) {
                FailureAction::TryNextModel => {
                    log::info!("Switching from {} to next candidate model", model);
                    last_error = Some(err);
                }
                FailureAction::Abort => {
                    log::error!("Model {} rejected the request, not retrying", model);
                    return Err(AppError::UpstreamRejected {
                        model: model.clone(),
                        source: err,
                    });
                }
            }
        }

        match last_error {
            Some(source) => {
                log::error!("All {} candidate models failed", candidates.len());
                Err(AppError::UpstreamExhausted {
                    attempts: candidates.len(),
                    source,
                })
            }
            None => Err(AppError::InternalError(
                "no candidate models configured".to_string(),
            )),
        }
    }
}
