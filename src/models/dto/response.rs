use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Questions exactly as recovered from the model; shape is not enforced.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub questions: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlashcardsResponse {
    pub flashcards: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadAssignmentResponse {
    pub success: bool,
    pub filename: String,
    pub extracted_text: String,
    pub answer: String,
}
