use serde::Deserialize;
use validator::Validate;

use crate::models::conversation::Turn;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "messages must not be empty"))]
    pub messages: Vec<Turn>,

    #[serde(default)]
    pub model: Option<String>,
}

/// Uploaded files as base64 strings (optionally data-URL prefixed) with their media types.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attachments {
    #[serde(default)]
    pub files_data: Vec<String>,

    #[serde(default)]
    pub file_types: Vec<String>,
}

impl Attachments {
    pub fn is_empty(&self) -> bool {
        self.files_data.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[serde(default)]
    pub content: Option<String>,

    #[serde(flatten)]
    pub attachments: Attachments,

    #[serde(default = "default_num_questions")]
    #[validate(range(min = 1, max = 50))]
    pub num_questions: u32,

    #[serde(default = "default_difficulty")]
    pub difficulty: String,

    #[serde(default = "default_question_type")]
    pub question_type: String,

    #[serde(default = "default_quiz_focus")]
    pub quiz_focus: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateFlashcardsRequest {
    #[serde(default)]
    pub content: Option<String>,

    #[serde(flatten)]
    pub attachments: Attachments,

    #[serde(default = "default_num_cards")]
    #[validate(range(min = 1, max = 100))]
    pub num_cards: u32,

    #[serde(default = "default_card_style")]
    pub card_style: String,

    #[serde(default = "default_focus_all")]
    pub focus_area: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub content: Option<String>,

    #[serde(flatten)]
    pub attachments: Attachments,

    #[serde(default = "default_summary_mode")]
    pub mode: String,

    #[serde(default = "default_summary_format")]
    pub summary_format: String,

    #[serde(default = "default_focus_general")]
    pub focus_area: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SolveAssignmentRequest {
    pub questions: String,

    #[serde(flatten)]
    pub attachments: Attachments,

    #[serde(default = "default_subject")]
    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[serde(default = "default_marks")]
    pub marks: String,

    #[serde(default = "default_assignment_style")]
    pub style: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SolveLabRequest {
    pub questions: String,

    #[serde(flatten)]
    pub attachments: Attachments,

    #[serde(default = "default_subject")]
    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[serde(default = "default_language")]
    #[validate(length(min = 1, max = 50))]
    pub language: String,

    #[serde(default = "default_lab_style")]
    pub style: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StudyHelperRequest {
    pub questions: String,

    #[serde(flatten)]
    pub attachments: Attachments,

    #[serde(default = "default_subject")]
    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[serde(default = "default_difficulty")]
    pub difficulty: String,

    #[serde(default = "default_study_mode")]
    pub study_mode: String,

    #[serde(default = "default_tutor_persona")]
    pub tutor_persona: String,
}

fn default_num_questions() -> u32 {
    5
}

fn default_num_cards() -> u32 {
    10
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_question_type() -> String {
    "mixed".to_string()
}

fn default_quiz_focus() -> String {
    "comprehensive".to_string()
}

fn default_card_style() -> String {
    "standard".to_string()
}

fn default_focus_all() -> String {
    "all".to_string()
}

fn default_summary_mode() -> String {
    "standard".to_string()
}

fn default_summary_format() -> String {
    "bullet_points".to_string()
}

fn default_focus_general() -> String {
    "general".to_string()
}

fn default_subject() -> String {
    "General".to_string()
}

fn default_marks() -> String {
    "5".to_string()
}

fn default_assignment_style() -> String {
    "academic".to_string()
}

fn default_language() -> String {
    "Python".to_string()
}

fn default_lab_style() -> String {
    "detailed".to_string()
}

fn default_study_mode() -> String {
    "balanced".to_string()
}

fn default_tutor_persona() -> String {
    "friendly".to_string()
}
