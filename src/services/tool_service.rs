use std::sync::Arc;

use validator::Validate;

use crate::{
    constants::{
        instructions::{
            assignment_style_note, difficulty_instructions, lab_style_instructions,
            marks_instructions, persona_instructions, study_mode_instructions,
        },
        prompts::{
            render_template, ASSIGNMENT_SOLVER_PROMPT, ATTACHED_CONTENT_PLACEHOLDER,
            FLASHCARD_GENERATION_PROMPT, LAB_SOLVER_PROMPT, QUIZ_GENERATION_PROMPT,
            STRICT_JSON_SUFFIX, STRICT_SUMMARY_SUFFIX, STUDY_HELPER_PROMPT, SUMMARIZATION_PROMPT,
            UPLOAD_ASSIGNMENT_PROMPT,
        },
    },
    errors::{AppError, AppResult},
    models::{
        conversation::{ContentPart, Conversation, Turn},
        dto::{
            request::{
                Attachments, GenerateFlashcardsRequest, GenerateQuizRequest,
                SolveAssignmentRequest, SolveLabRequest, StudyHelperRequest, SummarizeRequest,
            },
            response::{
                AnswerResponse, FlashcardsResponse, QuizResponse, SummaryResponse,
                UploadAssignmentResponse,
            },
        },
    },
    services::{
        file_processor::{attachment_text, decode_attachments, image_parts, Attachment},
        json_extract::extract_json,
        model_service::ModelService,
    },
};

/// A conversation ready to send plus the model it should be tried on first.
struct PreparedCall {
    conversation: Conversation,
    model: String,
}

/// Prompt-driven study tools built on top of [`ModelService`].
pub struct ToolService {
    model_service: Arc<ModelService>,
}

impl ToolService {
    pub fn new(model_service: Arc<ModelService>) -> Self {
        Self { model_service }
    }

    pub async fn generate_quiz(&self, request: GenerateQuizRequest) -> AppResult<QuizResponse> {
        request.validate()?;

        let num_questions = request.num_questions.to_string();
        let call = self.prepare_content_call(
            request.content.as_deref(),
            &request.attachments,
            STRICT_JSON_SUFFIX,
            |content| {
                render_template(
                    QUIZ_GENERATION_PROMPT,
                    &[
                        ("content", content),
                        ("num_questions", num_questions.as_str()),
                        ("difficulty", request.difficulty.as_str()),
                        ("question_type", request.question_type.as_str()),
                        ("quiz_focus", request.quiz_focus.as_str()),
                    ],
                )
            },
        )?;

        let raw = self.send(call).await?;
        log::debug!("Quiz response: {}", preview(&raw));

        Ok(QuizResponse {
            questions: extract_json(&raw)?,
        })
    }

    pub async fn generate_flashcards(
        &self,
        request: GenerateFlashcardsRequest,
    ) -> AppResult<FlashcardsResponse> {
        request.validate()?;

        let num_cards = request.num_cards.to_string();
        let call = self.prepare_content_call(
            request.content.as_deref(),
            &request.attachments,
            STRICT_JSON_SUFFIX,
            |content| {
                render_template(
                    FLASHCARD_GENERATION_PROMPT,
                    &[
                        ("content", content),
                        ("num_cards", num_cards.as_str()),
                        ("card_style", request.card_style.as_str()),
                        ("focus_area", request.focus_area.as_str()),
                    ],
                )
            },
        )?;

        let raw = self.send(call).await?;
        log::debug!("Flashcards response: {}", preview(&raw));

        Ok(FlashcardsResponse {
            flashcards: extract_json(&raw)?,
        })
    }

    pub async fn summarize(&self, request: SummarizeRequest) -> AppResult<SummaryResponse> {
        request.validate()?;

        let call = self.prepare_content_call(
            request.content.as_deref(),
            &request.attachments,
            STRICT_SUMMARY_SUFFIX,
            |content| {
                render_template(
                    SUMMARIZATION_PROMPT,
                    &[
                        ("content", content),
                        ("summary_mode", request.mode.as_str()),
                        ("summary_format", request.summary_format.as_str()),
                        ("focus_area", request.focus_area.as_str()),
                    ],
                )
            },
        )?;

        Ok(SummaryResponse {
            summary: self.send(call).await?,
        })
    }

    pub async fn solve_assignment(
        &self,
        request: SolveAssignmentRequest,
    ) -> AppResult<AnswerResponse> {
        request.validate()?;

        let questions = questions_with_attachments(&request.questions, &request.attachments)?;
        let instructions = format!(
            "{}{}",
            marks_instructions(&request.marks),
            assignment_style_note(&request.style)
        );
        let prompt = render_template(
            ASSIGNMENT_SOLVER_PROMPT,
            &[
                ("subject", request.subject.as_str()),
                ("questions", questions.as_str()),
                ("marks", request.marks.as_str()),
                ("style", request.style.as_str()),
                ("marks_instructions", instructions.as_str()),
            ],
        );

        self.answer(prompt).await
    }

    pub async fn solve_lab(&self, request: SolveLabRequest) -> AppResult<AnswerResponse> {
        request.validate()?;

        let questions = questions_with_attachments(&request.questions, &request.attachments)?;
        let language_lower = request.language.to_lowercase();
        let prompt = render_template(
            LAB_SOLVER_PROMPT,
            &[
                ("subject", request.subject.as_str()),
                ("questions", questions.as_str()),
                ("language", request.language.as_str()),
                ("language_lower", language_lower.as_str()),
                ("style", request.style.as_str()),
                ("style_instructions", lab_style_instructions(&request.style)),
            ],
        );

        self.answer(prompt).await
    }

    pub async fn study_helper(&self, request: StudyHelperRequest) -> AppResult<AnswerResponse> {
        request.validate()?;

        let questions = questions_with_attachments(&request.questions, &request.attachments)?;
        let prompt = render_template(
            STUDY_HELPER_PROMPT,
            &[
                ("subject", request.subject.as_str()),
                ("questions", questions.as_str()),
                ("difficulty", request.difficulty.to_uppercase().as_str()),
                ("study_mode", request.study_mode.to_uppercase().as_str()),
                ("tutor_persona", request.tutor_persona.to_uppercase().as_str()),
                ("persona_instructions", persona_instructions(&request.tutor_persona)),
                ("difficulty_instructions", difficulty_instructions(&request.difficulty)),
                ("study_mode_instructions", study_mode_instructions(&request.study_mode)),
            ],
        );

        self.answer(prompt).await
    }

    /// Answers an uploaded assignment file from its extracted text.
    pub async fn solve_uploaded_assignment(
        &self,
        filename: String,
        attachment: Attachment,
    ) -> AppResult<UploadAssignmentResponse> {
        let extracted_text = attachment.extract_text()?;
        if extracted_text.is_empty() {
            return Err(AppError::ValidationError(
                "Could not extract text from file".to_string(),
            ));
        }
        log::info!(
            "Solving uploaded assignment {} ({}, {} chars)",
            filename,
            attachment.media_type,
            extracted_text.chars().count()
        );

        let prompt = render_template(
            UPLOAD_ASSIGNMENT_PROMPT,
            &[("extracted_text", extracted_text.as_str())],
        );
        let AnswerResponse { answer } = self.answer(prompt).await?;

        Ok(UploadAssignmentResponse {
            success: true,
            filename,
            extracted_text,
            answer,
        })
    }

    /// Text-only solver prompts go through the fallback list from the top.
    async fn answer(&self, prompt: String) -> AppResult<AnswerResponse> {
        let conversation = Conversation::single(Turn::user(prompt));
        let answer = self.model_service.invoke(&conversation, None).await?;
        Ok(AnswerResponse { answer })
    }

    async fn send(&self, call: PreparedCall) -> AppResult<String> {
        self.model_service
            .invoke(&call.conversation, Some(&call.model))
            .await
    }

    /// Attachments go to the vision model as image parts after the instruction text;
    /// otherwise the inline content is sent to the text model.
    fn prepare_content_call(
        &self,
        content: Option<&str>,
        attachments: &Attachments,
        strict_suffix: &str,
        render: impl Fn(&str) -> String,
    ) -> AppResult<PreparedCall> {
        let models = self.model_service.models();

        if !attachments.is_empty() {
            let decoded = decode_attachments(&attachments.files_data, &attachments.file_types)?;
            let mut parts = vec![ContentPart::text(format!(
                "{}{}",
                render(ATTACHED_CONTENT_PLACEHOLDER),
                strict_suffix
            ))];
            parts.extend(image_parts(&decoded)?);

            return Ok(PreparedCall {
                conversation: Conversation::single(Turn::user_parts(parts)),
                model: models.vision_model.clone(),
            });
        }

        let content = content
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                AppError::ValidationError("content or files_data is required".to_string())
            })?;

        Ok(PreparedCall {
            conversation: Conversation::single(Turn::user(render(content))),
            model: models.text_model.clone(),
        })
    }
}

fn questions_with_attachments(questions: &str, attachments: &Attachments) -> AppResult<String> {
    if attachments.is_empty() {
        return Ok(questions.to_string());
    }
    let decoded = decode_attachments(&attachments.files_data, &attachments.file_types)?;
    Ok(format!("{}{}", questions, attachment_text(&decoded)))
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
