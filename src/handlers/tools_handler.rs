use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{
        GenerateFlashcardsRequest, GenerateQuizRequest, SolveAssignmentRequest, SolveLabRequest,
        StudyHelperRequest, SummarizeRequest,
    },
};

#[post("/api/v1/tools/generate-quiz")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.tool_service.generate_quiz(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/v1/tools/generate-flashcards")]
pub async fn generate_flashcards(
    state: web::Data<AppState>,
    request: web::Json<GenerateFlashcardsRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .tool_service
        .generate_flashcards(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/v1/tools/summarize")]
pub async fn summarize(
    state: web::Data<AppState>,
    request: web::Json<SummarizeRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.tool_service.summarize(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/v1/tools/solve-assignment")]
pub async fn solve_assignment(
    state: web::Data<AppState>,
    request: web::Json<SolveAssignmentRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .tool_service
        .solve_assignment(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/v1/tools/solve-lab-questions")]
pub async fn solve_lab_questions(
    state: web::Data<AppState>,
    request: web::Json<SolveLabRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.tool_service.solve_lab(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/v1/tools/study-helper")]
pub async fn study_helper(
    state: web::Data<AppState>,
    request: web::Json<StudyHelperRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.tool_service.study_helper(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
