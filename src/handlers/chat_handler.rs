use actix_multipart::{Multipart, MultipartError};
use actix_web::{get, post, web, HttpResponse};
use futures::TryStreamExt;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        conversation::Conversation,
        dto::{request::ChatRequest, response::ChatResponse},
    },
    services::file_processor::{upload_media_type, Attachment},
};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[post("/api/v1/chat")]
pub async fn chat(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let conversation = Conversation::new(request.messages);
    let response = state
        .model_service
        .invoke(&conversation, request.model.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ChatResponse { response }))
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::ValidationError(format!("invalid multipart upload: {}", err))
}

/// Reads the first file field of the form.
async fn read_upload(mut payload: Multipart) -> Result<(String, Attachment), AppError> {
    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let filename = match field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
        {
            Some(filename) => filename.to_string(),
            None => continue,
        };
        let media_type = upload_media_type(
            field.content_type().map(|mime| mime.essence_str()),
            &filename,
        );

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::ValidationError(format!(
                    "file exceeds the {} byte upload limit",
                    MAX_UPLOAD_BYTES
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok((filename, Attachment::from_bytes(&media_type, bytes)));
    }

    Err(AppError::ValidationError(
        "multipart form must contain a file".to_string(),
    ))
}

#[post("/api/v1/upload-assignment")]
pub async fn upload_assignment(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let (filename, attachment) = read_upload(payload).await?;
    let response = state
        .tool_service
        .solve_uploaded_assignment(filename, attachment)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "EduGen AI backend is running"
    }))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        services::upstream::{MockChatCompletionClient, UpstreamError},
        test_utils::{
            fixtures::sample_pdf,
            test_helpers::{assert_error_status, assert_success_status},
        },
    };
    use actix_web::{
        http::{header, StatusCode},
        test, App,
    };
    use serde_json::json;
    use std::sync::Arc;

    fn state(client: MockChatCompletionClient) -> web::Data<AppState> {
        web::Data::new(AppState::with_client(
            Config::test_config(),
            Arc::new(client),
        ))
    }

    const BOUNDARY: &str = "edugen-test-boundary";

    fn upload_request(filename: &str, content_type: &str, bytes: &[u8]) -> test::TestRequest {
        let mut body = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            BOUNDARY, filename, content_type
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        test::TestRequest::post()
            .uri("/api/v1/upload-assignment")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn test_upload_assignment_answers_text_file() {
        let mut client = MockChatCompletionClient::new();
        client
            .expect_create_chat_completion()
            .times(1)
            .returning(|_, _, _| Ok("Q1: B".to_string()));

        let app =
            test::init_service(App::new().app_data(state(client)).service(upload_assignment)).await;
        let req = upload_request("mcq.txt", "text/plain", b"Q1. Which organelle makes ATP?").to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({
                "success": true,
                "filename": "mcq.txt",
                "extracted_text": "Q1. Which organelle makes ATP?",
                "answer": "Q1: B"
            })
        );
    }

    #[actix_web::test]
    async fn test_upload_assignment_reads_pdf() {
        let mut client = MockChatCompletionClient::new();
        client
            .expect_create_chat_completion()
            .times(1)
            .returning(|_, _, _| Ok("Osmosis is...".to_string()));

        let app =
            test::init_service(App::new().app_data(state(client)).service(upload_assignment)).await;
        let req = upload_request("hw.pdf", "application/pdf", &sample_pdf("Define osmosis")).to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["filename"], "hw.pdf");
        assert!(body["extracted_text"]
            .as_str()
            .unwrap()
            .contains("Define osmosis"));
    }

    #[actix_web::test]
    async fn test_upload_assignment_rejects_images() {
        let mut client = MockChatCompletionClient::new();
        client.expect_create_chat_completion().times(0);

        let app =
            test::init_service(App::new().app_data(state(client)).service(upload_assignment)).await;
        let req = upload_request("scan.png", "image/png", b"not really a png").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check).service(root)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
    }

    #[actix_web::test]
    async fn test_chat_uses_requested_model_first() {
        let mut client = MockChatCompletionClient::new();
        client
            .expect_create_chat_completion()
            .withf(|model, conversation, _| model == "gemma2-9b-it" && conversation.len() == 2)
            .times(1)
            .returning(|_, _, _| Ok("Hello there".to_string()));

        let app = test::init_service(App::new().app_data(state(client)).service(chat)).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/chat")
            .set_json(json!({
                "messages": [
                    { "role": "system", "content": "You are a tutor." },
                    { "role": "user", "content": "Hi" }
                ],
                "model": "gemma2-9b-it"
            }))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "response": "Hello there" }));
    }

    #[actix_web::test]
    async fn test_chat_rejects_empty_messages() {
        let mut client = MockChatCompletionClient::new();
        client.expect_create_chat_completion().times(0);

        let app = test::init_service(App::new().app_data(state(client)).service(chat)).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/chat")
            .set_json(json!({ "messages": [] }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_chat_maps_rejection_to_bad_gateway() {
        let mut client = MockChatCompletionClient::new();
        client
            .expect_create_chat_completion()
            .times(1)
            .returning(|_, _, _| Err(UpstreamError::new(Some(400), "HTTP 400: invalid messages")));

        let app = test::init_service(App::new().app_data(state(client)).service(chat)).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/chat")
            .set_json(json!({ "messages": [{ "role": "user", "content": "Hi" }] }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
