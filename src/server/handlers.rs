use super::types::{
    AnalyzeResponse, ErrorResponse, FeedbackAck, FeedbackListResponse, FeedbackRequest,
    TipsRequest, TipsResponse,
};
use crate::{
    Error, Result,
    llm::ImagePayload,
    shell::{AnalyzeOutcome, Shell},
};
use axum::{
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Json},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Clone)]
pub struct AppState {
    pub shell: Arc<Shell>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(action: &str, e: Error) -> HandlerError {
    let status = e.status_code();
    if status.is_server_error() {
        error!("{} failed: {}", action, e);
    } else {
        warn!("{} rejected: {}", action, e);
    }
    (status, Json(ErrorResponse { error: e.to_string() }))
}

#[derive(Debug, Default)]
struct UploadForm {
    prompt: String,
    image: Option<ImagePayload>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::bad_request(format!("Failed to parse multipart data: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "prompt" => {
                form.prompt = field
                    .text()
                    .await
                    .map_err(|e| Error::bad_request(format!("Failed to read prompt: {}", e)))?;
            }
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| Error::bad_request(format!("Failed to read image: {}", e)))?;

                // Browsers submit an empty part when no file was picked.
                if bytes.is_empty() {
                    continue;
                }

                form.image = Some(ImagePayload::from_upload(
                    content_type.as_deref(),
                    file_name.as_deref(),
                    bytes.to_vec(),
                )?);
            }
            other => debug!("Ignoring multipart field: {}", other),
        }
    }

    Ok(form)
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Json<AnalyzeResponse>, HandlerError> {
    let form = read_upload_form(multipart)
        .await
        .map_err(|e| error_response("Analyze", e))?;

    match state.shell.analyze(&form.prompt, form.image).await {
        Ok(AnalyzeOutcome::Analysis(analysis)) => {
            info!("Analysis completed ({} chars)", analysis.len());
            Ok(Json(AnalyzeResponse { analysis }))
        }
        Ok(AnalyzeOutcome::InputRequired(message)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )),
        Err(e) => Err(error_response("Analyze", e)),
    }
}

pub async fn preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<impl IntoResponse, HandlerError> {
    let form = read_upload_form(multipart)
        .await
        .map_err(|e| error_response("Preview", e))?;
    let image = form
        .image
        .ok_or_else(|| error_response("Preview", Error::bad_request("No image uploaded")))?;

    let shell = Arc::clone(&state.shell);
    let png = tokio::task::spawn_blocking(move || shell.preview(&image))
        .await
        .map_err(|e| error_response("Preview", Error::internal(format!("Preview task failed: {e}"))))?
        .map_err(|e| error_response("Preview", e))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

pub async fn tips(
    State(state): State<AppState>,
    Json(request): Json<TipsRequest>,
) -> std::result::Result<Json<TipsResponse>, HandlerError> {
    let tip = state
        .shell
        .toggle_tips(request.enabled)
        .await
        .map_err(|e| error_response("Tips", e))?;
    Ok(Json(TipsResponse { tip }))
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> std::result::Result<Json<FeedbackAck>, HandlerError> {
    let message = state
        .shell
        .submit_feedback(&request.feedback)
        .await
        .map_err(|e| error_response("Submit feedback", e))?;
    Ok(Json(FeedbackAck {
        message: message.to_string(),
    }))
}

pub async fn list_feedback(
    State(state): State<AppState>,
) -> std::result::Result<Json<FeedbackListResponse>, HandlerError> {
    let entries = state
        .shell
        .view_feedback()
        .await
        .map_err(|e| error_response("View feedback", e))?;
    Ok(Json(FeedbackListResponse { entries }))
}
