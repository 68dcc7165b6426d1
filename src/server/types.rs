use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
pub struct TipsRequest {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub tip: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackAck {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackListResponse {
    pub entries: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
