//! Page actions.
//!
//! Each user action on the page maps to exactly one method here. Nothing is
//! re-run when another control changes, so a gateway call happens only when
//! the action that needs it is triggered.

mod preview;
pub mod prompts;

pub use preview::{DEFAULT_PREVIEW_MAX_SIDE, render_thumbnail};

use crate::{
    Result,
    feedback::FeedbackStore,
    llm::{AnalysisRequest, ImagePayload, InferenceGateway},
};
use prompts::{DEFAULT_ANALYSIS_PROMPT, FEEDBACK_ACKNOWLEDGEMENT, MISSING_INPUT_MESSAGE, TIPS_PROMPT};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    Analysis(String),
    /// Neither a prompt nor an image was supplied; no gateway call was made.
    InputRequired(&'static str),
}

pub struct Shell {
    gateway: Arc<dyn InferenceGateway>,
    feedback: Arc<FeedbackStore>,
    preview_max_side: u32,
}

impl Shell {
    pub fn new(gateway: Arc<dyn InferenceGateway>, feedback: Arc<FeedbackStore>) -> Self {
        Self {
            gateway,
            feedback,
            preview_max_side: DEFAULT_PREVIEW_MAX_SIDE,
        }
    }

    pub fn with_preview_max_side(mut self, max_side: u32) -> Self {
        self.preview_max_side = max_side;
        self
    }

    /// "Analyze Meal". The typed prompt is used when non-empty, otherwise the
    /// default nutrition prompt.
    pub async fn analyze(&self, prompt: &str, image: Option<ImagePayload>) -> Result<AnalyzeOutcome> {
        if prompt.is_empty() && image.is_none() {
            info!("Analyze requested without prompt or image");
            return Ok(AnalyzeOutcome::InputRequired(MISSING_INPUT_MESSAGE));
        }

        let custom_prompt = !prompt.is_empty();
        let prompt = if prompt.is_empty() {
            DEFAULT_ANALYSIS_PROMPT
        } else {
            prompt
        };

        let mut request = AnalysisRequest::text(prompt);
        if let Some(image) = image {
            request = request.with_image(image);
        }

        info!(
            "Analyzing meal (custom prompt: {}, image: {})",
            custom_prompt,
            request.image.is_some()
        );

        let analysis = self.gateway.generate(request).await?;
        Ok(AnalyzeOutcome::Analysis(analysis))
    }

    /// File selection. Renders a PNG thumbnail of the upload.
    pub fn preview(&self, image: &ImagePayload) -> Result<Vec<u8>> {
        render_thumbnail(image, self.preview_max_side)
    }

    /// "View Nutritional Tips". Turning it on fetches a fresh tip; turning it
    /// off hides it without a call.
    pub async fn toggle_tips(&self, enabled: bool) -> Result<Option<String>> {
        if !enabled {
            return Ok(None);
        }

        info!("Fetching nutritional tip");
        let tip = self.gateway.generate(AnalysisRequest::text(TIPS_PROMPT)).await?;
        Ok(Some(tip))
    }

    /// "Submit Feedback". The text is stored verbatim, empty included.
    pub async fn submit_feedback(&self, text: &str) -> Result<&'static str> {
        self.feedback.append(text).await?;
        info!("Feedback submitted ({} chars)", text.len());
        Ok(FEEDBACK_ACKNOWLEDGEMENT)
    }

    /// "View Submitted Feedback". Hiding the table is handled by the page.
    pub async fn view_feedback(&self) -> Result<Vec<String>> {
        self.feedback.load_all().await
    }
}
