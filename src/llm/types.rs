use crate::{Error, Result};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs,
};
use base64::{Engine as _, engine::general_purpose};
use std::fmt;

/// Image formats accepted from the upload picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMimeType {
    Jpeg,
    Png,
}

impl ImageMimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: ImageMimeType,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImagePayload {
    pub fn new(mime_type: ImageMimeType, bytes: Vec<u8>) -> Self {
        Self { mime_type, bytes }
    }

    /// Builds a payload from an uploaded file. The declared content type wins;
    /// a missing or generic one falls back to the file extension.
    pub fn from_upload(
        content_type: Option<&str>,
        file_name: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let declared = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream");

        let mime_type = match declared {
            Some(ct) => ImageMimeType::from_content_type(ct)
                .ok_or_else(|| Error::UnsupportedImageType(ct.to_string()))?,
            None => {
                let name = file_name.unwrap_or("");
                ImageMimeType::from_file_name(name).ok_or_else(|| {
                    Error::UnsupportedImageType(if name.is_empty() {
                        "unknown".to_string()
                    } else {
                        name.to_string()
                    })
                })?
            }
        };

        Ok(Self::new(mime_type, bytes))
    }

    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// A prompt plus at most one image, sent to the model as a single user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub prompt: String,
    pub image: Option<ImagePayload>,
}

impl AnalysisRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }

    pub fn to_openai_message(&self) -> Result<ChatCompletionRequestMessage> {
        let content = match self.image {
            None => ChatCompletionRequestUserMessageContent::Text(self.prompt.clone()),
            Some(ref image) => {
                let text_part = ChatCompletionRequestMessageContentPartTextArgs::default()
                    .text(self.prompt.clone())
                    .build()
                    .map_err(|e| Error::internal(format!("Failed to build text part: {}", e)))?;
                let image_part = ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(
                        ImageUrlArgs::default()
                            .url(image.to_data_url())
                            .build()
                            .map_err(|e| Error::internal(format!("Failed to build image url: {}", e)))?,
                    )
                    .build()
                    .map_err(|e| Error::internal(format!("Failed to build image part: {}", e)))?;

                let parts: Vec<ChatCompletionRequestUserMessageContentPart> =
                    vec![text_part.into(), image_part.into()];
                ChatCompletionRequestUserMessageContent::Array(parts)
            }
        };

        let msg = ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| Error::internal(format!("Failed to build user message: {}", e)))?;
        Ok(msg.into())
    }
}
