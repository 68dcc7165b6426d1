use super::MockGateway;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use peakform::{
    config::{Config, LlmConfig},
    feedback::FeedbackStore,
    shell::Shell,
};
use std::{io::Cursor, sync::Arc};
use tempfile::TempDir;

/// Create a test configuration with a dummy key pointed at `base_url`
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        llm: LlmConfig {
            base_url: base_url.to_string(),
            api_key: "test-api-key".to_string(),
            ..LlmConfig::default()
        },
        ..Config::default()
    }
}

/// Create a feedback store backed by a fresh temporary directory
pub fn create_test_store() -> (TempDir, Arc<FeedbackStore>) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let store = FeedbackStore::new(temp_dir.path().join("feedback.csv"));
    (temp_dir, Arc::new(store))
}

/// Create a shell wired to a mock gateway and a temporary feedback file
pub fn create_test_shell(gateway: &MockGateway) -> (TempDir, Shell) {
    let (temp_dir, store) = create_test_store();
    let shell = Shell::new(Arc::new(gateway.clone()), store);
    (temp_dir, shell)
}

/// Encode a solid-color image in the given format
pub fn sample_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([34, 139, 34])));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .expect("Failed to encode sample image");
    bytes
}
