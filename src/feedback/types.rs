use serde::{Deserialize, Serialize};

/// One row of the feedback file. The field name doubles as the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub feedback: String,
}

impl FeedbackEntry {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
        }
    }
}
