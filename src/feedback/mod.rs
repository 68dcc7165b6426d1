mod storage;
mod types;

pub use storage::FeedbackStore;
pub use types::FeedbackEntry;
