use super::FeedbackEntry;
use crate::{Error, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::{
    fs::{File, OpenOptions},
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
    sync::Mutex,
};
use tracing::{debug, info};

/// Append-only CSV log of feedback entries.
///
/// Writers inside one process are serialized by an internal lock, so concurrent
/// sessions cannot race on header creation. Several processes sharing one file
/// are not coordinated.
pub struct FeedbackStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("Feedback store at: {}", path.display());
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, text: &str) -> Result<()> {
        let _guard = self.lock.lock().await;

        let existing_len = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };
        let needs_header = existing_len == 0;

        // A hand-edited file may lack the final line break
        let mut row = Vec::new();
        if !needs_header && !ends_with_newline(&self.path).await? {
            row.push(b'\n');
        }
        row.extend(encode_row(&FeedbackEntry::new(text), needs_header)?);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&row).await?;
        file.flush().await?;

        debug!(
            "Appended feedback entry ({} bytes, header: {})",
            row.len(),
            needs_header
        );
        Ok(())
    }

    pub async fn load_all(&self) -> Result<Vec<String>> {
        let _guard = self.lock.lock().await;

        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Feedback file does not exist yet: {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let entries = decode_rows(&bytes)?;
        debug!("Loaded {} feedback entries", entries.len());
        Ok(entries)
    }
}

async fn ends_with_newline(path: &Path) -> Result<bool> {
    let mut file = File::open(path).await?;
    file.seek(SeekFrom::End(-1)).await?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).await?;
    Ok(last[0] == b'\n')
}

fn encode_row(entry: &FeedbackEntry, with_header: bool) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(with_header)
        .from_writer(Vec::new());
    writer.serialize(entry)?;
    writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))
}

fn decode_rows(bytes: &[u8]) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    reader
        .deserialize::<FeedbackEntry>()
        .map(|row| row.map(|entry| entry.feedback).map_err(Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FeedbackStore {
        FeedbackStore::new(dir.path().join("feedback.csv"))
    }

    #[tokio::test]
    async fn test_load_all_without_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let entries = store.load_all().await.unwrap();
        assert!(entries.is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        for text in ["Great app", "Add more recipes", "Love the tips"] {
            store.append(text).await.unwrap();
        }

        let entries = store.load_all().await.unwrap();
        assert_eq!(entries, vec!["Great app", "Add more recipes", "Love the tips"]);
    }

    #[tokio::test]
    async fn test_header_written_once() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.append("first").await.unwrap();
        store.append("second").await.unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "feedback\nfirst\nsecond\n");
    }

    #[tokio::test]
    async fn test_special_characters_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let texts = [
            "eggs, toast, and coffee",
            "line one\nline two",
            "she said \"more protein\"",
            "windows\r\nline ending",
        ];
        for text in texts {
            store.append(text).await.unwrap();
        }

        let entries = store.load_all().await.unwrap();
        assert_eq!(entries, texts.to_vec());
    }

    #[tokio::test]
    async fn test_empty_feedback_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.append("").await.unwrap();
        store.append("after empty").await.unwrap();

        let entries = store.load_all().await.unwrap();
        assert_eq!(entries, vec!["", "after empty"]);
    }

    #[tokio::test]
    async fn test_existing_file_is_appended_not_rewritten() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("feedback.csv");
        std::fs::write(&path, "feedback\nfrom a previous run\n").unwrap();

        let store = FeedbackStore::new(&path);
        store.append("new entry").await.unwrap();

        let entries = store.load_all().await.unwrap();
        assert_eq!(entries, vec!["from a previous run", "new entry"]);
    }

    #[tokio::test]
    async fn test_zero_length_file_gets_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("feedback.csv");
        std::fs::write(&path, "").unwrap();

        let store = FeedbackStore::new(&path);
        store.append("hello").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "feedback\nhello\n");
    }

    #[tokio::test]
    async fn test_missing_final_line_break_is_restored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("feedback.csv");
        std::fs::write(&path, "feedback\nedited by hand").unwrap();

        let store = FeedbackStore::new(&path);
        store.append("hello").await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "feedback\nedited by hand\nhello\n"
        );
    }

    #[tokio::test]
    async fn test_concurrent_appends() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&temp_dir));

        let mut handles = vec![];
        for i in 0..10 {
            let store_clone = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store_clone.append(&format!("Feedback {}", i)).await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let entries = store.load_all().await.unwrap();
        assert_eq!(entries.len(), 10);

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.matches("feedback\n").count(), 1);
    }

    #[tokio::test]
    async fn test_large_entry() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let large = "x".repeat(10000);
        store.append(&large).await.unwrap();

        let entries = store.load_all().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].len(), 10000);
    }

    #[tokio::test]
    async fn test_unwritable_path_surfaces_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FeedbackStore::new(temp_dir.path().join("missing-dir").join("feedback.csv"));

        let result = store.append("lost").await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
