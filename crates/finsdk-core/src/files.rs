use std::path::Path;
use std::sync::Arc;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::FileError;

/// Text-file helper serializing all access through one lock.
///
/// Clones share the lock, so every reader and writer built from the same
/// store is mutually exclusive regardless of which task calls it.
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `content` plus a line terminator to the file at `path`,
    /// creating it if needed.
    pub async fn append(&self, path: impl AsRef<Path>, content: &str) -> Result<(), FileError> {
        let path = path.as_ref();
        let _guard = self.lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| io_error(path, e))?;
        file.write_all(content.as_bytes())
            .await
            .map_err(|e| io_error(path, e))?;
        file.write_all(b"\n").await.map_err(|e| io_error(path, e))?;
        file.flush().await.map_err(|e| io_error(path, e))?;

        debug!(path = %path.display(), bytes = content.len(), "file append complete");
        Ok(())
    }

    /// Read the whole file at `path` as text.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<String, FileError> {
        let path = path.as_ref();
        let _guard = self.lock.lock().await;

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| io_error(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "file read complete");
        Ok(content)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> FileError {
    FileError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::FileStore;
    use crate::error::FileError;

    #[tokio::test]
    async fn append_then_read_roundtrips_with_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.txt");
        let store = FileStore::new();

        store.append(&path, "first").await.unwrap();
        store.append(&path, "second").await.unwrap();

        let content = store.read(&path).await.unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[tokio::test]
    async fn read_missing_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let store = FileStore::new();

        let err = store.read(&path).await.unwrap_err();
        let FileError::Io { path: reported, .. } = err;
        assert!(reported.ends_with("absent.txt"));
    }

    #[tokio::test]
    async fn concurrent_appends_never_interleave_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.txt");
        let store = FileStore::new();

        let mut tasks = Vec::new();
        for n in 0..8 {
            let store = store.clone();
            let path = path.clone();
            tasks.push(tokio::spawn(async move {
                store.append(&path, &format!("line-{n}")).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let content = store.read(&path).await.unwrap();
        let mut lines: Vec<&str> = content.lines().collect();
        lines.sort();
        assert_eq!(lines.len(), 8);
        for n in 0..8 {
            assert!(lines.contains(&format!("line-{n}").as_str()));
        }
    }
}
