use std::path::{Path, PathBuf};
use crate::attempts::model::Attempt;
use crate::error::CoachError;
use crate::persist::write_json_atomic;

/// Append-only attempt history backed by a single JSON array file.
/// Single writer assumed; each append rewrites the whole file.
#[derive(Debug, Clone)]
pub struct AttemptStore {
    path: PathBuf,
}

impl AttemptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AttemptStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all attempts, oldest first. A missing file is an empty history;
    /// an unreadable or corrupt file is a storage error.
    pub async fn load_all(&self) -> Result<Vec<Attempt>, CoachError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                serde_json::from_str::<Vec<Attempt>>(&content)
                    .map_err(|e| CoachError::storage(
                        format!("Failed to parse attempt history: {}", e)
                    ).with_context(format!("path: {:?}", self.path)).with_source("serde_json"))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "No attempt history yet");
                Ok(Vec::new())
            }
            Err(e) => {
                Err(CoachError::storage(
                    format!("Failed to read attempt history: {}", e)
                ).with_context(format!("path: {:?}", self.path)))
            }
        }
    }

    /// Append one attempt and return the full updated history
    pub async fn append(&self, attempt: Attempt) -> Result<Vec<Attempt>, CoachError> {
        let mut attempts = self.load_all().await?;
        tracing::info!(
            title = %attempt.title,
            completed = %attempt.completed,
            date = %attempt.date_attempted,
            "Recording attempt"
        );
        attempts.push(attempt);
        write_json_atomic(&self.path, &attempts).await?;
        tracing::debug!(count = attempts.len(), path = ?self.path, "Attempt history saved");
        Ok(attempts)
    }
}
