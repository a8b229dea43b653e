use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::attempts::Difficulty;
use crate::error::CoachError;
use crate::persist::write_json_atomic;

const REVISION_TAG: &str = "revision";
const INCOMPLETE_TAG: &str = " not Complete";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserBehavior {
    Completed,
    Skipped,
}

impl UserBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserBehavior::Completed => "completed",
            UserBehavior::Skipped => "skipped",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "completed" => Some(UserBehavior::Completed),
            "skipped" => Some(UserBehavior::Skipped),
            _ => None,
        }
    }
}

/// The current recommendation. At most one exists; each cycle replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SelectedProblemRecord", from = "SelectedProblemRecord")]
pub struct SelectedProblem {
    pub title: String,
    pub link: String,
    /// Difficulty of the recommended problem, as reported
    pub difficulty: String,
    pub previous_difficulty: Difficulty,
    pub recent_tags: Vec<String>,
    /// None when the stored value is not a known behaviour.
    /// A record with no behaviour at all reads as skipped.
    pub user_behavior: Option<UserBehavior>,
    pub reason: String,
    pub is_revision: bool,
    pub was_incomplete: bool,
}

impl SelectedProblem {
    /// Display tag: "revision", " not Complete", both, or nothing
    pub fn tag(&self) -> Option<String> {
        let mut tag = String::new();
        if self.is_revision {
            tag.push_str(REVISION_TAG);
        }
        if self.was_incomplete {
            tag.push_str(INCOMPLETE_TAG);
        }
        if tag.is_empty() {
            None
        } else {
            Some(tag)
        }
    }
}

/// On-disk shape of the selected-problem file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SelectedProblemRecord {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Leetcode Question Link")]
    link: String,
    #[serde(rename = "Difficulty", default)]
    difficulty: String,
    #[serde(rename = "Previous Difficulty", default)]
    previous_difficulty: Option<String>,
    #[serde(rename = "Recent Tags", default)]
    recent_tags: Vec<String>,
    #[serde(rename = "User Behavior", default)]
    user_behavior: Option<String>,
    #[serde(rename = "Reason", default)]
    reason: String,
    #[serde(rename = "Tag", default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

impl From<SelectedProblem> for SelectedProblemRecord {
    fn from(p: SelectedProblem) -> Self {
        let tag = p.tag();
        SelectedProblemRecord {
            title: p.title,
            link: p.link,
            difficulty: p.difficulty,
            previous_difficulty: Some(p.previous_difficulty.as_str().to_string()),
            recent_tags: p.recent_tags,
            user_behavior: p.user_behavior.map(|b| b.as_str().to_string()),
            reason: p.reason,
            tag,
        }
    }
}

impl From<SelectedProblemRecord> for SelectedProblem {
    fn from(r: SelectedProblemRecord) -> Self {
        let tag = r.tag.unwrap_or_default().to_lowercase();
        SelectedProblem {
            title: r.title,
            link: r.link,
            difficulty: r.difficulty,
            previous_difficulty: r
                .previous_difficulty
                .and_then(|d| d.parse().ok())
                .unwrap_or(Difficulty::Medium),
            recent_tags: r.recent_tags,
            user_behavior: match r.user_behavior.as_deref() {
                Some(value) => UserBehavior::parse(value),
                None => Some(UserBehavior::Skipped),
            },
            reason: r.reason,
            is_revision: tag.contains(REVISION_TAG),
            was_incomplete: tag.contains(INCOMPLETE_TAG.trim().to_lowercase().as_str()),
        }
    }
}

/// Persistence boundary for the selected problem
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SelectionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the selected-problem file
    pub async fn save(&self, problem: &SelectedProblem) -> Result<(), CoachError> {
        write_json_atomic(&self.path, problem).await?;
        tracing::info!(title = %problem.title, path = ?self.path, "Selected problem saved");
        Ok(())
    }

    pub async fn load(&self) -> Result<SelectedProblem, CoachError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                CoachError::storage(format!("Failed to parse selected problem: {}", e))
                    .with_context(format!("path: {:?}", self.path))
                    .with_source("serde_json")
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CoachError::storage(
                "No selected problem yet; record an attempt first",
            )
            .with_context(format!("path: {:?}", self.path))),
            Err(e) => Err(CoachError::storage(format!("Failed to read selected problem: {}", e))
                .with_context(format!("path: {:?}", self.path))),
        }
    }
}
