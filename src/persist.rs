use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::error::CoachError;

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

/// Serialize `value` as pretty JSON and replace `path` atomically:
/// write a sibling temp file, then rename it over the target.
pub async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CoachError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CoachError::storage(
                format!("Failed to create directory: {}", e)
            ).with_context(format!("path: {:?}", parent)))?;
    }

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CoachError::storage(
            format!("Failed to serialize {}: {}", path.display(), e)
        ))?;

    let tmp = temp_path_for(path);
    tokio::fs::write(&tmp, json)
        .await
        .map_err(|e| CoachError::storage(
            format!("Failed to write temp file: {}", e)
        ).with_context(format!("path: {:?}", tmp)))?;

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(CoachError::storage(
            format!("Failed to replace file: {}", e)
        ).with_context(format!("path: {:?}", path)));
    }

    Ok(())
}
