use crate::domain::ports::FileSaver;
use crate::utils::error::{GreenError, Result};
use async_trait::async_trait;
use std::path::Path;

/// 「下載」到本機的輸出目錄
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

#[async_trait]
impl FileSaver for LocalStorage {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        // 只接受單純的檔名，避免寫出輸出目錄
        if file_name.contains(['/', '\\']) || file_name == ".." {
            return Err(GreenError::DownloadFailure {
                message: format!("refusing to save outside output directory: {}", file_name),
            });
        }

        let full_path = Path::new(&self.base_path).join(file_name);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                GreenError::DownloadFailure {
                    message: format!("cannot create {}: {}", parent.display(), e),
                }
            })?;
        }

        tokio::fs::write(&full_path, bytes)
            .await
            .map_err(|e| GreenError::DownloadFailure {
                message: format!("cannot write {}: {}", full_path.display(), e),
            })?;

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), full_path.display());
        Ok(full_path.display().to_string())
    }
}
