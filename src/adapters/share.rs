use crate::domain::model::SharePayload;
use crate::domain::ports::ShareSheet;
use crate::utils::error::{GreenError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// 終端機沒有原生分享選單
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedShareSheet;

#[async_trait]
impl ShareSheet for UnsupportedShareSheet {
    fn is_available(&self) -> bool {
        false
    }

    fn can_share(&self, _payload: &SharePayload) -> bool {
        false
    }

    async fn share(&self, _payload: &SharePayload) -> Result<()> {
        Err(GreenError::ShareUnavailable {
            message: "no share capability on this platform".to_string(),
        })
    }
}

/// 交給外部分享指令 (例如 `kdeconnect-cli --share`)。
///
/// 圖片寫到暫存目錄後以路徑參數傳入；標題與文字放在
/// `GREEN_COMMUTE_SHARE_TITLE` / `GREEN_COMMUTE_SHARE_TEXT` 環境變數。
/// 指令以非零狀態結束視為使用者取消。
#[derive(Debug, Clone)]
pub struct CommandShareSheet {
    program: String,
    args: Vec<String>,
    supports_files: bool,
    scratch_dir: PathBuf,
}

impl CommandShareSheet {
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command.split_first().ok_or_else(|| GreenError::ConfigError {
            message: "share_command cannot be empty".to_string(),
        })?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            supports_files: true,
            scratch_dir: std::env::temp_dir().join("green-commute-share"),
        })
    }

    pub fn text_only(mut self) -> Self {
        self.supports_files = false;
        self
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    async fn write_files(&self, payload: &SharePayload) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::with_capacity(payload.files.len());
        if payload.has_files() {
            tokio::fs::create_dir_all(&self.scratch_dir).await?;
        }
        for file in &payload.files {
            let path = self.scratch_dir.join(&file.name);
            tokio::fs::write(&path, &file.bytes).await?;
            paths.push(path);
        }
        Ok(paths)
    }
}

#[async_trait]
impl ShareSheet for CommandShareSheet {
    fn is_available(&self) -> bool {
        true
    }

    fn can_share(&self, payload: &SharePayload) -> bool {
        !payload.has_files() || self.supports_files
    }

    async fn share(&self, payload: &SharePayload) -> Result<()> {
        let paths = self.write_files(payload).await?;

        tracing::debug!("Running share command {} with {} file(s)", self.program, paths.len());
        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .args(&paths)
            .env("GREEN_COMMUTE_SHARE_TITLE", &payload.title)
            .env("GREEN_COMMUTE_SHARE_TEXT", &payload.text)
            .status()
            .await;

        for path in &paths {
            if let Err(e) = tokio::fs::remove_file(path).await {
                tracing::debug!("Could not remove {}: {}", path.display(), e);
            }
        }

        let status = status.map_err(|e| GreenError::ShareUnavailable {
            message: format!("cannot run {}: {}", self.program, e),
        })?;
        if !status.success() {
            return Err(GreenError::ShareCancelled);
        }
        Ok(())
    }
}
