use crate::domain::model::ShareAsset;
use crate::domain::ports::ObjectUrls;
use crate::utils::error::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// 預覽圖寫成暫存檔，revoke 時刪除
#[derive(Debug)]
pub struct TempFileObjectUrls {
    dir: PathBuf,
    next_id: AtomicU64,
}

impl TempFileObjectUrls {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl ObjectUrls for TempFileObjectUrls {
    fn create(&self, asset: &ShareAsset) -> Result<String> {
        std::fs::create_dir_all(&self.dir)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let path = self.dir.join(format!("preview-{}-{}", id, asset.file_name));
        std::fs::write(&path, &asset.png)?;
        Ok(path.display().to_string())
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = std::fs::remove_file(url) {
            tracing::warn!("Could not remove preview file {}: {}", url, e);
        }
    }
}

/// 記憶體內的 `blob:` 參照；可查詢目前仍存活的數量
#[derive(Debug, Default)]
pub struct MemoryObjectUrls {
    next_id: AtomicU64,
    live: Mutex<HashSet<String>>,
}

impl MemoryObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }
}

impl ObjectUrls for MemoryObjectUrls {
    fn create(&self, _asset: &ShareAsset) -> Result<String> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let url = format!("blob:green-commute/{}", id);
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.clone());
        Ok(url)
    }

    fn revoke(&self, url: &str) {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url);
    }
}
