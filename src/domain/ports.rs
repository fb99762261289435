use crate::core::card::ShareCard;
use crate::domain::model::{Notification, ShareAsset, SharePayload};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 將已排版好的分享卡模板轉成 PNG
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, card: &ShareCard, pixel_ratio: f32) -> Result<Vec<u8>>;
}

/// 觸發下載；回傳檔案實際存放的位置
#[async_trait]
pub trait FileSaver: Send + Sync {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String>;
}

/// 平台原生分享選單
#[async_trait]
pub trait ShareSheet: Send + Sync {
    /// 平台是否有任何分享能力
    fn is_available(&self) -> bool;

    /// 平台能否分享這份內容 (例如附帶檔案)
    fn can_share(&self, payload: &SharePayload) -> bool;

    async fn share(&self, payload: &SharePayload) -> Result<()>;
}

pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// 預覽用的暫時參照；建立後一定要 revoke
pub trait ObjectUrls: Send + Sync {
    fn create(&self, asset: &ShareAsset) -> Result<String>;
    fn revoke(&self, url: &str);
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// 分享管線需要的設定值
pub trait ConfigProvider: Send + Sync {
    fn page_url(&self) -> &str;
    fn pixel_ratio(&self) -> f32;
}
