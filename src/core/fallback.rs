use crate::core::messages;
use crate::core::share_text::SHARE_TITLE;
use crate::domain::model::{Notification, ShareAsset, ShareFile, SharePayload};
use crate::domain::ports::{FileSaver, ShareSheet};
use crate::utils::error::{GreenError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShareTier {
    /// 分享選單附帶圖片
    Files,
    /// 分享選單只帶文字
    TextOnly,
    /// 沒有分享能力時改成下載
    Download,
}

impl ShareTier {
    pub const ORDER: [ShareTier; 3] = [ShareTier::Files, ShareTier::TextOnly, ShareTier::Download];
}

/// 成功的那一層以及要顯示給使用者的通知
#[derive(Debug, Clone, PartialEq)]
pub struct TierSuccess {
    pub tier: ShareTier,
    pub location: Option<String>,
    pub notification: Notification,
}

/// 依序嘗試各層分享方式；不可用或失敗就換下一層，只回報最後結果
pub struct ShareChain<'a> {
    sheet: &'a dyn ShareSheet,
    saver: &'a dyn FileSaver,
    tiers: &'a [ShareTier],
}

impl<'a> ShareChain<'a> {
    pub fn new(sheet: &'a dyn ShareSheet, saver: &'a dyn FileSaver) -> Self {
        Self::with_tiers(sheet, saver, &ShareTier::ORDER)
    }

    pub fn with_tiers(
        sheet: &'a dyn ShareSheet,
        saver: &'a dyn FileSaver,
        tiers: &'a [ShareTier],
    ) -> Self {
        Self { sheet, saver, tiers }
    }

    pub async fn run(&self, asset: &ShareAsset, text: &str) -> Result<TierSuccess> {
        for &tier in self.tiers {
            if !self.is_available(tier, asset, text) {
                tracing::debug!("Share tier {:?} unavailable, advancing", tier);
                continue;
            }

            match self.attempt(tier, asset, text).await {
                Ok(success) => {
                    tracing::info!("Share completed via {:?}", tier);
                    return Ok(success);
                }
                Err(e) => {
                    tracing::warn!("Share tier {:?} failed: {}, advancing", tier, e);
                }
            }
        }

        Err(GreenError::ShareUnavailable {
            message: "every share tier was unavailable or failed".to_string(),
        })
    }

    fn is_available(&self, tier: ShareTier, asset: &ShareAsset, text: &str) -> bool {
        match tier {
            ShareTier::Files => self.sheet.can_share(&file_payload(asset, text)),
            ShareTier::TextOnly => self.sheet.is_available(),
            ShareTier::Download => true,
        }
    }

    async fn attempt(&self, tier: ShareTier, asset: &ShareAsset, text: &str) -> Result<TierSuccess> {
        match tier {
            ShareTier::Files => {
                self.sheet.share(&file_payload(asset, text)).await?;
                Ok(TierSuccess {
                    tier,
                    location: None,
                    notification: messages::shared_with_image(),
                })
            }
            ShareTier::TextOnly => {
                self.sheet.share(&text_payload(text)).await?;
                Ok(TierSuccess {
                    tier,
                    location: None,
                    notification: messages::shared_text_only(),
                })
            }
            ShareTier::Download => {
                let location = self.saver.save(&asset.file_name, &asset.png).await?;
                Ok(TierSuccess {
                    tier,
                    location: Some(location),
                    notification: messages::download_ready(),
                })
            }
        }
    }
}

pub fn file_payload(asset: &ShareAsset, text: &str) -> SharePayload {
    SharePayload {
        title: SHARE_TITLE.to_string(),
        text: text.to_string(),
        files: vec![ShareFile {
            name: asset.file_name.clone(),
            mime_type: ShareAsset::MIME_TYPE.to_string(),
            bytes: asset.png.clone(),
        }],
    }
}

pub fn text_payload(text: &str) -> SharePayload {
    SharePayload {
        title: SHARE_TITLE.to_string(),
        text: text.to_string(),
        files: Vec::new(),
    }
}
