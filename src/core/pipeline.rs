use crate::core::card::ShareCard;
use crate::core::fallback::{ShareChain, ShareTier};
use crate::core::intent::intent_url;
use crate::core::messages;
use crate::core::share_text::{compose_share_text, share_file_name};
use crate::domain::model::{ImpactSnapshot, IntentPlatform, ShareAsset};
use crate::domain::ports::{
    ConfigProvider, FileSaver, Notifier, ObjectUrls, Rasterizer, ShareSheet, UrlOpener,
};
use crate::utils::error::{GreenError, Result};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    Idle,
    Generating,
    Ready,
}

/// 每個操作的最終結果；失敗已經轉成通知，不會往外丟錯誤
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Outcome {
    Downloaded { location: String },
    Shared { tier: ShareTier },
    Previewing { url: String },
    Opened { url: String },
    Dismissed,
    /// 已有分享卡正在產生，這次請求被忽略
    Busy,
    /// 預覽在產生途中被關閉，結果被丟棄
    Discarded,
    NoPreview,
    Failed { reason: String },
}

/// 管線用到的所有平台能力
#[derive(Clone)]
pub struct Capabilities {
    pub rasterizer: Arc<dyn Rasterizer>,
    pub saver: Arc<dyn FileSaver>,
    pub share_sheet: Arc<dyn ShareSheet>,
    pub opener: Arc<dyn UrlOpener>,
    pub object_urls: Arc<dyn ObjectUrls>,
    pub notifier: Arc<dyn Notifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareSettings {
    pub page_url: String,
    pub pixel_ratio: f32,
}

impl ShareSettings {
    pub const DEFAULT_PIXEL_RATIO: f32 = 2.0;

    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            pixel_ratio: Self::DEFAULT_PIXEL_RATIO,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            page_url: config.page_url().to_string(),
            pixel_ratio: config.pixel_ratio(),
        }
    }
}

/// 預覽用的暫時參照，離開作用域時一定會被 revoke
pub struct PreviewUrl {
    url: String,
    registry: Arc<dyn ObjectUrls>,
}

impl PreviewUrl {
    pub fn create(registry: Arc<dyn ObjectUrls>, asset: &ShareAsset) -> Result<Self> {
        let url = registry.create(asset)?;
        tracing::debug!("Created preview reference {}", url);
        Ok(Self { url, registry })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        tracing::debug!("Revoking preview reference {}", self.url);
        self.registry.revoke(&self.url);
    }
}

struct PreviewSession {
    asset: ShareAsset,
    share_text: String,
    url: PreviewUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Purpose {
    Save,
    Share,
    Preview,
}

struct Inner {
    state: PipelineState,
    epoch: u64,
    purpose: Option<Purpose>,
    preview: Option<PreviewSession>,
}

pub struct SharePipeline {
    caps: Capabilities,
    settings: ShareSettings,
    inner: Mutex<Inner>,
}

impl SharePipeline {
    pub fn new(caps: Capabilities, settings: ShareSettings) -> Self {
        Self {
            caps,
            settings,
            inner: Mutex::new(Inner {
                state: PipelineState::Idle,
                epoch: 0,
                purpose: None,
                preview: None,
            }),
        }
    }

    pub fn settings(&self) -> &ShareSettings {
        &self.settings
    }

    pub fn state(&self) -> PipelineState {
        self.lock().state
    }

    pub fn preview_url(&self) -> Option<String> {
        self.lock()
            .preview
            .as_ref()
            .map(|session| session.url.as_str().to_string())
    }

    /// 產生 PNG；失敗一律是 `RenderFailure`
    pub async fn render_to_image(&self, snapshot: &ImpactSnapshot) -> Result<ShareAsset> {
        let card = ShareCard::from_snapshot(snapshot);
        let ratio = self.settings.pixel_ratio;

        let png = self
            .caps
            .rasterizer
            .rasterize(&card, ratio)
            .await
            .map_err(|e| match e {
                GreenError::RenderFailure { .. } => e,
                other => GreenError::RenderFailure {
                    message: other.to_string(),
                },
            })?;

        if png.is_empty() {
            return Err(GreenError::RenderFailure {
                message: "rasterizer returned no data".to_string(),
            });
        }

        let scale = |px: u32| (px as f32 * ratio).round() as u32;
        Ok(ShareAsset {
            png,
            file_name: share_file_name(snapshot.display_name()),
            width: scale(card.width),
            height: scale(card.height),
        })
    }

    /// 「儲存分享卡」：產生後直接下載
    pub async fn save_card(&self, snapshot: &ImpactSnapshot) -> Outcome {
        let Some(epoch) = self.begin(Purpose::Save) else {
            return self.busy();
        };
        let asset = match self.generate(epoch, snapshot).await {
            Ok(asset) => asset,
            Err(outcome) => return outcome,
        };

        let outcome = self.download(&asset).await;
        self.reset_to_idle(epoch);
        outcome
    }

    /// 原生分享 (圖片 -> 純文字 -> 下載)
    pub async fn share_native(&self, snapshot: &ImpactSnapshot) -> Outcome {
        let Some(epoch) = self.begin(Purpose::Share) else {
            return self.busy();
        };
        let asset = match self.generate(epoch, snapshot).await {
            Ok(asset) => asset,
            Err(outcome) => return outcome,
        };

        let text = compose_share_text(snapshot, &self.settings.page_url);
        let outcome = self.share_through_chain(&asset, &text).await;
        self.reset_to_idle(epoch);
        outcome
    }

    /// 開啟平台的預填貼文網址；不產生圖片，也不改變狀態
    pub fn open_intent(&self, platform: IntentPlatform, snapshot: &ImpactSnapshot) -> Outcome {
        let text = compose_share_text(snapshot, &self.settings.page_url);
        let url = intent_url(platform, &text, &self.settings.page_url);

        match self.caps.opener.open(&url) {
            Ok(()) => {
                tracing::info!("Opened {} share link", platform.label());
                Outcome::Opened { url }
            }
            Err(e) => {
                tracing::warn!("Could not open {} share link: {}", platform.label(), e);
                self.caps
                    .notifier
                    .notify(messages::link_failed(platform.label()));
                Outcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// 產生圖片並開啟預覽；若已有預覽，先釋放舊的參照
    pub async fn preview(&self, snapshot: &ImpactSnapshot) -> Outcome {
        let Some(epoch) = self.begin(Purpose::Preview) else {
            return self.busy();
        };
        let asset = match self.generate(epoch, snapshot).await {
            Ok(asset) => asset,
            Err(outcome) => return outcome,
        };

        let url = match PreviewUrl::create(self.caps.object_urls.clone(), &asset) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("❌ Could not create preview reference: {}", e);
                self.reset_to_idle(epoch);
                self.caps.notifier.notify(messages::render_failed());
                return Outcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let href = url.as_str().to_string();
        let session = PreviewSession {
            asset,
            share_text: compose_share_text(snapshot, &self.settings.page_url),
            url,
        };

        let rejected = {
            let mut inner = self.lock();
            if inner.epoch == epoch && inner.state == PipelineState::Ready {
                inner.preview = Some(session);
                None
            } else {
                Some(session)
            }
        };
        if rejected.is_some() {
            tracing::warn!("Preview closed before it could be shown, releasing it");
            drop(rejected);
            return Outcome::Discarded;
        }

        tracing::info!("Preview ready");
        Outcome::Previewing { url: href }
    }

    /// 預覽中的「分享」：沿用已產生的圖片，不重新產生
    pub async fn preview_share(&self) -> Outcome {
        let Some((epoch, session)) = self.take_preview() else {
            return Outcome::NoPreview;
        };
        let outcome = self
            .share_through_chain(&session.asset, &session.share_text)
            .await;
        drop(session);
        self.reset_to_idle(epoch);
        outcome
    }

    /// 預覽中的「下載」：沿用已產生的圖片
    pub async fn preview_download(&self) -> Outcome {
        let Some((epoch, session)) = self.take_preview() else {
            return Outcome::NoPreview;
        };
        let outcome = self.download(&session.asset).await;
        drop(session);
        self.reset_to_idle(epoch);
        outcome
    }

    /// 關閉預覽；產生中的預覽會被取消，之後回來的結果直接丟棄
    pub fn close_preview(&self) -> Outcome {
        let released = {
            let mut inner = self.lock();
            match (inner.state, inner.purpose) {
                (PipelineState::Generating, Some(Purpose::Preview)) => {
                    inner.epoch += 1;
                    inner.state = PipelineState::Idle;
                    inner.purpose = None;
                    tracing::debug!("Preview closed while generating, cancelling render");
                    None
                }
                (PipelineState::Ready, _) if inner.preview.is_some() => {
                    inner.state = PipelineState::Idle;
                    inner.purpose = None;
                    inner.preview.take()
                }
                _ => None,
            }
        };

        // 在鎖外 revoke
        drop(released);
        Outcome::Dismissed
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn busy(&self) -> Outcome {
        tracing::debug!("Share card generation already in progress, ignoring request");
        Outcome::Busy
    }

    fn begin(&self, purpose: Purpose) -> Option<u64> {
        let (epoch, released) = {
            let mut inner = self.lock();
            match inner.state {
                PipelineState::Generating => return None,
                // Ready 但沒有預覽 = 圖片正在被下載或分享
                PipelineState::Ready if inner.preview.is_none() => return None,
                _ => {}
            }
            let released = inner.preview.take();
            inner.state = PipelineState::Generating;
            inner.purpose = Some(purpose);
            inner.epoch += 1;
            (inner.epoch, released)
        };

        if released.is_some() {
            tracing::debug!("Released previous preview before generating a new card");
        }
        drop(released);
        Some(epoch)
    }

    async fn generate(
        &self,
        epoch: u64,
        snapshot: &ImpactSnapshot,
    ) -> std::result::Result<ShareAsset, Outcome> {
        tracing::debug!("Generating share card for {}", snapshot.display_name());

        match self.render_to_image(snapshot).await {
            Ok(asset) => {
                if self.finish_generation(epoch) {
                    tracing::debug!("Share card ready ({} bytes)", asset.png.len());
                    Ok(asset)
                } else {
                    tracing::warn!("Discarding share card rendered for a closed preview");
                    Err(Outcome::Discarded)
                }
            }
            Err(e) => {
                if !self.is_current(epoch) {
                    tracing::warn!("Ignoring render failure for a closed preview: {}", e);
                    return Err(Outcome::Discarded);
                }
                tracing::error!("❌ Share card generation failed: {}", e);
                self.reset_to_idle(epoch);
                self.caps.notifier.notify(messages::render_failed());
                Err(Outcome::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }

    fn finish_generation(&self, epoch: u64) -> bool {
        let mut inner = self.lock();
        if inner.epoch != epoch || inner.state != PipelineState::Generating {
            return false;
        }
        inner.state = PipelineState::Ready;
        true
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.lock().epoch == epoch
    }

    fn reset_to_idle(&self, epoch: u64) {
        let mut inner = self.lock();
        if inner.epoch == epoch {
            inner.state = PipelineState::Idle;
            inner.purpose = None;
        }
    }

    fn take_preview(&self) -> Option<(u64, PreviewSession)> {
        let mut inner = self.lock();
        if inner.state != PipelineState::Ready {
            return None;
        }
        let session = inner.preview.take()?;
        Some((inner.epoch, session))
    }

    async fn download(&self, asset: &ShareAsset) -> Outcome {
        match self.caps.saver.save(&asset.file_name, &asset.png).await {
            Ok(location) => {
                tracing::info!("✅ Share card saved to {}", location);
                self.caps.notifier.notify(messages::card_saved());
                Outcome::Downloaded { location }
            }
            Err(e) => {
                tracing::error!("❌ Share card download failed: {}", e);
                self.caps.notifier.notify(messages::render_failed());
                Outcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn share_through_chain(&self, asset: &ShareAsset, text: &str) -> Outcome {
        let chain = ShareChain::new(self.caps.share_sheet.as_ref(), self.caps.saver.as_ref());

        match chain.run(asset, text).await {
            Ok(success) => {
                self.caps.notifier.notify(success.notification);
                match (success.tier, success.location) {
                    (ShareTier::Download, Some(location)) => Outcome::Downloaded { location },
                    (tier, _) => Outcome::Shared { tier },
                }
            }
            Err(e) => {
                tracing::error!("❌ Native share failed: {}", e);
                self.caps.notifier.notify(messages::share_unavailable());
                Outcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
