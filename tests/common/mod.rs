#![allow(dead_code)]

use async_trait::async_trait;
use green_commute::core::card::ShareCard;
use green_commute::domain::model::{Notification, SharePayload};
use green_commute::domain::ports::{FileSaver, Notifier, Rasterizer, ShareSheet, UrlOpener};
use green_commute::{GreenError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-card";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Ok,
    Empty,
    Fail,
}

pub struct MockRasterizer {
    mode: RenderMode,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    ratios: Mutex<Vec<f32>>,
}

impl MockRasterizer {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            gate: None,
            calls: AtomicUsize::new(0),
            ratios: Mutex::new(Vec::new()),
        }
    }

    /// 等到 gate 被 notify 才回傳結果
    pub fn gated(mode: RenderMode, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(mode)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn ratios(&self) -> Vec<f32> {
        self.ratios.lock().unwrap().clone()
    }
}

#[async_trait]
impl Rasterizer for MockRasterizer {
    async fn rasterize(&self, _card: &ShareCard, pixel_ratio: f32) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ratios.lock().unwrap().push(pixel_ratio);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.mode {
            RenderMode::Ok => Ok(FAKE_PNG.to_vec()),
            RenderMode::Empty => Ok(Vec::new()),
            RenderMode::Fail => Err(GreenError::RenderFailure {
                message: "rasterizer rejected".to_string(),
            }),
        }
    }
}

#[derive(Default)]
pub struct MockSaver {
    pub fail: bool,
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MockSaver {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSaver for MockSaver {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        if self.fail {
            return Err(GreenError::DownloadFailure {
                message: "browser denied download".to_string(),
            });
        }
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(format!("/downloads/{}", file_name))
    }
}

#[derive(Default)]
pub struct MockShareSheet {
    pub available: bool,
    pub files_supported: bool,
    pub fail: bool,
    shared: Mutex<Vec<SharePayload>>,
}

impl MockShareSheet {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn with_files() -> Self {
        Self {
            available: true,
            files_supported: true,
            ..Default::default()
        }
    }

    pub fn text_only() -> Self {
        Self {
            available: true,
            ..Default::default()
        }
    }

    pub fn shared(&self) -> Vec<SharePayload> {
        self.shared.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShareSheet for MockShareSheet {
    fn is_available(&self) -> bool {
        self.available
    }

    fn can_share(&self, payload: &SharePayload) -> bool {
        self.available && (!payload.has_files() || self.files_supported)
    }

    async fn share(&self, payload: &SharePayload) -> Result<()> {
        if self.fail {
            return Err(GreenError::ShareCancelled);
        }
        self.shared.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    pub fail: bool,
    pub opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<()> {
        if self.fail {
            return Err(GreenError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no browser",
            )));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}
