// Application layer: wires native adapters into the share pipeline.

use crate::adapters::{
    CommandShareSheet, ConsoleNotifier, LocalStorage, StdoutOpener, SvgRasterizer, SystemOpener,
    TempFileObjectUrls, UnsupportedShareSheet,
};
use crate::config::Settings;
use crate::core::pipeline::{Capabilities, SharePipeline, ShareSettings};
use crate::core::summary::ImpactSummary;
use crate::domain::model::{ActivityTotals, ImpactSnapshot};
use crate::domain::ports::{ShareSheet, UrlOpener};
use crate::utils::error::Result;
use std::path::Path;
use std::sync::Arc;

const PREVIEW_DIR: &str = ".preview";

pub struct GreenImpactApp {
    settings: Settings,
    pipeline: SharePipeline,
}

impl GreenImpactApp {
    pub fn new(settings: Settings) -> Result<Self> {
        let caps = Self::native_capabilities(&settings)?;
        Ok(Self::with_capabilities(settings, caps))
    }

    pub fn with_capabilities(settings: Settings, caps: Capabilities) -> Self {
        let pipeline = SharePipeline::new(caps, ShareSettings::from_config(&settings));
        Self { settings, pipeline }
    }

    pub fn native_capabilities(settings: &Settings) -> Result<Capabilities> {
        let share_sheet: Arc<dyn ShareSheet> = match &settings.share_command {
            Some(command) => {
                let sheet = CommandShareSheet::new(command)?;
                if settings.share_files {
                    Arc::new(sheet)
                } else {
                    Arc::new(sheet.text_only())
                }
            }
            None => Arc::new(UnsupportedShareSheet),
        };

        let opener: Arc<dyn UrlOpener> = match (settings.open_links, &settings.open_command) {
            (true, Some(program)) => Arc::new(SystemOpener::with_program(program.clone())),
            (true, None) => Arc::new(SystemOpener::new()),
            (false, _) => Arc::new(StdoutOpener),
        };

        Ok(Capabilities {
            rasterizer: Arc::new(SvgRasterizer::new()),
            saver: Arc::new(LocalStorage::new(settings.output_path.clone())),
            share_sheet,
            opener,
            object_urls: Arc::new(TempFileObjectUrls::new(
                Path::new(&settings.output_path).join(PREVIEW_DIR),
            )),
            notifier: Arc::new(ConsoleNotifier::new()),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pipeline(&self) -> &SharePipeline {
        &self.pipeline
    }

    /// 依目前選定的地區重新計算摘要
    pub fn summary(&self, snapshot: &ImpactSnapshot, activity: &ActivityTotals) -> ImpactSummary {
        ImpactSummary::build(
            snapshot,
            self.settings.region,
            &self.settings.profiles,
            activity,
        )
    }
}
