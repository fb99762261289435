pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{Settings, SettingsOverrides, TomlConfig};

pub use app::GreenImpactApp;
pub use core::equivalents::{compute, ProfileTable};
pub use core::pipeline::{Capabilities, Outcome, PipelineState, SharePipeline, ShareSettings};
pub use core::summary::ImpactSummary;
pub use domain::model::{DerivedEquivalents, ImpactProfile, ImpactSnapshot, IntentPlatform, Region};
pub use utils::error::{GreenError, Result};
