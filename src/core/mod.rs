pub mod card;
pub mod equivalents;
pub mod fallback;
pub mod intent;
pub mod messages;
pub mod pipeline;
pub mod share_text;
pub mod summary;
pub mod trophies;

pub use crate::domain::model::{DerivedEquivalents, ImpactProfile, ImpactSnapshot, Region};
pub use crate::domain::ports::{
    ConfigProvider, FileSaver, Notifier, ObjectUrls, Rasterizer, ShareSheet, UrlOpener,
};
pub use crate::utils::error::Result;
