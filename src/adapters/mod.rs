// Adapters layer: concrete implementations of the domain ports for a native host.

pub mod notifier;
pub mod object_urls;
pub mod opener;
pub mod raster;
pub mod share;
pub mod storage;

pub use notifier::ConsoleNotifier;
pub use object_urls::{MemoryObjectUrls, TempFileObjectUrls};
pub use opener::{StdoutOpener, SystemOpener};
pub use raster::SvgRasterizer;
pub use share::{CommandShareSheet, UnsupportedShareSheet};
pub use storage::LocalStorage;
