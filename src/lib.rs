#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod compilation;
pub mod config;
pub mod error;
pub mod hooks;
pub mod manifest;
pub mod models;
pub mod plugin;
pub mod stats;

pub use compilation::{AssetSource, Compilation, RawSource};
pub use config::{DEFAULT_MANIFEST_FILENAME, ManifestConfig};
pub use error::{BoxError, ManifestError};
pub use hooks::{CompilerHooks, Plugin};
pub use models::{AssetKind, AssetManifest, ManifestObject};
pub use plugin::FilesManifestPlugin;
pub use stats::StatsCompilation;
