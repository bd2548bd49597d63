//! Helpers for turning build output file names into manifest URLs.
//!
//! The responsibilities are split into focused submodules so that public path resolution,
//! per-segment URL encoding, and extension classification can be tested independently.

mod encode;
mod filters;
mod public_path;

pub use encode::urlencode_path;
pub use filters::{classify_asset_url, is_appcache_asset};
pub use public_path::resolve_public_path;
