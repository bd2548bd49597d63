//! Manifest generation broken into focused submodules for easier testing.

mod finalize;
mod generation;

pub use finalize::{finalize_manifest, render_manifest};
pub use generation::{collect_entry_assets, generate_asset_manifest};
