//! Data structures produced while summarising a finished build.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object handed to completion callbacks and written to the manifest file.
pub type ManifestObject = Map<String, Value>;

/// Computed summary of the scripts and stylesheets referenced by a build's entry points.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetManifest {
  /// URL prefix under which the assets are served, empty or ending in `/`.
  pub public_path: String,
  /// Script URLs (`.js` and `.mjs`) in discovery order.
  pub js: Vec<String>,
  /// Stylesheet URLs in discovery order.
  pub css: Vec<String>,
  /// Name of the HTML5 application cache manifest, if the build produced one.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub manifest: Option<String>,
  /// Reserved; never populated by the generator.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub favicon: Option<String>,
}

/// Output bucket an asset URL is sorted into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
  /// JavaScript, including ES modules.
  Js,
  /// CSS stylesheets.
  Css,
}

impl AssetManifest {
  /// Create an empty manifest for the given public path.
  pub fn new(public_path: impl Into<String>) -> Self {
    Self {
      public_path: public_path.into(),
      ..Self::default()
    }
  }

  /// Mutable access to the list backing `kind`.
  pub fn bucket_mut(&mut self, kind: AssetKind) -> &mut Vec<String> {
    match kind {
      AssetKind::Js => &mut self.js,
      AssetKind::Css => &mut self.css,
    }
  }
}
