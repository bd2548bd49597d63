//! Merge static options into a computed manifest and render it as JSON.

use serde_json::Value;

use crate::error::Result;
use crate::models::{AssetManifest, ManifestObject};

/// Shallow-merge `extra` over the computed manifest fields.
///
/// Keys present in `extra` replace computed keys of the same name, so static options can
/// override `publicPath`, `js` or `css`.
pub fn finalize_manifest(manifest: &AssetManifest, extra: &ManifestObject) -> Result<ManifestObject> {
  let mut object = match serde_json::to_value(manifest)? {
    Value::Object(object) => object,
    _ => ManifestObject::new(),
  };

  for (key, value) in extra {
    object.insert(key.clone(), value.clone());
  }

  Ok(object)
}

/// Render the manifest object as pretty-printed JSON with two space indentation.
pub fn render_manifest(object: &ManifestObject) -> Result<String> {
  Ok(serde_json::to_string_pretty(object)?)
}
