//! Plugin configuration describing the manifest filename and static extra fields.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::models::ManifestObject;

/// Default name of the emitted manifest asset.
pub const DEFAULT_MANIFEST_FILENAME: &str = "files.json";

const DEFAULT_CONFIG_FILE: &str = "files-manifest.config.json";

/// Construction-time options for [`crate::FilesManifestPlugin`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
  /// Name of the emitted manifest, relative to the build output root.
  pub filename: String,
  /// Static fields merged into every manifest; they win over computed fields.
  #[serde(flatten)]
  pub extra: ManifestObject,
}

impl Default for ManifestConfig {
  fn default() -> Self {
    Self {
      filename: DEFAULT_MANIFEST_FILENAME.into(),
      extra: ManifestObject::new(),
    }
  }
}

impl ManifestConfig {
  /// Configuration with a custom manifest filename.
  pub fn with_filename(filename: impl Into<String>) -> Self {
    Self {
      filename: filename.into(),
      ..Self::default()
    }
  }

  /// Add a static field merged into every emitted manifest.
  pub fn extra_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
    self.extra.insert(key.into(), value.into());
    self
  }

  /// Attempt to load configuration from the provided directory.
  ///
  /// When the configuration file does not exist or fails to parse we fall back to the defaults
  /// so a build never stops over manifest settings.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if !candidate.exists() {
      return Self::default();
    }
    Self::from_path(&candidate).unwrap_or_else(|err| {
      tracing::warn!(path = %candidate.display(), error = %err, "ignoring invalid manifest config");
      Self::default()
    })
  }

  /// Read configuration from a JSON or YAML file, chosen by extension.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let extension = path
      .extension()
      .and_then(|extension| extension.to_str())
      .unwrap_or_default();

    let config: Self = match extension {
      "yaml" | "yml" => serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?,
      _ => serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?,
    };

    if config.filename.trim().is_empty() {
      bail!("manifest filename in {} must not be empty", path.display());
    }

    Ok(config)
  }
}
