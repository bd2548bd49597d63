//! Contract between the manifest generator and the host build tool.
//!
//! The host owns the finished build graph. The generator only reads entry points, asset names
//! and output configuration from it, and hands back a single new asset to write.

use std::borrow::Cow;
use std::path::Path;

use crate::error::Result;

/// Lazily evaluated content of an output asset.
///
/// The host decides when (and whether) to query the bytes and their length.
pub trait AssetSource {
  /// Content of the asset.
  fn source(&self) -> Cow<'_, [u8]>;

  /// Length of the content in bytes.
  fn size(&self) -> usize {
    self.source().len()
  }
}

/// In-memory text asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawSource(String);

impl RawSource {
  /// Wrap already rendered text.
  pub fn new(content: impl Into<String>) -> Self {
    Self(content.into())
  }

  /// Borrow the wrapped text.
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl AssetSource for RawSource {
  fn source(&self) -> Cow<'_, [u8]> {
    Cow::Borrowed(self.0.as_bytes())
  }

  fn size(&self) -> usize {
    self.0.len()
  }
}

/// View of a completed build as exposed by the host build tool.
pub trait Compilation {
  /// Stable identifier of this build.
  fn hash(&self) -> &str;

  /// Entry point names in the order the host registered them.
  fn entry_names(&self) -> Vec<String>;

  /// Output files of an entry point in the host's chunk order.
  fn entry_files(&self, entry: &str) -> Result<Vec<String>>;

  /// Names of every output asset, in the host's iteration order.
  fn asset_names(&self) -> Vec<String>;

  /// Directory the build writes its output to.
  fn output_path(&self) -> &Path;

  /// Public path resolved for the given build hash, empty when none is configured.
  fn public_path(&self, hash: &str) -> String;

  /// Register a new output asset under `name`, replacing any asset of the same name.
  fn emit_asset(&mut self, name: &str, source: Box<dyn AssetSource>);
}
