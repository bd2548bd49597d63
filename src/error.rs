//! Error types raised while generating the files manifest.

use thiserror::Error;

/// Boxed error returned by completion callbacks and host implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while building or emitting a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// The host has no entry point registered under the requested name.
  #[error("unknown entry point '{0}'")]
  UnknownEntry(String),

  /// The manifest could not be converted to or from JSON.
  #[error("failed to serialize manifest: {0}")]
  Serialize(#[from] serde_json::Error),

  /// The completion callback reported a failure.
  #[error("completion callback failed: {0}")]
  Callback(#[source] BoxError),

  /// The host build tool reported a failure while answering a query.
  #[error("host build tool error: {0}")]
  Host(#[source] BoxError),

  /// Code running inside the emit boundary panicked.
  #[error("manifest generation panicked: {0}")]
  Panicked(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ManifestError>;
