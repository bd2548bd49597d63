//! Emit-phase plugin that writes the files manifest for every completed build.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, error};

use crate::compilation::{Compilation, RawSource};
use crate::config::ManifestConfig;
use crate::error::{BoxError, ManifestError, Result};
use crate::hooks::{CompilerHooks, Plugin};
use crate::manifest::{finalize_manifest, generate_asset_manifest, render_manifest};
use crate::models::ManifestObject;

/// Name the plugin registers its hook under.
pub const PLUGIN_NAME: &str = "FilesManifestPlugin";

type CompletionCallback = Box<dyn FnMut(&ManifestObject) -> std::result::Result<(), BoxError>>;

/// Writes the JavaScript and CSS files of every entry point to a JSON manifest.
pub struct FilesManifestPlugin {
  config: ManifestConfig,
  on_complete: CompletionCallback,
}

impl FilesManifestPlugin {
  /// Create a plugin for the provided configuration with a no-op completion callback.
  pub fn new(config: ManifestConfig) -> Self {
    Self {
      config,
      on_complete: Box::new(|_| Ok(())),
    }
  }

  /// Replace the callback invoked with the final manifest after each build.
  pub fn on_complete<F>(mut self, callback: F) -> Self
  where
    F: FnMut(&ManifestObject) -> std::result::Result<(), BoxError> + 'static,
  {
    self.on_complete = Box::new(callback);
    self
  }

  /// Active configuration.
  pub fn config(&self) -> &ManifestConfig {
    &self.config
  }

  /// Compute the merged manifest for `compilation` without emitting anything.
  pub fn build(&self, compilation: &dyn Compilation) -> Result<ManifestObject> {
    let manifest = generate_asset_manifest(compilation, &self.config.filename)?;
    finalize_manifest(&manifest, &self.config.extra)
  }

  /// Generate the manifest, register it as an asset and run the completion callback.
  ///
  /// Failures are returned to the caller; [`FilesManifestPlugin::handle_emit`] is the boundary
  /// that keeps them away from the host.
  pub fn emit(&mut self, compilation: &mut dyn Compilation) -> Result<ManifestObject> {
    let manifest = self.build(compilation)?;
    let content = render_manifest(&manifest)?;

    debug!(filename = %self.config.filename, bytes = content.len(), "emitting files manifest");
    compilation.emit_asset(&self.config.filename, Box::new(RawSource::new(content)));

    (self.on_complete)(&manifest).map_err(ManifestError::Callback)?;
    Ok(manifest)
  }

  /// Run [`FilesManifestPlugin::emit`] inside an error boundary.
  ///
  /// Errors and panics are logged and swallowed so the host build always proceeds. Returns the
  /// manifest when generation succeeded.
  pub fn handle_emit(&mut self, compilation: &mut dyn Compilation) -> Option<ManifestObject> {
    let outcome = catch_unwind(AssertUnwindSafe(|| self.emit(compilation)))
      .unwrap_or_else(|payload| Err(ManifestError::Panicked(panic_message(&*payload))));

    match outcome {
      Ok(manifest) => Some(manifest),
      Err(err) => {
        error!(filename = %self.config.filename, error = %err, "failed to generate files manifest");
        None
      }
    }
  }
}

impl Plugin for FilesManifestPlugin {
  fn apply(mut self, hooks: &mut CompilerHooks) {
    hooks.tap_emit(PLUGIN_NAME, move |compilation| {
      self.handle_emit(compilation);
    });
  }
}

impl std::fmt::Debug for FilesManifestPlugin {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FilesManifestPlugin")
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    message.to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "unknown panic payload".to_string()
  }
}
