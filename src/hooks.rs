//! Synchronous lifecycle hooks a host build tool exposes to plugins.

use tracing::debug;

use crate::compilation::Compilation;

/// Handler invoked once the build's assets are final and about to be written.
pub type EmitHandler = Box<dyn FnMut(&mut dyn Compilation)>;

/// Registry of lifecycle hooks owned by the host compiler.
#[derive(Default)]
pub struct CompilerHooks {
  emit: Vec<(String, EmitHandler)>,
}

impl CompilerHooks {
  /// Subscribe `handler` to the emit phase under the given plugin name.
  pub fn tap_emit<F>(&mut self, name: impl Into<String>, handler: F)
  where
    F: FnMut(&mut dyn Compilation) + 'static,
  {
    self.emit.push((name.into(), Box::new(handler)));
  }

  /// Run every emit handler in registration order against `compilation`.
  pub fn call_emit(&mut self, compilation: &mut dyn Compilation) {
    for (name, handler) in &mut self.emit {
      debug!(plugin = %name, "running emit hook");
      handler(&mut *compilation);
    }
  }

  /// Names of the plugins subscribed to the emit phase.
  pub fn emit_taps(&self) -> impl Iterator<Item = &str> {
    self.emit.iter().map(|(name, _)| name.as_str())
  }
}

impl std::fmt::Debug for CompilerHooks {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CompilerHooks")
      .field("emit", &self.emit_taps().collect::<Vec<_>>())
      .finish()
  }
}

/// Extension that subscribes itself to a compiler's lifecycle hooks.
pub trait Plugin {
  /// Register the plugin's handlers.
  fn apply(self, hooks: &mut CompilerHooks);
}
