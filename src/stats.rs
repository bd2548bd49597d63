//! Owned [`Compilation`] loaded from a bundler's JSON stats output.
//!
//! Lets the manifest be produced after the fact from a stats file, and doubles as the host
//! used by the crate's tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Deserializer};

use crate::compilation::{AssetSource, Compilation};
use crate::error::{self, ManifestError};

/// Build stats deserialised from JSON, with the assets emitted by plugins held in memory.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsCompilation {
  #[serde(default)]
  hash: String,
  #[serde(default)]
  public_path: String,
  #[serde(default)]
  output_path: PathBuf,
  #[serde(default, rename = "entrypoints", deserialize_with = "ordered_entrypoints")]
  entries: EntryTable,
  #[serde(default, deserialize_with = "asset_names")]
  assets: Vec<String>,
  #[serde(skip)]
  emitted: Vec<(String, Box<dyn AssetSource>)>,
}

#[derive(Debug, Default)]
struct EntryTable {
  names: Vec<String>,
  files: HashMap<String, Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AssetRef {
  Name(String),
  Detailed { name: String },
}

impl AssetRef {
  fn into_name(self) -> String {
    match self {
      Self::Name(name) | Self::Detailed { name } => name,
    }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryFiles {
  Files(Vec<AssetRef>),
  Entrypoint { assets: Vec<AssetRef> },
}

impl EntryFiles {
  fn into_names(self) -> Vec<String> {
    let (Self::Files(refs) | Self::Entrypoint { assets: refs }) = self;
    refs.into_iter().map(AssetRef::into_name).collect()
  }
}

fn ordered_entrypoints<'de, D>(deserializer: D) -> std::result::Result<EntryTable, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
  let mut table = EntryTable::default();
  for (name, value) in raw {
    let files: EntryFiles =
      serde_json::from_value(value).map_err(<D::Error as serde::de::Error>::custom)?;
    table.names.push(name.clone());
    table.files.insert(name, files.into_names());
  }
  Ok(table)
}

fn asset_names<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let refs = Vec::<AssetRef>::deserialize(deserializer)?;
  Ok(refs.into_iter().map(AssetRef::into_name).collect())
}

fn hash_placeholder() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"\[(?:full)?hash(?::(\d+))?\]").expect("invalid hash placeholder regex")
  })
}

impl StatsCompilation {
  /// Parse stats from a JSON string.
  pub fn from_json(content: &str) -> Result<Self> {
    serde_json::from_str(content).context("failed to parse build stats JSON")
  }

  /// Load stats from disk. A relative `outputPath` is resolved against the stats file's directory.
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)
      .with_context(|| format!("build stats not found at {}", path.display()))?;
    let mut stats = Self::from_json(&content)
      .with_context(|| format!("failed to load {}", path.display()))?;

    if stats.output_path.is_relative() {
      if let Some(parent) = path.parent() {
        stats.output_path = parent.join(&stats.output_path);
      }
    }

    Ok(stats)
  }

  /// Register an entry name without any output files, e.g. one the host failed to build.
  pub fn declare_entry(&mut self, name: impl Into<String>) {
    self.entries.names.push(name.into());
  }

  /// Look up an asset emitted by a plugin.
  pub fn emitted_asset(&self, name: &str) -> Option<&dyn AssetSource> {
    self
      .emitted
      .iter()
      .find(|(emitted, _)| emitted == name)
      .map(|(_, source)| source.as_ref())
  }

  /// Names of the assets emitted by plugins, in emission order.
  pub fn emitted_names(&self) -> impl Iterator<Item = &str> {
    self.emitted.iter().map(|(name, _)| name.as_str())
  }

  /// Write every emitted asset below the output path, returning the written files.
  pub fn write_emitted_assets(&self) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(self.emitted.len());
    for (name, source) in &self.emitted {
      let target = self.output_path.join(name);
      if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
          .with_context(|| format!("failed to create {}", parent.display()))?;
      }
      fs::write(&target, source.source())
        .with_context(|| format!("failed to write {}", target.display()))?;
      written.push(target);
    }
    Ok(written)
  }
}

impl Compilation for StatsCompilation {
  fn hash(&self) -> &str {
    &self.hash
  }

  fn entry_names(&self) -> Vec<String> {
    self.entries.names.clone()
  }

  fn entry_files(&self, entry: &str) -> error::Result<Vec<String>> {
    self
      .entries
      .files
      .get(entry)
      .cloned()
      .ok_or_else(|| ManifestError::UnknownEntry(entry.to_string()))
  }

  fn asset_names(&self) -> Vec<String> {
    let mut names = self.assets.clone();
    for name in self.emitted_names() {
      if !names.iter().any(|existing| existing == name) {
        names.push(name.to_string());
      }
    }
    names
  }

  fn output_path(&self) -> &Path {
    &self.output_path
  }

  fn public_path(&self, hash: &str) -> String {
    hash_placeholder()
      .replace_all(&self.public_path, |caps: &Captures| {
        match caps.get(1).and_then(|len| len.as_str().parse::<usize>().ok()) {
          Some(len) => hash.chars().take(len).collect(),
          None => hash.to_string(),
        }
      })
      .into_owned()
  }

  fn emit_asset(&mut self, name: &str, source: Box<dyn AssetSource>) {
    match self.emitted.iter_mut().find(|(emitted, _)| emitted == name) {
      Some(slot) => slot.1 = source,
      None => self.emitted.push((name.to_string(), source)),
    }
  }
}

impl std::fmt::Debug for StatsCompilation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StatsCompilation")
      .field("hash", &self.hash)
      .field("public_path", &self.public_path)
      .field("output_path", &self.output_path)
      .field("entries", &self.entries)
      .field("assets", &self.assets)
      .field("emitted", &self.emitted_names().collect::<Vec<_>>())
      .finish()
  }
}
