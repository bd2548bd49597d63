//! Collect the scripts and stylesheets referenced by a build's entry points.

use std::collections::HashSet;

use tracing::debug;

use crate::asset_paths::{classify_asset_url, is_appcache_asset, resolve_public_path, urlencode_path};
use crate::compilation::Compilation;
use crate::error::Result;
use crate::models::AssetManifest;

/// Build the manifest for a finished compilation.
///
/// `manifest_filename` is the name the manifest will be emitted under; it is only used to derive
/// a relative public path when the host has none configured.
pub fn generate_asset_manifest(
  compilation: &dyn Compilation,
  manifest_filename: &str,
) -> Result<AssetManifest> {
  let host_public_path = compilation.public_path(compilation.hash());
  let public_path = resolve_public_path(
    &host_public_path,
    compilation.output_path(),
    manifest_filename,
  );

  let mut manifest = AssetManifest::new(public_path);
  manifest.manifest = compilation
    .asset_names()
    .into_iter()
    .find(|name| is_appcache_asset(name));

  let mut entries = Vec::new();
  for entry in compilation.entry_names() {
    let files = compilation.entry_files(&entry)?;
    entries.push((entry, files));
  }
  collect_entry_assets(&mut manifest, &entries);

  debug!(
    public_path = %manifest.public_path,
    js = manifest.js.len(),
    css = manifest.css.len(),
    "collected entry assets"
  );

  Ok(manifest)
}

/// Append the URLs of every entry's files to the matching manifest bucket.
///
/// Entries and their files are visited in order. A URL that was already recorded, e.g. a
/// chunk shared by two entries, is only kept at its first position.
pub fn collect_entry_assets<E, F>(manifest: &mut AssetManifest, entries: &[(E, Vec<F>)])
where
  E: AsRef<str>,
  F: AsRef<str>,
{
  let mut seen: HashSet<String> = manifest.js.iter().chain(&manifest.css).cloned().collect();

  for (entry, files) in entries {
    for file in files {
      let url = format!("{}{}", manifest.public_path, urlencode_path(file.as_ref()));
      let Some(kind) = classify_asset_url(&url) else {
        continue;
      };

      if !seen.insert(url.clone()) {
        debug!(entry = %entry.as_ref(), url = %url, "skipping asset shared with an earlier entry");
        continue;
      }

      manifest.bucket_mut(kind).push(url);
    }
  }
}
