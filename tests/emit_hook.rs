use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use files_manifest::{
  AssetSource, CompilerHooks, FilesManifestPlugin, ManifestConfig, ManifestObject, Plugin,
  StatsCompilation,
};
use serde_json::{Value, json};
use tempfile::tempdir;

fn emitted_json(compilation: &StatsCompilation, name: &str) -> Value {
  let asset = compilation
    .emitted_asset(name)
    .unwrap_or_else(|| panic!("{name} was not emitted"));
  serde_json::from_slice(&asset.source()).expect("manifest should be valid JSON")
}

fn run(config: ManifestConfig, stats: &str) -> (StatsCompilation, Vec<ManifestObject>) {
  let received = Rc::new(RefCell::new(Vec::new()));
  let sink = Rc::clone(&received);

  let mut hooks = CompilerHooks::default();
  FilesManifestPlugin::new(config)
    .on_complete(move |manifest| {
      sink.borrow_mut().push(manifest.clone());
      Ok(())
    })
    .apply(&mut hooks);

  let mut compilation = StatsCompilation::from_json(stats).expect("valid stats");
  hooks.call_emit(&mut compilation);
  let received = received.borrow().clone();
  (compilation, received)
}

#[test]
fn writes_default_manifest_for_single_entry() {
  let (compilation, received) = run(
    ManifestConfig::default(),
    r#"{
      "hash": "abc123",
      "publicPath": "/static/",
      "outputPath": "/srv/app/dist",
      "entrypoints": { "main": ["main.abc123.js", "main.abc123.css"] }
    }"#,
  );

  let expected = json!({
    "publicPath": "/static/",
    "js": ["/static/main.abc123.js"],
    "css": ["/static/main.abc123.css"],
  });
  assert_eq!(emitted_json(&compilation, "files.json"), expected);
  assert_eq!(received.len(), 1);
  assert_eq!(Value::Object(received[0].clone()), expected);
}

#[test]
fn multi_entry_build_dedupes_shared_chunks_and_detects_appcache() {
  let (compilation, _) = run(
    ManifestConfig::default(),
    r#"{
      "hash": "h",
      "publicPath": "https://cdn.example.com/assets",
      "outputPath": "/srv/app/dist",
      "entrypoints": {
        "admin": ["runtime.js", "vendors.js", "admin+panel.mjs", "admin.css", "admin.js.map"],
        "site": ["runtime.js", "vendors.js", "site.js", "site.css", "hero.png"]
      },
      "assets": ["hero.png", "offline.appcache", "other.appcache"]
    }"#,
  );

  assert_eq!(
    emitted_json(&compilation, "files.json"),
    json!({
      "publicPath": "https://cdn.example.com/assets/",
      "js": [
        "https://cdn.example.com/assets/runtime.js",
        "https://cdn.example.com/assets/vendors.js",
        "https://cdn.example.com/assets/admin%2Bpanel.mjs",
        "https://cdn.example.com/assets/site.js"
      ],
      "css": [
        "https://cdn.example.com/assets/admin.css",
        "https://cdn.example.com/assets/site.css"
      ],
      "manifest": "offline.appcache"
    })
  );
}

#[test]
fn relative_public_path_and_extra_fields() {
  let config = ManifestConfig::with_filename("meta/files.json")
    .extra_field("css", json!([]))
    .extra_field("release", "2024.1");
  let (compilation, _) = run(
    config,
    r#"{
      "outputPath": "/srv/app/dist",
      "entrypoints": { "main": ["js/main.js", "css/main.css"] }
    }"#,
  );

  let manifest = emitted_json(&compilation, "meta/files.json");
  assert_eq!(manifest["publicPath"], json!("../"));
  assert_eq!(manifest["js"], json!(["../js/main.js"]));
  assert_eq!(manifest["css"], json!([]));
  assert_eq!(manifest["release"], json!("2024.1"));
}

#[test]
fn failed_entry_lookup_leaves_build_without_manifest() {
  let received = Rc::new(RefCell::new(0));
  let sink = Rc::clone(&received);

  let mut hooks = CompilerHooks::default();
  FilesManifestPlugin::new(ManifestConfig::default())
    .on_complete(move |_| {
      *sink.borrow_mut() += 1;
      Ok(())
    })
    .apply(&mut hooks);

  let mut compilation =
    StatsCompilation::from_json(r#"{"entrypoints": {"main": ["main.js"]}}"#).unwrap();
  compilation.declare_entry("broken");
  hooks.call_emit(&mut compilation);

  assert!(compilation.emitted_asset("files.json").is_none());
  assert_eq!(*received.borrow(), 0);
}

#[test]
fn stats_file_round_trip_writes_manifest_to_disk() {
  let temp = tempdir().unwrap();
  let stats_path = temp.path().join("stats.json");
  fs::write(
    &stats_path,
    r#"{
      "hash": "deadbeef",
      "publicPath": "/v/[hash:4]/",
      "outputPath": "public",
      "entrypoints": { "app": { "assets": [{ "name": "app.deadbeef.js" }] } }
    }"#,
  )
  .unwrap();

  let mut compilation = StatsCompilation::load(&stats_path).unwrap();
  let mut plugin = FilesManifestPlugin::new(ManifestConfig::discover(temp.path()));
  assert!(plugin.handle_emit(&mut compilation).is_some());

  let written = compilation.write_emitted_assets().unwrap();
  assert_eq!(written, vec![temp.path().join("public/files.json")]);

  let on_disk: Value = serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
  assert_eq!(on_disk["js"], json!(["/v/dead/app.deadbeef.js"]));
}
