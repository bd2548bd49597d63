use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::AssetKind;

fn entry_asset_extension() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\.(css|js|mjs)(\?|$)").expect("invalid entry asset extension regex")
    })
}

/// Classify an asset URL into the manifest bucket it belongs to.
///
/// Only `.css`, `.js` and `.mjs` files (optionally followed by a query string) are kept.
/// ES modules are grouped with regular scripts. Everything else, such as images and source
/// maps, yields `None`.
pub fn classify_asset_url(url: &str) -> Option<AssetKind> {
    let captures = entry_asset_extension().captures(url)?;
    match captures.get(1)?.as_str() {
        "css" => Some(AssetKind::Css),
        _ => Some(AssetKind::Js),
    }
}

/// Returns `true` for HTML5 application cache manifests.
pub fn is_appcache_asset(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|extension| extension == "appcache")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_scripts_and_modules_as_js() {
        assert_eq!(classify_asset_url("/static/main.js"), Some(AssetKind::Js));
        assert_eq!(classify_asset_url("/static/main.mjs"), Some(AssetKind::Js));
    }

    #[test]
    fn classifies_stylesheets_as_css() {
        assert_eq!(classify_asset_url("main.abc123.css"), Some(AssetKind::Css));
    }

    #[test]
    fn accepts_query_strings() {
        assert_eq!(classify_asset_url("bundle.js?v=3"), Some(AssetKind::Js));
        assert_eq!(classify_asset_url("theme.css?"), Some(AssetKind::Css));
    }

    #[test]
    fn ignores_other_extensions() {
        assert_eq!(classify_asset_url("logo.png"), None);
        assert_eq!(classify_asset_url("main.js.map"), None);
        assert_eq!(classify_asset_url("data.json"), None);
        assert_eq!(classify_asset_url("style.scss"), None);
    }

    #[test]
    fn detects_appcache_manifests() {
        assert!(is_appcache_asset("offline/manifest.appcache"));
        assert!(!is_appcache_asset("manifest.appcache.map"));
        assert!(!is_appcache_asset("appcache"));
    }
}
