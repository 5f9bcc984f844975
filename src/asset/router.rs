//! Request resolution for the published site.
//!
//! Lookups run in order and the first hit wins:
//!
//! 1. the path itself
//! 2. `<path>/index.html`
//! 3. the not-found page, forced to 404 (skipped for `/` and hashed assets)
//! 4. the shell `/index.html`, so the client router can take over
//!
//! Every result then receives the security header set.

use super::path::{decode_path, index_path, split_query};
use super::store::{Asset, AssetStore, STATUS_NOT_FOUND};
use super::SecurityHeaders;
use crate::config::SiteConfig;

const SHELL_PATH: &str = "/index.html";

/// Which lookup answered a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Direct,
    Index,
    NotFound,
    Shell,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Index => "index",
            Self::NotFound => "not-found",
            Self::Shell => "shell",
        }
    }
}

/// A routed response.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub asset: Asset,
    pub source: Source,
}

pub struct AssetRouter<S> {
    store: S,
    security: SecurityHeaders,
    assets_prefix: String,
    not_found_path: String,
}

impl<S: AssetStore> AssetRouter<S> {
    pub fn new(store: S, config: &SiteConfig) -> Self {
        Self {
            store,
            security: SecurityHeaders::from_config(&config.headers),
            assets_prefix: config.build.assets_prefix.clone(),
            not_found_path: config.build.not_found_path(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn security(&self) -> &SecurityHeaders {
        &self.security
    }

    /// Resolve a request URL (path plus optional query) to a response.
    pub fn resolve(&self, url: &str) -> Resolved {
        let path = split_query(url);

        let (mut asset, source) = self
            .lookup(path)
            .map(|asset| (asset, Source::Direct))
            .or_else(|| self.lookup(&index_path(path)).map(|a| (a, Source::Index)))
            .or_else(|| self.not_found(path).map(|a| (a, Source::NotFound)))
            .unwrap_or_else(|| (self.store.fetch(SHELL_PATH), Source::Shell));

        self.security.apply(&mut asset.headers);
        Resolved { asset, source }
    }

    fn lookup(&self, path: &str) -> Option<Asset> {
        let asset = self.store.fetch(path);
        asset.is_found().then_some(asset)
    }

    /// The not-found page, forced to 404. Root and hashed-asset paths are
    /// matched after decoding, like store lookups.
    fn not_found(&self, path: &str) -> Option<Asset> {
        let decoded = decode_path(path).unwrap_or_else(|| path.to_owned());
        if decoded == "/" || decoded.starts_with(&self.assets_prefix) {
            return None;
        }
        let mut asset = self.lookup(&self.not_found_path)?;
        asset.status = STATUS_NOT_FOUND;
        Some(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::MemoryStore;
    use crate::asset::store::STATUS_OK;

    fn router(files: &[(&str, &str)]) -> AssetRouter<MemoryStore> {
        let mut store = MemoryStore::new();
        for (path, body) in files {
            store.insert(path, *body);
        }
        AssetRouter::new(store, &SiteConfig::default())
    }

    fn site() -> AssetRouter<MemoryStore> {
        router(&[
            ("/index.html", "shell"),
            ("/404.html", "missing"),
            ("/privacy-policy/index.html", "privacy"),
            ("/assets/app-1a2b.js", "js"),
            ("/robots.txt", "robots"),
        ])
    }

    fn assert_security(resolved: &Resolved) {
        let config = SiteConfig::default();
        for (name, value) in config.headers.security_pairs() {
            assert_eq!(resolved.asset.headers.get(name), Some(value), "{name}");
        }
    }

    #[test]
    fn test_direct_hit() {
        let resolved = site().resolve("/robots.txt");
        assert_eq!(resolved.source, Source::Direct);
        assert_eq!(resolved.asset.status, STATUS_OK);
        assert_eq!(resolved.asset.body, b"robots");
        assert_security(&resolved);
    }

    #[test]
    fn test_index_lookup() {
        for path in ["/privacy-policy", "/privacy-policy/", "/privacy-policy?ref=x"] {
            let resolved = site().resolve(path);
            assert_eq!(resolved.source, Source::Index, "{path}");
            assert_eq!(resolved.asset.body, b"privacy");
            assert_eq!(resolved.asset.status, STATUS_OK);
        }
    }

    #[test]
    fn test_unknown_page_gets_not_found() {
        let resolved = site().resolve("/unknown-page");
        assert_eq!(resolved.source, Source::NotFound);
        assert_eq!(resolved.asset.status, 404);
        assert_eq!(resolved.asset.body, b"missing");
        assert_eq!(
            resolved.asset.headers.get("Content-Type"),
            Some(crate::utils::mime::types::HTML)
        );
        assert_security(&resolved);
    }

    #[test]
    fn test_missing_asset_falls_back_to_shell() {
        let resolved = site().resolve("/assets/gone-9f9f.js");
        assert_eq!(resolved.source, Source::Shell);
        assert_eq!(resolved.asset.body, b"shell");
        assert_eq!(resolved.asset.status, STATUS_OK);
    }

    #[test]
    fn test_encoded_asset_path_falls_back_to_shell() {
        let resolved = site().resolve("/%61ssets/gone-9f9f.js");
        assert_eq!(resolved.source, Source::Shell);
        assert_eq!(resolved.asset.body, b"shell");

        // the not-found page still answers encoded page paths
        assert_eq!(site().resolve("/unknown%2Dpage").source, Source::NotFound);
    }

    #[test]
    fn test_unknown_page_without_not_found_page() {
        let resolved = router(&[("/index.html", "shell")]).resolve("/unknown-page");
        assert_eq!(resolved.source, Source::Shell);
        assert_eq!(resolved.asset.body, b"shell");
        assert_eq!(resolved.asset.status, STATUS_OK);
        assert_security(&resolved);
    }

    #[test]
    fn test_root_without_asset_is_not_forced_404() {
        // `/` is served by the index step when the shell exists
        let resolved = site().resolve("/");
        assert_eq!(resolved.source, Source::Index);
        assert_eq!(resolved.asset.body, b"shell");

        // degenerate store: no shell at all, still never the 404 page
        let resolved = router(&[("/404.html", "missing")]).resolve("/");
        assert_eq!(resolved.source, Source::Shell);
        assert_ne!(resolved.asset.body, b"missing");
        assert_security(&resolved);
    }

    #[test]
    fn test_security_overwrites_same_name_only() {
        let mut store = MemoryStore::new();
        store.insert("/index.html", "shell");
        let router = AssetRouter::new(store, &SiteConfig::default());

        let resolved = router.resolve("/index.html");
        assert_eq!(
            resolved.asset.headers.get("Content-Type"),
            Some(crate::utils::mime::types::HTML)
        );
        assert_eq!(resolved.asset.headers.len(), 6);
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(Source::Direct.as_str(), "direct");
        assert_eq!(Source::NotFound.as_str(), "not-found");
    }
}
