//! Read-only asset stores backing the router.
//!
//! A lookup never fails: a missing, unreadable or rejected path yields
//! [`Asset::not_found`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{Headers, HeaderRules, decode_path, split_query};
use crate::debug;
use crate::utils::mime;

pub const STATUS_OK: u16 = 200;
pub const STATUS_NOT_FOUND: u16 = 404;

/// A stored response: status, headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Asset {
    /// A found asset with its `Content-Type`.
    pub fn ok(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status: STATUS_OK,
            headers: Headers::new().with("Content-Type", content_type),
            body,
        }
    }

    /// The typed miss.
    pub fn not_found() -> Self {
        Self {
            status: STATUS_NOT_FOUND,
            headers: Headers::new().with("Content-Type", mime::types::PLAIN),
            body: b"404 Not Found".to_vec(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.status != STATUS_NOT_FOUND
    }
}

/// Path → asset lookup. Paths are URL paths (`/privacy-policy/index.html`),
/// optionally percent-encoded and carrying a query string.
pub trait AssetStore: Send + Sync {
    fn fetch(&self, path: &str) -> Asset;
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory store keyed by decoded URL path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: HashMap<String, Vec<u8>>,
    rules: HeaderRules,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: HeaderRules) -> Self {
        self.rules = rules;
        self
    }

    /// Store `body` at `path`; a missing leading `/` is added.
    pub fn insert(&mut self, path: &str, body: impl Into<Vec<u8>>) {
        let key = if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{path}")
        };
        self.files.insert(key, body.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetStore for MemoryStore {
    fn fetch(&self, path: &str) -> Asset {
        let Some(path) = decode_path(split_query(path)) else {
            return Asset::not_found();
        };
        match self.files.get(&path) {
            Some(body) => {
                let mut asset = Asset::ok(mime::from_path(Path::new(&path)), body.clone());
                self.rules.apply(&path, &mut asset.headers);
                asset
            }
            None => Asset::not_found(),
        }
    }
}

// ============================================================================
// DirStore
// ============================================================================

/// Store backed by the build output directory.
///
/// Only regular files are hits; a directory is never served directly, so
/// `/privacy-policy/` resolves through the router's index step.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
    rules: HeaderRules,
}

impl DirStore {
    pub fn new(root: &Path, rules: HeaderRules) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("output directory {} not found", root.display()))?;
        Ok(Self { root, rules })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a URL path to a file under the root.
    ///
    /// Rejects `..` and anything that canonicalizes outside the root
    /// (symlinks included).
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let clean = path.trim_matches('/');
        if clean.split(['/', '\\']).any(|segment| segment == "..") {
            return None;
        }

        let canonical = self.root.join(clean).canonicalize().ok()?;
        if !canonical.starts_with(&self.root) {
            return None;
        }

        canonical.is_file().then_some(canonical)
    }
}

impl AssetStore for DirStore {
    fn fetch(&self, path: &str) -> Asset {
        let Some(path) = decode_path(split_query(path)) else {
            return Asset::not_found();
        };
        let Some(file) = self.resolve(&path) else {
            return Asset::not_found();
        };

        match fs::read(&file) {
            Ok(body) => {
                let mut asset = Asset::ok(mime::from_path(&file), body);
                self.rules.apply(&path, &mut asset.headers);
                asset
            }
            Err(e) => {
                debug!("serve"; "failed to read {}: {}", file.display(), e);
                Asset::not_found()
            }
        }
    }
}
