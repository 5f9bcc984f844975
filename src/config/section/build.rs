//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! shell = "dist/index.html"   # Base HTML shell (relative to site root)
//! output = "dist"             # Output directory (relative to site root)
//! markdown = "md"             # Markdown sources, copied to <output>/md/
//! container_id = "app"        # id of the element that receives page content
//! assets_prefix = "/assets/"  # Hashed assets, never answered with 404.html
//! not_found = "404.html"      # Not-found page, relative to output
//! minify_xml = false          # Emit sitemap.xml without indentation
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Base HTML shell every page is injected into.
    pub shell: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Markdown source directory.
    pub markdown: PathBuf,

    /// `id` attribute of the content container in the shell.
    pub container_id: String,

    /// URL prefix of content-hashed assets.
    pub assets_prefix: String,

    /// Not-found page file name inside the output directory.
    pub not_found: String,

    /// Emit XML without indentation.
    pub minify_xml: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            shell: "dist/index.html".into(),
            output: "dist".into(),
            markdown: "md".into(),
            container_id: "app".into(),
            assets_prefix: "/assets/".into(),
            not_found: "404.html".into(),
            minify_xml: false,
        }
    }
}

impl BuildSectionConfig {
    pub const CONTAINER_ID: FieldPath = FieldPath::new("build.container_id");
    pub const ASSETS_PREFIX: FieldPath = FieldPath::new("build.assets_prefix");
    pub const NOT_FOUND: FieldPath = FieldPath::new("build.not_found");

    /// URL path of the not-found page (`/404.html`).
    pub fn not_found_path(&self) -> String {
        format!("/{}", self.not_found.trim_start_matches('/'))
    }

    /// Validate build configuration.
    ///
    /// # Checks
    /// - `container_id` is a plain identifier (it is matched inside an attribute)
    /// - `assets_prefix` starts and ends with `/` and is not the site root
    /// - `not_found` is a bare `.html` file name
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let id_ok = !self.container_id.is_empty()
            && self
                .container_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        if !id_ok {
            diag.error_with_hint(
                Self::CONTAINER_ID,
                format!("invalid element id '{}'", self.container_id),
                "use letters, digits, '-' or '_', e.g. \"app\"",
            );
        }

        let prefix = self.assets_prefix.as_str();
        if !prefix.starts_with('/') || !prefix.ends_with('/') || prefix == "/" {
            diag.error_with_hint(
                Self::ASSETS_PREFIX,
                format!("invalid asset prefix '{prefix}'"),
                "use a directory path like \"/assets/\"",
            );
        }

        let name = self.not_found.trim_start_matches('/');
        if !name.ends_with(".html") || name.contains('/') {
            diag.error_with_hint(
                Self::NOT_FOUND,
                format!("invalid not-found page '{}'", self.not_found),
                "use a file name like \"404.html\"",
            );
        }
    }
}
