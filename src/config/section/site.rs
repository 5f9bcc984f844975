//! `[site]` section configuration.
//!
//! Site-wide constants shared by the prerender step and the server:
//! the public URL, the name used in Open Graph and JSON-LD, and the
//! fallback preview image.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://aiau.group"     # Public origin, no trailing slash needed
//! name = "AIAU"                  # og:site_name and WebSite name
//! language = "ja"                # JSON-LD inLanguage
//! locale = "ja_JP"               # og:locale
//! og_image = "https://aiau.group/OGP.jpg"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

const DEFAULT_URL: &str = "https://aiau.group";

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Public site origin (e.g., "https://aiau.group").
    pub url: String,

    /// Site name.
    pub name: String,

    /// Content language code.
    pub language: String,

    /// Open Graph locale.
    pub locale: String,

    /// Fallback preview image. Defaults to `<url>/OGP.jpg`.
    pub og_image: Option<String>,

    /// Twitter card kind.
    pub twitter_card: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            name: "AIAU".into(),
            language: "ja".into(),
            locale: "ja_JP".into(),
            og_image: None,
            twitter_card: "summary_large_image".into(),
        }
    }
}

impl SiteInfoConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");
    pub const NAME: FieldPath = FieldPath::new("site.name");
    pub const OG_IMAGE: FieldPath = FieldPath::new("site.og_image");

    /// Site origin without trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Absolute URL for a site-root path (`/privacy-policy/` → `https://…/privacy-policy/`).
    pub fn absolute(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    /// Preview image used when a page does not set its own.
    pub fn default_og_image(&self) -> String {
        match &self.og_image {
            Some(image) => image.clone(),
            None => self.absolute("OGP.jpg"),
        }
    }

    /// Stable JSON-LD `@id` of the site's `WebSite` node.
    pub fn website_id(&self) -> String {
        format!("{}/#website", self.base_url())
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` must be a valid http(s) URL with a host
    /// - `og_image`, when set, must be absolute
    /// - `name` must not be empty
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_absolute_url(&self.url, Self::URL, diag);

        if let Some(image) = &self.og_image {
            check_absolute_url(image, Self::OG_IMAGE, diag);
        }

        if self.name.trim().is_empty() {
            diag.error(Self::NAME, "site name must not be empty");
        }
    }
}

fn check_absolute_url(value: &str, field: FieldPath, diag: &mut ConfigDiagnostics) {
    match url::Url::parse(value) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                diag.error_with_hint(
                    field,
                    format!(
                        "scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    ),
                    "use format like https://example.com",
                );
            }
            if parsed.host_str().is_none() {
                diag.error_with_hint(
                    field,
                    "URL must have a valid host",
                    "use format like https://example.com",
                );
            }
        }
        Err(e) => {
            diag.error_with_hint(
                field,
                format!("invalid URL: {e}"),
                "use format like https://example.com",
            );
        }
    }
}
