//! Generated site files: sitemap, robots.txt and the `_headers` rules.
//!
//! Generators return file contents; writing them is the build's job.

pub mod robots;
pub mod sitemap;

use chrono::{SecondsFormat, Utc};

use crate::asset::HeaderRules;
use crate::config::SiteConfig;

pub use sitemap::Sitemap;

pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const ROBOTS_FILE: &str = "robots.txt";
pub const HEADERS_FILE: &str = "_headers";

/// Current UTC time as RFC 3339 with milliseconds, e.g.
/// `2025-01-01T00:00:00.000Z`.
pub fn build_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render `sitemap.xml` with a single shared `lastmod`.
pub fn render_sitemap(config: &SiteConfig, lastmod: &str) -> String {
    Sitemap::build(config, lastmod).into_xml(config.build.minify_xml)
}

/// Render the hosting-layer `_headers` file.
pub fn render_headers(config: &SiteConfig) -> String {
    HeaderRules::from_config(config).render()
}
