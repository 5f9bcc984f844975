//! robots.txt generation.

use crate::config::SiteInfoConfig;

/// Allow everything except the raw markdown copies, and point at the sitemap.
pub fn render(site: &SiteInfoConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /md/\n\nSitemap: {}\n",
        site.absolute("sitemap.xml")
    )
}
