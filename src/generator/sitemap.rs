//! Sitemap generation.
//!
//! Lists every route that has a sitemap policy. All entries share one
//! `lastmod`, the build timestamp.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://aiau.group/</loc>
//!     <lastmod>2025-01-01T00:00:00.000Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use std::borrow::Cow;

use crate::config::SiteConfig;
use crate::page::Route;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: String,
    changefreq: &'static str,
    priority: &'static str,
}

impl Sitemap {
    pub fn build(config: &SiteConfig, lastmod: &str) -> Self {
        let urls = Route::ALL
            .iter()
            .filter_map(|&route| {
                let policy = route.sitemap()?;
                Some(UrlEntry {
                    loc: config.site.absolute(&route.url_path(&config.build)),
                    lastmod: lastmod.to_owned(),
                    changefreq: policy.changefreq.as_str(),
                    priority: policy.priority,
                })
            })
            .collect();

        Self { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Serialize; `minify` drops the indentation between elements.
    pub fn into_xml(self, minify: bool) -> String {
        let (nl, indent1, indent2) = if minify { ("", "", "") } else { ("\n", "  ", "    ") };
        let mut xml = String::with_capacity(256 + self.urls.len() * 256);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">");
        xml.push_str(nl);

        for entry in self.urls {
            let fields = [
                ("loc", escape_xml(&entry.loc)),
                ("lastmod", escape_xml(&entry.lastmod)),
                ("changefreq", Cow::Borrowed(entry.changefreq)),
                ("priority", Cow::Borrowed(entry.priority)),
            ];

            xml.push_str(indent1);
            xml.push_str("<url>");
            xml.push_str(nl);
            for (name, value) in fields {
                xml.push_str(indent2);
                xml.push('<');
                xml.push_str(name);
                xml.push('>');
                xml.push_str(&value);
                xml.push_str("</");
                xml.push_str(name);
                xml.push('>');
                xml.push_str(nl);
            }
            xml.push_str(indent1);
            xml.push_str("</url>");
            xml.push_str(nl);
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
