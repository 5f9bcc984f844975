//! `<head>` metadata upsert.
//!
//! Each tag is identified by its tag name plus one identity attribute
//! (`name=`, `property=`, `rel=` or `id=`), never by its content. An
//! existing tag with the same identity is replaced in place; otherwise the
//! new tag is inserted right before `</head>`. Applying the same metadata
//! twice therefore yields the same document.

use std::sync::LazyLock;

use regex::Regex;

use super::{InjectError, jsonld::JsonLd, shell::head_close};
use crate::config::SiteInfoConfig;
use crate::page::RouteMetadata;
use crate::utils::html::{escape, escape_attr, escape_script_json};

/// `id` of the JSON-LD script element.
pub const JSON_LD_ID: &str = "ld-webpage";

/// Identity of an upserted head tag, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Title,
    Description,
    Canonical,
    OgSiteName,
    OgType,
    OgTitle,
    OgDescription,
    OgUrl,
    OgImage,
    OgLocale,
    TwitterCard,
    TwitterTitle,
    TwitterDescription,
    TwitterImage,
    JsonLd,
}

impl Slot {
    const ALL: [Slot; 15] = [
        Slot::Title,
        Slot::Description,
        Slot::Canonical,
        Slot::OgSiteName,
        Slot::OgType,
        Slot::OgTitle,
        Slot::OgDescription,
        Slot::OgUrl,
        Slot::OgImage,
        Slot::OgLocale,
        Slot::TwitterCard,
        Slot::TwitterTitle,
        Slot::TwitterDescription,
        Slot::TwitterImage,
        Slot::JsonLd,
    ];

    /// Identity attribute and value of `<meta>` slots.
    const fn meta_key(self) -> Option<(&'static str, &'static str)> {
        Some(match self {
            Self::Description => ("name", "description"),
            Self::OgSiteName => ("property", "og:site_name"),
            Self::OgType => ("property", "og:type"),
            Self::OgTitle => ("property", "og:title"),
            Self::OgDescription => ("property", "og:description"),
            Self::OgUrl => ("property", "og:url"),
            Self::OgImage => ("property", "og:image"),
            Self::OgLocale => ("property", "og:locale"),
            Self::TwitterCard => ("name", "twitter:card"),
            Self::TwitterTitle => ("name", "twitter:title"),
            Self::TwitterDescription => ("name", "twitter:description"),
            Self::TwitterImage => ("name", "twitter:image"),
            Self::Title | Self::Canonical | Self::JsonLd => return None,
        })
    }

    fn pattern(self) -> String {
        if let Some((attr, value)) = self.meta_key() {
            return format!(
                r#"(?i)<meta\b[^>]*\s{attr}\s*=\s*["']{}["'][^>]*>"#,
                regex::escape(value)
            );
        }
        match self {
            Self::Title => r"(?is)<title\b[^>]*>.*?</title\s*>".into(),
            Self::Canonical => r#"(?i)<link\b[^>]*\srel\s*=\s*["']canonical["'][^>]*>"#.into(),
            _ => format!(
                r#"(?is)<script\b[^>]*\sid\s*=\s*["']{JSON_LD_ID}["'][^>]*>.*?</script\s*>"#
            ),
        }
    }

    fn regex(self) -> &'static Regex {
        &SLOT_PATTERNS[self as usize]
    }

    /// Render a `<meta>` slot with `content`.
    fn meta(self, content: &str) -> Option<(Slot, String)> {
        let (attr, value) = self.meta_key()?;
        Some((
            self,
            format!(r#"<meta {attr}="{value}" content="{}" />"#, escape_attr(content)),
        ))
    }
}

/// Slot patterns indexed by discriminant, compiled once.
static SLOT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    Slot::ALL
        .iter()
        .map(|slot| Regex::new(&slot.pattern()).unwrap())
        .collect()
});

/// Replace the first tag matching `slot`, or insert `tag` before `</head>`.
///
/// Without a `</head>` there is nowhere to insert and the document is
/// returned unchanged.
fn upsert(html: &str, slot: Slot, tag: &str) -> String {
    let head_end = head_close(html);
    let head = &html[..head_end.unwrap_or(html.len())];

    if let Some(found) = slot.regex().find(head) {
        let mut out = String::with_capacity(html.len() + tag.len());
        out.push_str(&html[..found.start()]);
        out.push_str(tag);
        out.push_str(&html[found.end()..]);
        return out;
    }

    match head_end {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + tag.len() + 8);
            out.push_str(&html[..pos]);
            out.push_str("  ");
            out.push_str(tag);
            out.push_str("\n  ");
            out.push_str(&html[pos..]);
            out
        }
        None => html.to_owned(),
    }
}

/// The ordered list of tags a page's metadata produces.
///
/// Conditional tags are left out entirely when their field is absent;
/// `og:image` and `twitter:image` always fall back to the site image.
fn head_tags(
    meta: &RouteMetadata,
    site: &SiteInfoConfig,
) -> Result<Vec<(Slot, String)>, InjectError> {
    let image = meta
        .og_image
        .clone()
        .unwrap_or_else(|| site.default_og_image());
    let title = meta.title.as_deref();
    let description = meta.description.as_deref();
    let url = meta.canonical_url.as_deref();

    let mut tags: Vec<(Slot, String)> = Vec::with_capacity(Slot::ALL.len());

    if let Some(title) = title {
        tags.push((Slot::Title, format!("<title>{}</title>", escape(title))));
    }
    tags.extend(description.and_then(|d| Slot::Description.meta(d)));
    if let Some(url) = url {
        tags.push((
            Slot::Canonical,
            format!(r#"<link rel="canonical" href="{}" />"#, escape_attr(url)),
        ));
    }

    let social = [
        (Slot::OgSiteName, Some(site.name.as_str())),
        (Slot::OgType, Some(meta.page_type.as_str())),
        (Slot::OgTitle, title),
        (Slot::OgDescription, description),
        (Slot::OgUrl, url),
        (Slot::OgImage, Some(image.as_str())),
        (Slot::OgLocale, Some(site.locale.as_str())),
        (Slot::TwitterCard, Some(site.twitter_card.as_str())),
        (Slot::TwitterTitle, title),
        (Slot::TwitterDescription, description),
        (Slot::TwitterImage, Some(image.as_str())),
    ];
    tags.extend(
        social
            .into_iter()
            .filter_map(|(slot, content)| content.and_then(|c| slot.meta(c))),
    );

    let json = JsonLd::from_meta(meta, site).to_json()?;
    tags.push((
        Slot::JsonLd,
        format!(
            r#"<script type="application/ld+json" id="{JSON_LD_ID}">{}</script>"#,
            escape_script_json(&json)
        ),
    ));

    Ok(tags)
}

/// Upsert title, description, canonical link, Open Graph, Twitter Card and
/// JSON-LD tags for `meta` into `html`.
pub fn apply_head_meta(
    html: &str,
    meta: &RouteMetadata,
    site: &SiteInfoConfig,
) -> Result<String, InjectError> {
    let tags = head_tags(meta, site)?;
    Ok(tags
        .iter()
        .fold(html.to_owned(), |doc, (slot, tag)| upsert(&doc, *slot, tag)))
}
