//! JSON-LD structured data for the `ld-webpage` script.
//!
//! Home gets a single `WebSite` node. Every other page gets a `WebPage`
//! node that points at the site via `isPartOf`, followed by a
//! `BreadcrumbList` when the page has a trail. One node is serialized bare,
//! two are serialized as an array.

use serde::Serialize;

use crate::config::SiteInfoConfig;
use crate::page::{BreadcrumbItem, RouteMetadata};

const SCHEMA_CONTEXT: &str = "https://schema.org";

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum JsonLd {
    One(Node),
    Many(Vec<Node>),
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Node {
    WebSite(WebSite),
    WebPage(WebPage),
    BreadcrumbList(BreadcrumbList),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSite {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "@id")]
    id: String,
    url: String,
    name: String,
    in_language: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPage {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    in_language: String,
    is_part_of: WebSiteRef,
}

#[derive(Debug, Serialize)]
pub struct WebSiteRef {
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "@id")]
    id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbList {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    item_list_element: Vec<ListItem>,
}

#[derive(Debug, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    kind: &'static str,
    /// 1-based.
    position: usize,
    name: String,
    item: String,
}

impl JsonLd {
    pub fn from_meta(meta: &RouteMetadata, site: &SiteInfoConfig) -> Self {
        if meta.is_home {
            return Self::One(Node::WebSite(WebSite {
                context: SCHEMA_CONTEXT,
                kind: "WebSite",
                id: site.website_id(),
                url: site.absolute("/"),
                name: site.name.clone(),
                in_language: site.language.clone(),
            }));
        }

        let page = Node::WebPage(WebPage {
            context: SCHEMA_CONTEXT,
            kind: "WebPage",
            id: meta.canonical_url.as_ref().map(|url| format!("{url}#webpage")),
            url: meta.canonical_url.clone(),
            name: meta.title.clone(),
            description: meta.description.clone(),
            in_language: site.language.clone(),
            is_part_of: WebSiteRef {
                kind: "WebSite",
                id: site.website_id(),
            },
        });

        match meta.breadcrumb() {
            Some(trail) => Self::Many(vec![page, Node::BreadcrumbList(breadcrumb_list(trail))]),
            None => Self::One(page),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn breadcrumb_list(trail: &[BreadcrumbItem]) -> BreadcrumbList {
    BreadcrumbList {
        context: SCHEMA_CONTEXT,
        kind: "BreadcrumbList",
        item_list_element: trail
            .iter()
            .enumerate()
            .map(|(idx, crumb)| ListItem {
                kind: "ListItem",
                position: idx + 1,
                name: crumb.name.clone(),
                item: crumb.item.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageType;
    use serde_json::Value;

    fn parse(meta: &RouteMetadata) -> Value {
        let json = JsonLd::from_meta(meta, &SiteInfoConfig::default())
            .to_json()
            .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    fn page_meta(breadcrumb: Option<Vec<BreadcrumbItem>>) -> RouteMetadata {
        RouteMetadata {
            title: Some("行動規範 | AIAU".into()),
            description: Some("desc".into()),
            canonical_url: Some("https://aiau.group/code-of-conduct/".into()),
            page_type: PageType::Article,
            breadcrumb,
            ..RouteMetadata::default()
        }
    }

    #[test]
    fn test_home_is_single_website() {
        let value = parse(&RouteMetadata {
            is_home: true,
            ..RouteMetadata::default()
        });

        assert!(value.is_object());
        assert_eq!(value["@type"], "WebSite");
        assert_eq!(value["@id"], "https://aiau.group/#website");
        assert_eq!(value["url"], "https://aiau.group/");
        assert_eq!(value["inLanguage"], "ja");
    }

    #[test]
    fn test_page_without_breadcrumb_is_single_webpage() {
        for breadcrumb in [None, Some(Vec::new())] {
            let value = parse(&page_meta(breadcrumb));
            assert!(value.is_object());
            assert_eq!(value["@type"], "WebPage");
            assert_eq!(value["@id"], "https://aiau.group/code-of-conduct/#webpage");
            assert_eq!(value["isPartOf"]["@id"], "https://aiau.group/#website");
        }
    }

    #[test]
    fn test_breadcrumb_positions_follow_input_order() {
        let trail = vec![
            BreadcrumbItem::new("TOP", "https://aiau.group/"),
            BreadcrumbItem::new("Policies", "https://aiau.group/policies/"),
            BreadcrumbItem::new("行動規範", "https://aiau.group/code-of-conduct/"),
        ];
        let value = parse(&page_meta(Some(trail.clone())));

        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["@type"], "WebPage");
        assert_eq!(array[1]["@type"], "BreadcrumbList");

        let items = array[1]["itemListElement"].as_array().unwrap();
        assert_eq!(items.len(), trail.len());
        for (idx, (item, crumb)) in items.iter().zip(&trail).enumerate() {
            assert_eq!(item["@type"], "ListItem");
            assert_eq!(item["position"], idx + 1);
            assert_eq!(item["name"], crumb.name.as_str());
            assert_eq!(item["item"], crumb.item.as_str());
        }
    }

    #[test]
    fn test_key_order_starts_with_context() {
        let json = JsonLd::from_meta(
            &RouteMetadata {
                is_home: true,
                ..RouteMetadata::default()
            },
            &SiteInfoConfig::default(),
        )
        .to_json()
        .unwrap();
        assert!(json.starts_with(r#"{"@context":"https://schema.org","@type":"WebSite""#));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let value = parse(&RouteMetadata::default());
        assert!(value.get("description").is_none());
        assert!(value.get("@id").is_none());
    }
}
