//! Per-route head metadata.

use super::Route;
use crate::config::SiteConfig;

/// `og:type` of a page. Also selects the JSON-LD shape together with
/// [`RouteMetadata::is_home`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageType {
    #[default]
    Website,
    Article,
}

impl PageType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Article => "article",
        }
    }
}

/// One entry of a breadcrumb trail. `item` is an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbItem {
    pub name: String,
    pub item: String,
}

impl BreadcrumbItem {
    pub fn new(name: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: item.into(),
        }
    }
}

/// Everything the head injector needs to know about one page.
///
/// Optional fields that are `None` leave the corresponding tags untouched;
/// `og_image` falls back to the site-wide image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
    pub page_type: PageType,
    pub is_home: bool,
    pub breadcrumb: Option<Vec<BreadcrumbItem>>,
}

impl RouteMetadata {
    /// Derive the metadata of a fixed route.
    pub fn for_route(route: Route, config: &SiteConfig) -> Self {
        let site = &config.site;
        let canonical = site.absolute(&route.url_path(&config.build));

        let breadcrumb = route.breadcrumb_label().map(|label| {
            vec![
                BreadcrumbItem::new("TOP", site.absolute("/")),
                BreadcrumbItem::new(label, canonical.clone()),
            ]
        });

        Self {
            title: Some(route.title().to_owned()),
            description: Some(route.description().to_owned()),
            canonical_url: Some(canonical),
            og_image: Some(site.default_og_image()),
            page_type: route.page_type(),
            is_home: route.is_home(),
            breadcrumb,
        }
    }

    /// Breadcrumb trail, if present and non-empty.
    pub fn breadcrumb(&self) -> Option<&[BreadcrumbItem]> {
        self.breadcrumb.as_deref().filter(|items| !items.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_metadata() {
        let config = SiteConfig::default();
        let meta = RouteMetadata::for_route(Route::Home, &config);

        assert!(meta.is_home);
        assert_eq!(meta.page_type, PageType::Website);
        assert_eq!(meta.canonical_url.as_deref(), Some("https://aiau.group/"));
        assert_eq!(meta.og_image.as_deref(), Some("https://aiau.group/OGP.jpg"));
        assert!(meta.breadcrumb().is_none());
    }

    #[test]
    fn test_policy_breadcrumb() {
        let config = SiteConfig::default();
        let meta = RouteMetadata::for_route(Route::CodeOfConduct, &config);

        assert!(!meta.is_home);
        assert_eq!(meta.page_type, PageType::Article);
        assert_eq!(
            meta.breadcrumb(),
            Some(
                &[
                    BreadcrumbItem::new("TOP", "https://aiau.group/"),
                    BreadcrumbItem::new("行動規範", "https://aiau.group/code-of-conduct/"),
                ][..]
            )
        );
    }

    #[test]
    fn test_not_found_metadata() {
        let mut config = SiteConfig::default();
        config.site.url = "https://preview.example.com".into();
        let meta = RouteMetadata::for_route(Route::NotFound, &config);

        assert_eq!(
            meta.canonical_url.as_deref(),
            Some("https://preview.example.com/404.html")
        );
        assert_eq!(meta.page_type, PageType::Website);
        assert!(meta.breadcrumb.is_none());
    }

    #[test]
    fn test_empty_breadcrumb_is_absent() {
        let meta = RouteMetadata {
            breadcrumb: Some(Vec::new()),
            ..RouteMetadata::default()
        };
        assert!(meta.breadcrumb().is_none());
    }
}
