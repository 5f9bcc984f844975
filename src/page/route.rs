//! The fixed route table.
//!
//! The site has exactly these pages; adding one means adding a variant here.
//!
//! ```text
//! Route                  URL path                   Output file
//! Home                   /                          index.html
//! PrivacyPolicy          /privacy-policy/           privacy-policy/index.html
//! CodeOfConduct          /code-of-conduct/          code-of-conduct/index.html
//! AntiHarassmentPolicy   /anti-harassment-policy/   anti-harassment-policy/index.html
//! NotFound               /404.html                  404.html
//! ```

use std::path::PathBuf;

use super::PageType;
use crate::config::BuildSectionConfig;
use crate::embed::page::{HOME_HTML, NOT_FOUND_HTML};

/// Where a route's body HTML comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// Body shipped inside the binary.
    Embedded(&'static str),
    /// Markdown file name inside `build.markdown`.
    Markdown(&'static str),
}

/// How often search engines should expect a page to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Weekly,
    Yearly,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Yearly => "yearly",
        }
    }
}

/// Sitemap entry policy for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitemapPolicy {
    pub changefreq: ChangeFreq,
    /// Formatted priority, e.g. `"0.4"`.
    pub priority: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    PrivacyPolicy,
    CodeOfConduct,
    AntiHarassmentPolicy,
    NotFound,
}

impl Route {
    /// Every route, in build and sitemap order.
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::PrivacyPolicy,
        Route::CodeOfConduct,
        Route::AntiHarassmentPolicy,
        Route::NotFound,
    ];

    /// URL path of the route. `NotFound` uses the configured page name.
    pub fn url_path(self, build: &BuildSectionConfig) -> String {
        match self {
            Self::Home => "/".into(),
            Self::PrivacyPolicy => "/privacy-policy/".into(),
            Self::CodeOfConduct => "/code-of-conduct/".into(),
            Self::AntiHarassmentPolicy => "/anti-harassment-policy/".into(),
            Self::NotFound => build.not_found_path(),
        }
    }

    /// Output file relative to the output directory.
    pub fn output_file(self, build: &BuildSectionConfig) -> PathBuf {
        match self {
            Self::NotFound => PathBuf::from(build.not_found.trim_start_matches('/')),
            _ => {
                let path = self.url_path(build);
                PathBuf::from(path.trim_start_matches('/')).join("index.html")
            }
        }
    }

    pub const fn source(self) -> ContentSource {
        match self {
            Self::Home => ContentSource::Embedded(HOME_HTML),
            Self::PrivacyPolicy => ContentSource::Markdown("privacy-policy.md"),
            Self::CodeOfConduct => ContentSource::Markdown("code-of-conduct.md"),
            Self::AntiHarassmentPolicy => ContentSource::Markdown("anti-harassment-policy.md"),
            Self::NotFound => ContentSource::Embedded(NOT_FOUND_HTML),
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "AIAU | AI Agent User Group",
            Self::PrivacyPolicy => "プライバシーポリシー | AIAU",
            Self::CodeOfConduct => "行動規範 | AIAU",
            Self::AntiHarassmentPolicy => "アンチハラスメントポリシー | AIAU",
            Self::NotFound => "404 Not Found | AIAU",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Home => {
                "AIエージェントの知見共有と交流のためのコミュニティ。イベント情報、行動規範、プライバシーポリシーを掲載。"
            }
            Self::PrivacyPolicy => {
                "AIAUのプライバシーポリシー。個人情報の取り扱い方針についてご説明します。"
            }
            Self::CodeOfConduct => {
                "AIAUコミュニティの行動規範。誰もが安心して参加できるためのルールとガイドライン。"
            }
            Self::AntiHarassmentPolicy => {
                "AIAUのアンチハラスメントポリシー。安全で敬意ある環境のための方針。"
            }
            Self::NotFound => "ページが見つかりません。",
        }
    }

    pub const fn page_type(self) -> PageType {
        match self {
            Self::Home | Self::NotFound => PageType::Website,
            _ => PageType::Article,
        }
    }

    pub const fn is_home(self) -> bool {
        matches!(self, Self::Home)
    }

    /// Label of the trailing breadcrumb entry, for routes that have a trail.
    pub const fn breadcrumb_label(self) -> Option<&'static str> {
        match self {
            Self::PrivacyPolicy => Some("プライバシーポリシー"),
            Self::CodeOfConduct => Some("行動規範"),
            Self::AntiHarassmentPolicy => Some("アンチハラスメントポリシー"),
            Self::Home | Self::NotFound => None,
        }
    }

    /// Sitemap policy; `None` keeps the route out of the sitemap.
    pub const fn sitemap(self) -> Option<SitemapPolicy> {
        let (changefreq, priority) = match self {
            Self::Home => (ChangeFreq::Weekly, "1.0"),
            Self::PrivacyPolicy => (ChangeFreq::Yearly, "0.3"),
            Self::CodeOfConduct | Self::AntiHarassmentPolicy => (ChangeFreq::Yearly, "0.4"),
            Self::NotFound => return None,
        };
        Some(SitemapPolicy {
            changefreq,
            priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_files() {
        let build = BuildSectionConfig::default();
        let files: Vec<_> = Route::ALL.iter().map(|r| r.output_file(&build)).collect();
        assert_eq!(
            files,
            [
                PathBuf::from("index.html"),
                PathBuf::from("privacy-policy/index.html"),
                PathBuf::from("code-of-conduct/index.html"),
                PathBuf::from("anti-harassment-policy/index.html"),
                PathBuf::from("404.html"),
            ]
        );
    }

    #[test]
    fn test_not_found_follows_config() {
        let build = BuildSectionConfig {
            not_found: "missing.html".into(),
            ..BuildSectionConfig::default()
        };
        assert_eq!(Route::NotFound.url_path(&build), "/missing.html");
        assert_eq!(Route::NotFound.output_file(&build), PathBuf::from("missing.html"));
    }

    #[test]
    fn test_sitemap_excludes_not_found() {
        let listed: Vec<_> = Route::ALL.iter().filter(|r| r.sitemap().is_some()).collect();
        assert_eq!(listed.len(), 4);
        assert_eq!(Route::Home.sitemap().unwrap().priority, "1.0");
        assert_eq!(Route::PrivacyPolicy.sitemap().unwrap().priority, "0.3");
        assert_eq!(
            Route::CodeOfConduct.sitemap().unwrap().changefreq.as_str(),
            "yearly"
        );
    }

    #[test]
    fn test_markdown_sources() {
        assert_eq!(
            Route::CodeOfConduct.source(),
            ContentSource::Markdown("code-of-conduct.md")
        );
        assert!(matches!(Route::Home.source(), ContentSource::Embedded(_)));
    }
}
