//! Page rendering pipeline.
//!
//! ```text
//! shell ──parse──> Shell ──inject_content──> html ──apply_head_meta──> page
//! ```
//!
//! Every step is a pure function of its inputs; file I/O belongs to the
//! caller.

mod head;
mod jsonld;
mod shell;

pub use head::{JSON_LD_ID, apply_head_meta};
pub use jsonld::JsonLd;
pub use shell::{InjectError, Shell};

use crate::config::SiteInfoConfig;
use crate::page::RouteMetadata;

/// Inject `content` into the shell's container, then upsert `meta` into the
/// head when given.
pub fn inject_content(
    shell: &Shell,
    content: &str,
    meta: Option<&RouteMetadata>,
    site: &SiteInfoConfig,
) -> Result<String, InjectError> {
    let html = shell.inject_content(content);
    match meta {
        Some(meta) => apply_head_meta(&html, meta, site),
        None => Ok(html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_without_meta_leaves_head() {
        let shell = Shell::parse("<head><title>T</title></head><main id=\"app\"></main>", "app")
            .unwrap();
        let html = inject_content(&shell, "x", None, &SiteInfoConfig::default()).unwrap();
        assert_eq!(html, "<head><title>T</title></head><main id=\"app\">\nx\n</main>");
    }

    #[test]
    fn test_inject_with_meta() {
        let shell = Shell::parse("<head><title>T</title></head><main id=\"app\"></main>", "app")
            .unwrap();
        let meta = RouteMetadata {
            title: Some("New".into()),
            ..RouteMetadata::default()
        };
        let html = inject_content(&shell, "x", Some(&meta), &SiteInfoConfig::default()).unwrap();
        assert!(html.contains("<title>New</title>"));
        assert!(html.contains("<main id=\"app\">\nx\n</main>"));
    }
}
