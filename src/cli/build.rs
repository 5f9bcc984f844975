//! Site building orchestration.
//!
//! Build phases:
//! - **Shell** - Load the bundler's `index.html` and locate the container
//! - **Render** - Every route in parallel, plus sitemap, robots and `_headers`
//! - **Collect** - Markdown sources for `/md/`
//! - **Publish** - Atomic write of every artifact
//!
//! Nothing is written until every artifact has rendered, so a fatal error
//! leaves the previous output untouched.

use crate::{
    compiler::render_article,
    config::SiteConfig,
    debug, generator, log,
    page::{ContentSource, Route, RouteMetadata},
    pipeline::{Shell, inject_content},
    utils::fs::{collect_files, write_atomic},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Directory under the output that receives the raw markdown sources.
pub const MARKDOWN_OUTPUT_DIR: &str = "md";

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("shell {} not found, build the client bundle first", .0.display())]
    MissingShell(PathBuf),

    #[error("markdown source {} not found", .0.display())]
    MissingMarkdown(PathBuf),
}

/// A rendered output file, relative to the output directory.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Render and publish the whole site. Returns the number of files written.
pub fn build_site(config: &SiteConfig) -> Result<usize> {
    let artifacts = render_site(config)?;
    publish(config, &artifacts)?;

    log!("build"; "{} files written to {}", artifacts.len(),
        config.root_relative(&config.build.output).display());
    Ok(artifacts.len())
}

/// Render every artifact in memory.
pub fn render_site(config: &SiteConfig) -> Result<Vec<Artifact>> {
    let shell = load_shell(config)?;
    debug!("build"; "container <{}> found in shell", shell.tag());

    let mut artifacts = Route::ALL
        .par_iter()
        .map(|&route| render_route(route, &shell, config))
        .collect::<Result<Vec<_>>>()?;

    artifacts.extend(render_generated(config));
    artifacts.extend(collect_markdown(config)?);

    Ok(artifacts)
}

/// Read and parse the shell. Both a missing file and a missing container
/// are fatal.
pub fn load_shell(config: &SiteConfig) -> Result<Shell> {
    let path = &config.build.shell;
    if !path.is_file() {
        return Err(BuildError::MissingShell(path.clone()).into());
    }

    let html =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Shell::parse(html, &config.build.container_id)
        .with_context(|| format!("invalid shell {}", path.display()))
}

/// Body HTML for a route.
pub fn route_content(route: Route, config: &SiteConfig) -> Result<String> {
    match route.source() {
        ContentSource::Embedded(html) => Ok(html.to_owned()),
        ContentSource::Markdown(name) => {
            let path = config.build.markdown.join(name);
            let markdown = read_markdown(&path)?;
            Ok(render_article(&markdown))
        }
    }
}

fn read_markdown(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(BuildError::MissingMarkdown(path.to_path_buf()).into());
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Render one route into the shell.
pub fn render_route(route: Route, shell: &Shell, config: &SiteConfig) -> Result<Artifact> {
    let content = route_content(route, config)?;
    let meta = RouteMetadata::for_route(route, config);
    let html = inject_content(shell, &content, Some(&meta), &config.site)
        .with_context(|| format!("failed to render {}", route.url_path(&config.build)))?;

    Ok(Artifact::new(route.output_file(&config.build), html))
}

/// sitemap.xml, robots.txt and `_headers`.
fn render_generated(config: &SiteConfig) -> [Artifact; 3] {
    let lastmod = generator::build_timestamp();
    [
        Artifact::new(
            generator::SITEMAP_FILE,
            generator::render_sitemap(config, &lastmod),
        ),
        Artifact::new(generator::ROBOTS_FILE, generator::robots::render(&config.site)),
        Artifact::new(generator::HEADERS_FILE, generator::render_headers(config)),
    ]
}

/// Markdown sources copied verbatim under `md/`.
fn collect_markdown(config: &SiteConfig) -> Result<Vec<Artifact>> {
    let dir = &config.build.markdown;
    if !dir.is_dir() {
        return Err(BuildError::MissingMarkdown(dir.clone()).into());
    }

    collect_files(dir)?
        .into_iter()
        .map(|(relative, path)| {
            let contents =
                fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Artifact::new(
                Path::new(MARKDOWN_OUTPUT_DIR).join(relative),
                contents,
            ))
        })
        .collect()
}

/// Write every artifact under the output directory.
fn publish(config: &SiteConfig, artifacts: &[Artifact]) -> Result<()> {
    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    for artifact in artifacts {
        write_atomic(&output.join(&artifact.path), &artifact.contents)?;
        log!("build"; "wrote {}", artifact.path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    const SHELL: &str = "<!doctype html>\n<html lang=\"ja\">\n  <head>\n    <meta charset=\"UTF-8\" />\n    <title>AIAU</title>\n    <script type=\"module\" src=\"/assets/index-3f2a.js\"></script>\n  </head>\n  <body>\n    <main id=\"app\" class=\"mx-auto\"></main>\n  </body>\n</html>\n";

    fn site(shell: Option<&str>) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::create_dir_all(root.join("md")).unwrap();
        if let Some(shell) = shell {
            fs::write(root.join("dist/index.html"), shell).unwrap();
        }
        fs::write(
            root.join("md/privacy-policy.md"),
            "---\ntitle: privacy\n---\n# プライバシーポリシー\n\n本文",
        )
        .unwrap();
        fs::write(root.join("md/code-of-conduct.md"), "# 行動規範\n").unwrap();
        fs::write(root.join("md/anti-harassment-policy.md"), "# ポリシー\n").unwrap();

        let mut config = test_parse_config("[site]\nurl = \"https://example.com\"");
        config.root = root.to_path_buf();
        config.build.shell = root.join("dist/index.html");
        config.build.output = root.join("dist");
        config.build.markdown = root.join("md");
        (dir, config)
    }

    #[test]
    fn test_build_writes_layout() {
        let (_dir, config) = site(Some(SHELL));
        let written = build_site(&config).unwrap();

        let out = &config.build.output;
        for file in [
            "index.html",
            "privacy-policy/index.html",
            "code-of-conduct/index.html",
            "anti-harassment-policy/index.html",
            "404.html",
            "sitemap.xml",
            "robots.txt",
            "_headers",
            "md/privacy-policy.md",
            "md/code-of-conduct.md",
            "md/anti-harassment-policy.md",
        ] {
            assert!(out.join(file).is_file(), "{file} missing");
        }
        assert_eq!(written, 11);

        let privacy = fs::read_to_string(out.join("privacy-policy/index.html")).unwrap();
        assert!(privacy.contains("<title>プライバシーポリシー | AIAU</title>"));
        assert!(privacy.contains(
            "<link rel=\"canonical\" href=\"https://example.com/privacy-policy/\" />"
        ));
        assert!(privacy.contains("<article class=\"prose prose-zinc max-w-none dark:prose-invert\">"));
        assert!(privacy.contains("<h1>プライバシーポリシー</h1>"));
        assert!(!privacy.contains("title: privacy"));
        assert!(privacy.contains("\"@type\":\"BreadcrumbList\""));
        assert!(privacy.contains("<script type=\"module\" src=\"/assets/index-3f2a.js\"></script>"));

        // markdown copies are verbatim, front matter included
        let copied = fs::read_to_string(out.join("md/privacy-policy.md")).unwrap();
        assert!(copied.starts_with("---\ntitle: privacy\n---\n"));

        let robots = fs::read_to_string(out.join("robots.txt")).unwrap();
        assert!(robots.ends_with("Sitemap: https://example.com/sitemap.xml\n"));

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert_eq!(sitemap.matches("<url>").count(), 4);
        assert!(!sitemap.contains("404.html"));
    }

    #[test]
    fn test_home_reads_shell_before_overwrite() {
        let (_dir, config) = site(Some(SHELL));
        build_site(&config).unwrap();

        let home = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert!(home.contains("<title>AIAU | AI Agent User Group</title>"));
        assert!(home.contains("<main id=\"app\" class=\"mx-auto\">\n"));
        assert!(home.contains("\"@type\":\"WebSite\""));
        assert_eq!(home.matches("<title>").count(), 1);
    }

    #[test]
    fn test_missing_shell_writes_nothing() {
        let (_dir, config) = site(None);
        let err = build_site(&config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::MissingShell(_))
        ));
        assert!(!config.build.output.join("robots.txt").exists());
    }

    #[test]
    fn test_missing_container_is_fatal() {
        let (_dir, config) = site(Some("<html><head></head><body><div id=\"root\"></div></body></html>"));
        let err = build_site(&config).unwrap_err();

        assert!(format!("{err:#}").contains("id=\"app\""));
        assert!(!config.build.output.join("404.html").exists());
    }

    #[test]
    fn test_missing_markdown_writes_nothing() {
        let (_dir, config) = site(Some(SHELL));
        fs::remove_file(config.build.markdown.join("code-of-conduct.md")).unwrap();

        let err = build_site(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::MissingMarkdown(path)) if path.ends_with("code-of-conduct.md")
        ));
        assert!(!config.build.output.join("privacy-policy").exists());
        assert_eq!(
            fs::read_to_string(config.build.output.join("index.html")).unwrap(),
            SHELL
        );
    }

    #[test]
    fn test_publish_writes_each_artifact() {
        let (_dir, config) = site(None);
        let artifacts = [
            Artifact::new("robots.txt", "User-agent: *\n"),
            Artifact::new("md/nested/a.md", "# a\n"),
        ];
        publish(&config, &artifacts).unwrap();

        for artifact in &artifacts {
            let written = fs::read(config.build.output.join(&artifact.path)).unwrap();
            assert_eq!(written, artifact.contents);
        }
    }

    #[test]
    fn test_render_site_is_pure() {
        let (_dir, config) = site(Some(SHELL));
        let artifacts = render_site(&config).unwrap();

        assert_eq!(artifacts.len(), 11);
        assert!(!config.build.output.join("404.html").exists());
        assert!(artifacts.iter().any(|a| a.path == Path::new("404.html")));
    }
}
