//! Markdown to HTML conversion using pulldown-cmark.

use std::borrow::Cow;
use std::sync::LazyLock;

use pulldown_cmark::{Options, Parser, html};
use regex::Regex;

/// Class list of the `<article>` wrapping rendered markdown.
pub const ARTICLE_CLASS: &str = "prose prose-zinc max-w-none dark:prose-invert";

/// A line consisting of `---`, optionally followed by whitespace.
static FRONT_MATTER_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---\s*$").unwrap());

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
}

impl MarkdownOptions {
    /// The GitHub-flavoured set: every extension enabled.
    pub fn gfm() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        opts
    }
}

/// Drop a leading `---` fenced front-matter block.
///
/// The text is split on fence lines; with at least three parts the first
/// two (empty prefix and front matter) are dropped and the rest re-joined
/// with `---\n`, so a later horizontal rule survives.
pub fn strip_front_matter(markdown: &str) -> Cow<'_, str> {
    if !markdown.starts_with("---") {
        return Cow::Borrowed(markdown);
    }

    let parts: Vec<&str> = FRONT_MATTER_FENCE.split(markdown).collect();
    if parts.len() < 3 {
        return Cow::Borrowed(markdown);
    }

    Cow::Owned(parts[2..].join("---\n").trim_start().to_owned())
}

/// Convert markdown (front matter included) to HTML.
pub fn to_html(markdown: &str, options: &MarkdownOptions) -> String {
    let body = strip_front_matter(markdown);
    let parser = Parser::new_ext(&body, options.to_pulldown_options());

    let mut out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render a markdown page body: HTML wrapped in the prose `<article>`.
pub fn render_article(markdown: &str) -> String {
    format!(
        r#"<article class="{ARTICLE_CLASS}">{}</article>"#,
        to_html(markdown, &MarkdownOptions::gfm())
    )
}
