//! The shared HTML shell and body injection.
//!
//! The shell is parsed once per build: the container's opening tag and the
//! first matching closing tag are located up front, so a shell without a
//! usable container fails the build before any page is rendered.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static HEAD_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</head\s*>").unwrap());

#[derive(Debug, Error)]
pub enum InjectError {
    #[error("cannot find an element with id=\"{id}\" in the shell")]
    ContainerNotFound { id: String },

    #[error("<{tag} id=\"{id}\"> is never closed in the shell")]
    ContainerNotClosed { tag: String, id: String },

    #[error("the shell has no </head>")]
    HeadNotFound,

    #[error("invalid container pattern")]
    Pattern(#[from] regex::Error),

    #[error("failed to serialize JSON-LD")]
    JsonLd(#[from] serde_json::Error),
}

/// A parsed HTML shell.
#[derive(Debug, Clone)]
pub struct Shell {
    html: String,
    /// Byte range of the whole container element, open tag through close tag.
    container: Range<usize>,
    /// Length of the opening tag at `container.start`.
    open_len: usize,
    tag: String,
}

impl Shell {
    /// Locate the container element `<tag ... id="container_id" ...>` and its
    /// first closing `</tag>`.
    pub fn parse(html: impl Into<String>, container_id: &str) -> Result<Self, InjectError> {
        let html = html.into();

        let open_re = Regex::new(&format!(
            r#"(?i)<([a-z][a-z0-9-]*)\b[^>]*\sid\s*=\s*["']{}["'][^>]*>"#,
            regex::escape(container_id)
        ))?;
        let open = open_re
            .captures(&html)
            .ok_or_else(|| InjectError::ContainerNotFound {
                id: container_id.to_owned(),
            })?;
        let (whole, tag) = match (open.get(0), open.get(1)) {
            (Some(whole), Some(tag)) => (whole, tag.as_str().to_ascii_lowercase()),
            _ => {
                return Err(InjectError::ContainerNotFound {
                    id: container_id.to_owned(),
                });
            }
        };

        let close_re = Regex::new(&format!(r"(?i)</{}\s*>", regex::escape(&tag)))?;
        let close = close_re
            .find_at(&html, whole.end())
            .ok_or_else(|| InjectError::ContainerNotClosed {
                tag: tag.clone(),
                id: container_id.to_owned(),
            })?;

        if !HEAD_CLOSE.is_match(&html[..whole.start()]) {
            return Err(InjectError::HeadNotFound);
        }

        Ok(Self {
            container: whole.start()..close.end(),
            open_len: whole.len(),
            tag,
            html,
        })
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// The container's opening tag, attributes preserved verbatim.
    pub fn open_tag(&self) -> &str {
        &self.html[self.container.start..self.container.start + self.open_len]
    }

    /// Tag name of the container, lowercased.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Replace the container's inner content with `content`.
    ///
    /// Output is `<open tag>\n{content}\n</tag>` in place of the whole
    /// container; everything outside it is copied unchanged.
    pub fn inject_content(&self, content: &str) -> String {
        let before = &self.html[..self.container.start];
        let after = &self.html[self.container.end..];

        let mut out = String::with_capacity(self.html.len() + content.len());
        out.push_str(before);
        out.push_str(self.open_tag());
        out.push('\n');
        out.push_str(content);
        out.push_str("\n</");
        out.push_str(&self.tag);
        out.push('>');
        out.push_str(after);
        out
    }
}

/// Byte offset of the first `</head>`, if any.
pub(crate) fn head_close(html: &str) -> Option<usize> {
    HEAD_CLOSE.find(html).map(|m| m.start())
}
