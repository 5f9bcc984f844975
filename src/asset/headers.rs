//! Response header handling.
//!
//! - [`Headers`]: an ordered header list with case-insensitive names
//! - [`SecurityHeaders`]: the fixed set stamped onto every response
//! - [`HeaderRules`]: path-pattern rules, rendered to `_headers` for the
//!   hosting layer and applied by [`DirStore`](super::DirStore) locally

use crate::config::{HeadersConfig, SiteConfig};

/// Ordered list of response headers.
///
/// Names compare case-insensitively; insertion order is kept for output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name` to `value`, replacing every existing header of that name.
    ///
    /// The first existing occurrence keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.0.iter().position(|(n, _)| n.eq_ignore_ascii_case(&name)) {
            Some(idx) => {
                self.0[idx] = (name.clone(), value);
                let mut seen = 0usize;
                self.0.retain(|(n, _)| {
                    if n.eq_ignore_ascii_case(&name) {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => self.0.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The security header set applied identically to every response.
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    pairs: Vec<(&'static str, String)>,
}

impl SecurityHeaders {
    pub fn from_config(config: &HeadersConfig) -> Self {
        Self {
            pairs: config
                .security_pairs()
                .into_iter()
                .map(|(name, value)| (name, value.to_owned()))
                .collect(),
        }
    }

    /// Overwrite same-name headers, keep all others.
    pub fn apply(&self, headers: &mut Headers) {
        for (name, value) in &self.pairs {
            headers.set(*name, value.as_str());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(n, v)| (*n, v.as_str()))
    }
}

/// One `_headers` block: a path pattern and the headers it attaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRule {
    /// Exact path, or a prefix ending in `*`.
    pub pattern: String,
    pub headers: Vec<(String, String)>,
}

impl HeaderRule {
    pub fn matches(&self, path: &str) -> bool {
        match self.pattern.strip_suffix('*') {
            Some(prefix) => path.starts_with(prefix),
            None => path == self.pattern,
        }
    }
}

/// Path-pattern header rules in `_headers` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRules {
    rules: Vec<HeaderRule>,
}

impl HeaderRules {
    /// `/*` gets the security set, `<assets_prefix>*` the immutable cache policy.
    pub fn from_config(config: &SiteConfig) -> Self {
        let security = config
            .headers
            .security_pairs()
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect();

        Self {
            rules: vec![
                HeaderRule {
                    pattern: "/*".into(),
                    headers: security,
                },
                HeaderRule {
                    pattern: format!("{}*", config.build.assets_prefix),
                    headers: vec![(
                        "Cache-Control".into(),
                        config.headers.asset_cache_control.clone(),
                    )],
                },
            ],
        }
    }

    /// Apply every rule matching `path`, later rules winning.
    pub fn apply(&self, path: &str, headers: &mut Headers) {
        for rule in self.rules.iter().filter(|r| r.matches(path)) {
            for (name, value) in &rule.headers {
                headers.set(name.as_str(), value.as_str());
            }
        }
    }

    /// Render in the hosting layer's `_headers` format.
    ///
    /// ```text
    /// /*
    ///   Referrer-Policy: no-referrer-when-downgrade
    ///
    /// /assets/*
    ///   Cache-Control: public, max-age=31556952, immutable
    /// ```
    pub fn render(&self) -> String {
        let blocks: Vec<String> = self
            .rules
            .iter()
            .map(|rule| {
                let mut block = rule.pattern.clone();
                block.push('\n');
                for (name, value) in &rule.headers {
                    block.push_str("  ");
                    block.push_str(name);
                    block.push_str(": ");
                    block.push_str(value);
                    block.push('\n');
                }
                block
            })
            .collect();
        blocks.join("\n")
    }
}
