//! `[headers]` section configuration.
//!
//! The security header set attached to every response, plus the cache
//! policy for content-hashed assets. Every field defaults to the
//! production value; override only what a deployment needs.
//!
//! # Example
//!
//! ```toml
//! [headers]
//! referrer_policy = "strict-origin-when-cross-origin"
//! asset_cache_control = "public, max-age=31556952, immutable"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

const DEFAULT_CSP: &str = "default-src 'self'; \
    script-src 'self'; \
    style-src 'self' 'unsafe-inline' https://cdnjs.cloudflare.com https://fonts.googleapis.com; \
    font-src 'self' https://cdnjs.cloudflare.com https://fonts.gstatic.com; \
    frame-src https://luma.com https://lu.ma; \
    img-src 'self' data: https:; \
    connect-src 'self'; \
    form-action 'self' https://docs.google.com; \
    object-src 'none'; \
    base-uri 'self'; \
    frame-ancestors 'none'";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadersConfig {
    pub content_security_policy: String,
    pub referrer_policy: String,
    pub content_type_options: String,
    pub strict_transport_security: String,
    pub permissions_policy: String,

    /// `Cache-Control` for paths under `build.assets_prefix`.
    pub asset_cache_control: String,
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            content_security_policy: DEFAULT_CSP.into(),
            referrer_policy: "no-referrer-when-downgrade".into(),
            content_type_options: "nosniff".into(),
            strict_transport_security: "max-age=63072000; includeSubDomains; preload".into(),
            permissions_policy: "geolocation=(), microphone=(), camera=()".into(),
            asset_cache_control: "public, max-age=31556952, immutable".into(),
        }
    }
}

impl HeadersConfig {
    /// Header name/value pairs in response order.
    pub fn security_pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("Content-Security-Policy", &self.content_security_policy),
            ("Referrer-Policy", &self.referrer_policy),
            ("X-Content-Type-Options", &self.content_type_options),
            ("Strict-Transport-Security", &self.strict_transport_security),
            ("Permissions-Policy", &self.permissions_policy),
        ]
    }

    /// Header values end up verbatim in HTTP responses and in `_headers`:
    /// only visible ASCII, space and tab are encodable.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        const FIELDS: [FieldPath; 6] = [
            FieldPath::new("headers.content_security_policy"),
            FieldPath::new("headers.referrer_policy"),
            FieldPath::new("headers.content_type_options"),
            FieldPath::new("headers.strict_transport_security"),
            FieldPath::new("headers.permissions_policy"),
            FieldPath::new("headers.asset_cache_control"),
        ];
        let values = [
            &self.content_security_policy,
            &self.referrer_policy,
            &self.content_type_options,
            &self.strict_transport_security,
            &self.permissions_policy,
            &self.asset_cache_control,
        ];

        for (field, value) in FIELDS.into_iter().zip(values) {
            if value.trim().is_empty() {
                diag.error(field, "header value must not be empty");
            } else if value.contains(['\r', '\n']) {
                diag.error(field, "header value must be a single line");
            } else if !value.chars().all(is_header_value_char) {
                diag.error_with_hint(
                    field,
                    "header value must be visible ASCII",
                    "percent-encode or drop non-ASCII characters",
                );
            }
        }
    }
}

fn is_header_value_char(c: char) -> bool {
    c.is_ascii_graphic() || c == ' ' || c == '\t'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_csp_policy() {
        let headers = HeadersConfig::default();
        let csp = &headers.content_security_policy;
        assert!(csp.starts_with("default-src 'self';"));
        assert!(csp.contains("script-src 'self';"));
        assert!(!csp.contains("script-src 'self' 'unsafe-inline'"));
        assert!(csp.contains("form-action 'self' https://docs.google.com"));
        assert!(!csp.contains('\n'));
    }

    #[test]
    fn test_security_pairs_order() {
        let headers = HeadersConfig::default();
        let names: Vec<_> = headers.security_pairs().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            [
                "Content-Security-Policy",
                "Referrer-Policy",
                "X-Content-Type-Options",
                "Strict-Transport-Security",
                "Permissions-Policy",
            ]
        );
    }

    #[test]
    fn test_validate_rejects_multiline() {
        let headers = HeadersConfig {
            referrer_policy: "no-referrer\nX-Evil: 1".into(),
            permissions_policy: String::new(),
            ..HeadersConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        headers.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_validate_rejects_non_ascii() {
        let headers = HeadersConfig {
            referrer_policy: "ノーリファラー".into(),
            asset_cache_control: "public,\u{7f}max-age=1".into(),
            ..HeadersConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        headers.validate(&mut diag);
        assert_eq!(diag.len(), 2);

        let mut diag = ConfigDiagnostics::new();
        HeadersConfig {
            permissions_policy: "geolocation=(),\tcamera=()".into(),
            ..HeadersConfig::default()
        }
        .validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_non_ascii_header_fails_config_validation() {
        let mut config = crate::config::test_parse_config(
            "[headers]\nreferrer_policy = \"ノーリファラー\"",
        );
        config.site.url = "https://example.com".into();
        assert!(config.validate().is_err());
    }
}
