//! Request path normalization.

use percent_encoding::percent_decode_str;

/// Drop the query string and fragment.
pub fn split_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

/// Percent-decode a request path, ensuring a leading `/`.
///
/// Returns `None` when the decoded bytes are not UTF-8.
pub fn decode_path(path: &str) -> Option<String> {
    let decoded = percent_decode_str(path).decode_utf8().ok()?;
    if decoded.starts_with('/') {
        Some(decoded.into_owned())
    } else {
        Some(format!("/{decoded}"))
    }
}

/// `path` with a trailing `/` followed by `index.html`.
pub fn index_path(path: &str) -> String {
    if path.ends_with('/') {
        format!("{path}index.html")
    } else {
        format!("{path}/index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_query() {
        assert_eq!(split_query("/a?b=1"), "/a");
        assert_eq!(split_query("/a#top"), "/a");
        assert_eq!(split_query("/a/?x#y"), "/a/");
        assert_eq!(split_query("/plain"), "/plain");
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/a%20b").as_deref(), Some("/a b"));
        assert_eq!(decode_path("md/x.md").as_deref(), Some("/md/x.md"));
        assert_eq!(decode_path("/%FF"), None);
    }

    #[test]
    fn test_index_path() {
        assert_eq!(index_path("/"), "/index.html");
        assert_eq!(index_path("/privacy-policy"), "/privacy-policy/index.html");
        assert_eq!(index_path("/privacy-policy/"), "/privacy-policy/index.html");
    }
}
