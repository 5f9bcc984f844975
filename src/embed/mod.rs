//! Embedded page bodies.
//!
//! Routes whose content is not authored in markdown ship their body HTML
//! inside the binary, so a build needs only the shell and `md/`.

pub mod page {
    /// Body of the home route.
    pub const HOME_HTML: &str = include_str!("page/home.html");

    /// Body of the not-found page.
    pub const NOT_FOUND_HTML: &str = include_str!("page/not_found.html");
}
