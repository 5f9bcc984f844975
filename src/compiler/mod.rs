//! Content compilers.

pub mod markdown;

pub use markdown::render_article;
