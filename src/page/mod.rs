//! Page types: the fixed route table and per-route metadata.

mod meta;
mod route;

pub use meta::{BreadcrumbItem, PageType, RouteMetadata};
pub use route::{ChangeFreq, ContentSource, Route, SitemapPolicy};
