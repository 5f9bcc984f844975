//! Published asset serving.
//!
//! - [`AssetStore`]: read-only path lookup ([`DirStore`], [`MemoryStore`])
//! - [`AssetRouter`]: the fallback chain in front of a store
//! - [`HeaderRules`] / [`SecurityHeaders`]: response header policy

mod headers;
mod path;
mod router;
mod store;

pub use headers::{HeaderRules, Headers, SecurityHeaders};
pub use path::{decode_path, split_query};
pub use router::{AssetRouter, Resolved, Source};
pub use store::{Asset, AssetStore, DirStore, MemoryStore};
