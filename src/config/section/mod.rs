//! Configuration section definitions.
//!
//! Each module corresponds to a section in `aiau.toml`:
//!
//! | Module    | TOML Section | Purpose                               |
//! |-----------|--------------|---------------------------------------|
//! | `build`   | `[build]`    | Shell, output and markdown paths      |
//! | `headers` | `[headers]`  | Security headers, asset cache policy  |
//! | `serve`   | `[serve]`    | Local server                          |
//! | `site`    | `[site]`     | Site URL, name, locale, preview image |

mod build;
mod headers;
mod serve;
mod site;

pub use build::BuildSectionConfig;
pub use headers::HeadersConfig;
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;
