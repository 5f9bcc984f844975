//! Dry-run of the build.
//!
//! Renders every artifact in memory, so every fatal build error surfaces
//! here, but writes nothing.

use anyhow::Result;

use super::build::render_site;
use crate::config::SiteConfig;
use crate::{debug, log};

/// Check that the site would build. Returns the number of files a build
/// would write.
pub fn check_site(config: &SiteConfig) -> Result<usize> {
    let artifacts = render_site(config)?;

    for artifact in &artifacts {
        debug!("check"; "{} ({} bytes)", artifact.path.display(), artifact.contents.len());
    }
    log!("check"; "ok, {} files would be written to {}", artifacts.len(),
        config.root_relative(&config.build.output).display());

    Ok(artifacts.len())
}
