//! resolve command - Print the canonical version for a ref or tag

use crate::core::config::Config;
use crate::core::types::VersionSource;
use crate::engine::{self, Context, Rules};
use anyhow::{Context as _, Result};
use tracing::warn;

/// Validate `source` and print its canonical version.
///
/// Only the global config is consulted; no workspace is involved.
pub fn resolve(ctx: &Context, source: &VersionSource) -> Result<()> {
    let loaded = Config::load(None).context("Failed to load config")?;
    if !ctx.quiet {
        for warning in &loaded.warnings {
            warn!(path = %warning.path.display(), "{}", warning.message);
        }
    }

    let rules = Rules::from(&loaded.config);
    engine::gate_source(source, &rules)?;
    let version = engine::resolve(source, &rules.tag_ref_prefix)?;

    println!("{}", version);
    Ok(())
}
