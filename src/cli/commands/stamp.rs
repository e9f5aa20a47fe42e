//! stamp command - Write the resolved version into a manifest

use crate::core::config::Config;
use crate::core::manifest::FsManifestStore;
use crate::core::types::Invocation;
use crate::engine::{self, Context, Rules};
use anyhow::{Context as _, Result};
use tracing::warn;

/// Validate the invocation, resolve its version, and stamp the manifest.
///
/// Prints nothing on success unless `ctx.dry_run` is set.
pub fn stamp(ctx: &Context, invocation: &Invocation) -> Result<()> {
    let loaded =
        Config::load(Some(invocation.workspace_path.as_path())).context("Failed to load config")?;
    if !ctx.quiet {
        for warning in &loaded.warnings {
            warn!(path = %warning.path.display(), "{}", warning.message);
        }
    }

    let rules = Rules::from(&loaded.config);
    let store = FsManifestStore::new(loaded.config.manifest_file());

    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to start async runtime")?;
    let outcome = rt.block_on(engine::run(invocation, &rules, &store, ctx))?;

    if ctx.dry_run {
        match &outcome.previous_version {
            Some(previous) => println!(
                "Would set version {} -> {} in {}",
                previous,
                outcome.version,
                outcome.manifest_path.display()
            ),
            None => println!(
                "Would set version {} in {}",
                outcome.version,
                outcome.manifest_path.display()
            ),
        }
    }

    Ok(())
}
