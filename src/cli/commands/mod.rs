//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration
//! 2. Calls the engine to execute the command
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! Manifest I/O is async. Handlers stay synchronous and drive the engine on
//! a current-thread tokio runtime, so steps run one at a time.

mod completion;
mod resolve;
mod stamp;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use resolve::resolve;
pub use stamp::stamp;

use crate::cli::args::{self, Command};
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Stamp {
            source,
            workspace_path,
            package_json_dir_path,
            dry_run,
        } => {
            let ctx = Context {
                dry_run,
                ..ctx.clone()
            };
            let invocation = args::invocation(source, workspace_path, package_json_dir_path);
            stamp::stamp(&ctx, &invocation)
        }
        Command::Resolve { source } => resolve::resolve(ctx, &source.into_source()),
        Command::Completion { shell } => completion::completion(shell),
    }
}
