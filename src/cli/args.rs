//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! # Option Aliases
//!
//! Release pipelines often pass options in PascalCase (`--Ref`, `--Tag`,
//! `--WorkspacePath`, `--PackageJsonDirPath`). Those spellings are accepted
//! as hidden aliases.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::types::{Invocation, VersionSource};

/// release-stamp - Write the version implied by a release tag into a package manifest
#[derive(Parser, Debug)]
#[command(name = "release-stamp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the resolved version into a manifest
    #[command(
        name = "stamp",
        long_about = "Write the resolved version into a package manifest.\n\n\
            The version comes either from a tag reference (--ref) or a bare \
            version (--tag). All parameters are validated before anything is \
            written; if any is invalid, every violation is reported and the \
            manifest is left untouched.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Stamp the root package.json from the ref that triggered CI
    release-stamp stamp --ref \"$GITHUB_REF\" --workspace-path .

    # Stamp a package inside a monorepo from a bare version
    release-stamp stamp --tag 3.1.0-beta.2 --workspace-path . \\
        --package-json-dir-path packages/core

    # Check what would be written without touching the file
    release-stamp stamp --ref refs/tags/v2.0.1 --workspace-path . --dry-run"
    )]
    Stamp {
        #[command(flatten)]
        source: SourceArgs,

        /// Workspace root directory
        #[arg(long, alias = "WorkspacePath", value_name = "PATH")]
        workspace_path: PathBuf,

        /// Manifest directory relative to the workspace (empty for the root)
        #[arg(
            long,
            alias = "PackageJsonDirPath",
            value_name = "PATH",
            default_value = ""
        )]
        package_json_dir_path: String,

        /// Show the version that would be written without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the canonical version for a ref or tag
    #[command(
        name = "resolve",
        after_help = "\
EXAMPLES:
    release-stamp resolve --ref refs/tags/v2.0.1    # prints 2.0.1
    release-stamp resolve --tag 3.1.0-beta.2+build  # prints 3.1.0-beta.2"
    )]
    Resolve {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    release-stamp completion bash > ~/.local/share/bash-completion/completions/release-stamp

    # Zsh
    release-stamp completion zsh > \"${fpath[1]}/_release-stamp\"

    # Fish
    release-stamp completion fish > ~/.config/fish/completions/release-stamp.fish

    # PowerShell
    release-stamp completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where the version comes from. Exactly one must be given.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Tag reference, e.g. refs/tags/v1.2.3
    #[arg(long = "ref", alias = "Ref", value_name = "REF")]
    pub git_ref: Option<String>,

    /// Bare semantic version, e.g. 1.2.3
    #[arg(long, alias = "Tag", value_name = "TAG")]
    pub tag: Option<String>,
}

impl SourceArgs {
    /// Convert into a version source.
    ///
    /// clap guarantees exactly one of the two is present; `--ref` wins if
    /// both somehow are.
    pub fn into_source(self) -> VersionSource {
        match (self.git_ref, self.tag) {
            (Some(git_ref), _) => VersionSource::from_ref(git_ref),
            (None, Some(tag)) => VersionSource::from_tag(tag),
            (None, None) => VersionSource::from_tag(String::new()),
        }
    }
}

/// Build the invocation record for `stamp`.
pub fn invocation(source: SourceArgs, workspace_path: PathBuf, manifest_dir: String) -> Invocation {
    Invocation::new(source.into_source(), workspace_path, manifest_dir)
}

/// Supported shells for completion.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}
