//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api::RunFlags;

/// Inspect developer tools on this machine and suggest fixes.
#[derive(Debug, Parser)]
#[command(name = "inspector")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log debug information to the console
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Turn on experimental components
    #[arg(short, long, global = true)]
    pub experimental: bool,

    /// Also write the full log to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Optional JSON config file
    #[arg(long, global = true, value_name = "PATH", env = "INSPECTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show what would happen without changing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Run flags for the context, merging global and subcommand options.
    pub fn run_flags(&self) -> RunFlags {
        let mut flags = RunFlags {
            debug: self.debug,
            experimental: self.experimental,
            dry_run: self.dry_run,
            config_file: self.config.clone(),
            log_file: self.log_file.clone(),
            ..Default::default()
        };
        if let Some(Commands::Inspect(args)) = &self.command {
            flags.interactive = args.interactive;
            flags.only = args.only.clone();
            flags.skip = args.skip.clone();
        }
        flags
    }

    /// Name the run context goes by.
    pub fn context_name(&self) -> &'static str {
        match self.command {
            Some(Commands::Dump(_)) => "dump",
            _ => "inspector",
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check installed tools (default if no command specified)
    Inspect(InspectArgs),

    /// List built-in components and their capabilities
    List,

    /// Collect environment diagnostics into a tar.gz archive
    Dump(DumpArgs),
}

/// Arguments for the `inspect` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InspectArgs {
    /// Confirm and run suggested fixes
    #[arg(short, long)]
    pub interactive: bool,

    /// Inspect only these components (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip these components (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,
}

/// Arguments for the `dump` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DumpArgs {
    /// Path of the output tar.gz archive
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
