//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// AIAU site prerender and static server CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: aiau.toml)
    #[arg(short = 'C', long, global = true, default_value = "aiau.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Prerender every route into the output directory
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Serve the output directory with SPA and 404 fallback
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Run a build before serving
        #[arg(short, long)]
        build: bool,
    },

    /// Verify the shell and markdown sources without writing anything
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

/// Shared arguments for every command that reads build settings
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Override site URL for deployment.
    ///
    /// Takes precedence over both `[site] url` and the SITE_URL environment
    /// variable. Useful for preview deployments on a different origin:
    ///   aiau build --site-url "https://preview.aiau.group"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Base HTML shell path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub shell: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn build_args(&self) -> &BuildArgs {
        match &self.command {
            Commands::Build { build_args }
            | Commands::Serve { build_args, .. }
            | Commands::Check { build_args } => build_args,
        }
    }

    pub fn verbose(&self) -> bool {
        self.build_args().verbose
    }
}
