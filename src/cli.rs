//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ReadStack reading-tracker site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Data directory path (relative to project root)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Config file name (default: readstack.toml)
    #[arg(short = 'C', long, default_value = "readstack.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Comma-separated tags to pre-filter all listings with
    #[arg(short, long)]
    pub tags: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Deletes the output directory if there is one and rebuilds the site
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build the site and serve it over HTTP
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub const fn build_args(&self) -> &BuildArgs {
        match &self.command {
            Commands::Build { build_args } | Commands::Serve { build_args, .. } => build_args,
        }
    }

    /// Selected tags from `--tags`, split on commas with blanks dropped.
    pub fn selected_tags(&self) -> Vec<String> {
        self.build_args()
            .tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_tags_parsing() {
        let cli = Cli::parse_from(["readstack", "build", "--tags", "rust, systems,,history"]);
        assert_eq!(cli.selected_tags(), ["rust", "systems", "history"]);
    }

    #[test]
    fn test_selected_tags_absent() {
        let cli = Cli::parse_from(["readstack", "build"]);
        assert!(cli.selected_tags().is_empty());
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from(["readstack", "serve", "-p", "3000", "-i", "0.0.0.0"]);
        match &cli.command {
            Commands::Serve { interface, port, .. } => {
                assert_eq!(interface.as_deref(), Some("0.0.0.0"));
                assert_eq!(*port, Some(3000));
            }
            Commands::Build { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn test_minify_flag_without_value() {
        let cli = Cli::parse_from(["readstack", "build", "--minify"]);
        assert_eq!(cli.build_args().minify, Some(true));
    }
}
