use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[command(name = "umbra", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (default: <source>/umbra.toml)
    #[arg(short, long, global = true, env = "UMBRA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Source root (default: current directory)
    #[arg(short, long, global = true)]
    pub source: Option<PathBuf>,

    /// Shadow root (default: <source>/.umbra)
    #[arg(long, global = true)]
    pub shadow: Option<PathBuf>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Mirror the source tree into the shadow tree
    #[command(alias = "m", name = "mirror")]
    Mirror,
    /// Delete the shadow tree and mirror from scratch
    #[command(name = "rebuild")]
    Rebuild,
    /// Resolve a request through the fallback chain
    #[command(alias = "r", name = "resolve")]
    Resolve(ResolveArg),
    /// List binary zones in the shadow tree
    #[command(alias = "z", name = "zones")]
    Zones,
    /// Show host, platform tag and effective configuration
    #[command(alias = "i", name = "info")]
    Info,
}

#[derive(Clone, Debug, Args)]
pub struct ResolveArg {
    /// Module request, e.g. `alpha` or `./native`
    pub request: String,
    /// Requesting file or directory (default: source root)
    #[arg(long)]
    pub from: Option<PathBuf>,
}
