use anyhow::Result;
use clap::Parser;
use edusec_landing::commands;
use edusec_landing::config::Settings;

/// edusec-landing - download page for the EduSec mobile app
///
/// Serves the landing page and proxies the release API. The `releases` and
/// `resolve` subcommands query the same flow from a terminal.
///
/// Examples:
///   edusec-landing serve --upstream-url https://api.example.com
///   edusec-landing resolve latest --development
#[derive(Parser, Debug)]
#[command(author, version = env!("EDUSEC_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    settings: Settings,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve,

    /// List downloadable releases, newest first
    Releases,

    /// Print the download URL of a version
    Resolve(ResolveArgs),
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// A version tag (e.g. v1.2.0) or "latest"
    #[arg(value_name = "VERSION")]
    pub version: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => commands::serve(&cli.settings).await?,
        Commands::Releases => commands::releases(&cli.settings).await?,
        Commands::Resolve(args) => commands::resolve(&cli.settings, &args.version)?,
    }
    Ok(())
}
