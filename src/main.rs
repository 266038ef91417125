use clap::{Parser, Subcommand};
use cobble::core::CobbleResult;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "cobble")]
#[command(about = "Keep the Pebble APPX on a Windows 10 Mobile device up to date")]
#[command(version)]
struct Cli {
    /// Verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Hide download progress bars
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a newer package has been published
    Check,
    /// Download the newest package into the working directory
    Download {
        /// Download even when the local package is up to date
        #[arg(short, long)]
        force: bool,
    },
    /// Download if needed, then install or update the package on the device
    Install {
        /// Deploy the already downloaded package without checking for updates
        #[arg(long)]
        offline: bool,
    },
    /// Remove the package from the device
    Uninstall,
    /// Check whether the device is connected
    Devices,
    /// List packages installed on the device
    List,
    /// Show local release, paths and deployment tool
    Status,
    /// Configure settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the current configuration
    Show,
    /// Set the Windows 10 SDK root ("Windows Kits\10" folder)
    SetSdkPath {
        /// Path to the SDK root
        path: PathBuf,
    },
    /// Set the release manifest URL
    SetManifestUrl {
        /// URL of the JSON manifest
        url: String,
    },
    /// Set the directory packages are downloaded to
    SetWorkDir {
        /// Path to the working directory
        path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("error"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(command: Commands, show_progress: bool) -> CobbleResult<()> {
    match command {
        Commands::Check => cli::check::run(show_progress).await,
        Commands::Download { force } => cli::download::run(force, show_progress).await,
        Commands::Install { offline } => cli::install::run(offline, show_progress).await,
        Commands::Uninstall => cli::uninstall::run(show_progress).await,
        Commands::Devices => cli::devices::run().await,
        Commands::List => cli::list::run().await,
        Commands::Status => cli::status::run(),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::SetSdkPath { path } => cli::config::set_sdk_path(path),
            ConfigCommands::SetManifestUrl { url } => cli::config::set_manifest_url(url),
            ConfigCommands::SetWorkDir { path } => cli::config::set_work_dir(path),
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli.command, !cli.quiet).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{}", cobble::format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
