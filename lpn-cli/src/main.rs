use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Variant;

#[derive(Parser)]
#[command(name = "lpn")]
#[command(about = "Run disposable Liferay Portal instances on Docker", version)]
struct Cli {
    /// Runs commands with debug log level
    #[arg(short = 'V', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs a portal container, optionally linked to a database
    Run(commands::run::RunArgs),

    /// Starts the stopped containers of a portal stack
    Start {
        /// Portal flavor
        variant: Variant,
    },

    /// Stops the running containers of a portal stack
    Stop {
        /// Portal flavor
        variant: Variant,
    },

    /// Removes a portal stack, including its volumes
    Rm {
        /// Portal flavor
        variant: Variant,
    },

    /// Reports whether the portal container for a flavor exists
    Status {
        /// Portal flavor
        variant: Variant,
    },

    /// Follows the portal container's logs
    Logs {
        /// Portal flavor
        variant: Variant,
    },

    /// Deploys a file into the running portal container
    Deploy(commands::deploy::DeployArgs),

    /// Lists the image tags available on Docker Hub
    Tags(commands::tags::TagsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Start { variant } => commands::start::start(variant).await,
        Commands::Stop { variant } => commands::stop::stop(variant).await,
        Commands::Rm { variant } => commands::rm::rm(variant).await,
        Commands::Status { variant } => commands::status::status(variant).await,
        Commands::Logs { variant } => commands::logs::logs(variant).await,
        Commands::Deploy(args) => commands::deploy::deploy(args).await,
        Commands::Tags(args) => commands::tags::tags(args).await,
    }
}
