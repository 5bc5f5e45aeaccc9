use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use cambio::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cambio::AppCommand {
    fn from(cmd: Commands) -> cambio::AppCommand {
        match cmd {
            Commands::Convert { amount, currency } => {
                cambio::AppCommand::Convert { amount, currency }
            }
            Commands::Interactive => cambio::AppCommand::Interactive,
            Commands::Currencies => cambio::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount and chart the last 10 days of the rate
    Convert {
        /// Amount to convert
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        /// Currency code, e.g. dolar, euro, uf, utm
        #[arg(short = 'm', long, default_value = "")]
        currency: String,
    },
    /// Prompt for conversions until 'salir'
    Interactive,
    /// List supported currency codes
    Currencies,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => cambio::cli::setup::setup(),
        Some(cmd) => cambio::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
