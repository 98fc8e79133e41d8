use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxc::core::Currency;
use fxc::core::log::init_logging;

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

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert; a comma is accepted as decimal separator
        amount: String,
        /// Source currency (defaults to the configured pair)
        from: Option<Currency>,
        /// Target currency (defaults to the configured pair)
        to: Option<Currency>,
        /// Treat the amount as entered in the target currency
        #[arg(short, long)]
        reverse: bool,
    },
    /// Show the cached rate table
    Rates,
    /// Fetch the latest rates even if the cached ones are fresh
    Refresh,
    /// List supported currencies
    Currencies,
}

impl From<Commands> for fxc::AppCommand {
    fn from(cmd: Commands) -> fxc::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                from,
                to,
                reverse,
            } => fxc::AppCommand::Convert {
                amount,
                from,
                to,
                reverse,
            },
            Commands::Rates => fxc::AppCommand::Rates,
            Commands::Refresh => fxc::AppCommand::Refresh,
            Commands::Currencies => fxc::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxc::cli::setup::setup(),
        Some(cmd) => fxc::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
