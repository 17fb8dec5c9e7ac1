use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use print_quote::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing(args.log_format);

    match args.get_command() {
        cli::Commands::Serve => {
            commands::serve::execute(&args.config).await?;
        }
        cli::Commands::Quote(quote_args) => {
            commands::quote::execute(&args.config, quote_args)?;
        }
        cli::Commands::Inspect { file } => {
            commands::inspect::execute(&file)?;
        }
        cli::Commands::Ledger { action } => match action {
            cli::LedgerCommands::Show => commands::ledger::show(&args.config)?,
        },
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Version => {
            println!("print-quote v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
