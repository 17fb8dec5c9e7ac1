use clap::{ArgGroup, Args, Parser, Subcommand};
use print_quote::LogFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "print-quote", version, about = "3D print job quoting")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "print-quote.toml", global = true)]
    pub config: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the quote API server (default)
    Serve,

    /// Price a single print job
    Quote(QuoteArgs),

    /// Show the metadata extracted from a G-code file
    Inspect {
        /// Path to a sliced .gcode file
        file: PathBuf,
    },

    /// Ledger commands
    Ledger {
        #[command(subcommand)]
        action: LedgerCommands,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("job").required(true).args(["time", "hours", "gcode"])))]
pub struct QuoteArgs {
    /// Print duration, e.g. "2h30", "150min" or "90" (minutes)
    #[arg(short, long)]
    pub time: Option<String>,

    /// Print duration in hours
    #[arg(long)]
    pub hours: Option<f64>,

    /// Filament used, in grams (required with --time or --hours)
    #[arg(short, long)]
    pub grams: Option<f64>,

    /// Read print time and filament usage from a G-code file
    #[arg(long, conflicts_with = "grams")]
    pub gcode: Option<PathBuf>,

    /// Project name recorded in the ledger and share message
    #[arg(short, long, default_value = "")]
    pub project: String,

    /// External link (model page, order) recorded with the quote
    #[arg(short, long, default_value = "")]
    pub link: String,

    /// Profit margin in percent, overriding the configured value
    #[arg(short, long)]
    pub margin: Option<f64>,

    /// Append the quote to the ledger
    #[arg(short, long)]
    pub save: bool,

    /// Print a messaging share link
    #[arg(long)]
    pub share: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LedgerCommands {
    /// List saved quotes
    Show,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration and print the resolved cost model
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_serve() {
        let cli = Cli::try_parse_from(["print-quote"]).unwrap();
        assert!(matches!(cli.get_command(), Commands::Serve));
        assert_eq!(cli.config, PathBuf::from("print-quote.toml"));
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn test_cli_parsing_quote_with_time() {
        let cli = Cli::try_parse_from([
            "print-quote", "quote", "--time", "2h30", "--grams", "40", "--save", "--margin", "35",
        ])
        .unwrap();

        match cli.get_command() {
            Commands::Quote(args) => {
                assert_eq!(args.time.as_deref(), Some("2h30"));
                assert_eq!(args.grams, Some(40.0));
                assert_eq!(args.margin, Some(35.0));
                assert!(args.save);
                assert!(!args.share);
            }
            _ => panic!("Expected Quote command"),
        }
    }

    #[test]
    fn test_cli_quote_requires_a_job_source() {
        assert!(Cli::try_parse_from(["print-quote", "quote", "--grams", "40"]).is_err());
    }

    #[test]
    fn test_cli_quote_sources_are_exclusive() {
        assert!(Cli::try_parse_from(["print-quote", "quote", "--time", "1h", "--hours", "1"]).is_err());
        assert!(Cli::try_parse_from(["print-quote", "quote", "--gcode", "a.gcode", "--grams", "3"]).is_err());
    }

    #[test]
    fn test_cli_parsing_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "print-quote", "ledger", "show", "--config", "other.toml", "--log-format", "json",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(
            cli.get_command(),
            Commands::Ledger { action: LedgerCommands::Show }
        ));
    }
}
