use anyhow::{Context, Result};
use colored::Colorize;
use print_quote::{
    config,
    error::AppError,
    ledger::Ledger,
    quote::{JobInput, LedgerStatus, Quote, QuoteRequest, QuoteService, ShareStatus},
};
use std::path::Path;

use crate::cli::QuoteArgs;

/// Execute the quote command
pub fn execute(config_path: &Path, args: QuoteArgs) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let service = QuoteService::new(
        cfg.pricing.cost_model()?,
        Ledger::new(cfg.ledger.path.clone()),
        cfg.share.clone(),
    );

    let request = QuoteRequest {
        project_name: args.project.clone(),
        link: args.link.clone(),
        input: job_input(&args)?,
        profit_margin_percent: args.margin,
        save: args.save,
        share: args.share,
    };

    let quote = match service.quote(&request) {
        Ok(quote) => quote,
        Err(AppError::InvalidDuration(e)) => anyhow::bail!("{} ({})", e.user_message(), e),
        Err(e) => return Err(e.into()),
    };

    print_result(&quote, &cfg.share.currency);

    match &quote.ledger {
        LedgerStatus::NotRequested => {}
        LedgerStatus::Saved => println!(
            "{}",
            format!("✓ Saved to {}", service.ledger().path().display()).green()
        ),
        LedgerStatus::Failed(message) => {
            eprintln!("{}", format!("✗ Could not save the quote: {}", message).red())
        }
    }

    match &quote.share {
        ShareStatus::NotRequested => {}
        ShareStatus::Created(link) => {
            println!();
            println!("{}", "Share link:".bold());
            println!("  {}", link);
        }
        ShareStatus::Failed(message) => {
            eprintln!("{}", format!("✗ Could not build the share link: {}", message).red())
        }
    }

    Ok(())
}

/// Pick the job source from the mutually exclusive flags
fn job_input(args: &QuoteArgs) -> Result<JobInput> {
    if let Some(path) = &args.gcode {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read G-code file {}", path.display()))?;
        return Ok(JobInput::GCode {
            gcode: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    let filament_grams = args
        .grams
        .context("--grams is required unless --gcode is given")?;

    match (&args.time, args.hours) {
        (Some(duration), _) => Ok(JobInput::Duration {
            duration: duration.clone(),
            filament_grams,
        }),
        (None, Some(hours)) => Ok(JobInput::Manual { hours, filament_grams }),
        (None, None) => anyhow::bail!("One of --time, --hours or --gcode is required"),
    }
}

fn print_result(quote: &Quote, currency: &str) {
    let b = &quote.breakdown;

    println!("{}", "Result".green().bold());
    if !quote.project_name.is_empty() {
        println!("  {}: {}", "Project".cyan(), quote.project_name);
    }
    println!("  {}: {:.2} h", "Print time".cyan(), quote.job.hours);
    println!("  {}: {:.2} g", "Filament".cyan(), quote.job.filament_grams);
    println!();
    println!("  {}: {} {:.2}", "Printer cost".cyan(), currency, b.printer_cost);
    println!("  {}: {} {:.2}", "Filament cost".cyan(), currency, b.filament_cost);
    println!("  {}: {} {:.2}", "Energy cost".cyan(), currency, b.energy_cost);
    println!("  {}: {} {:.2}", "Total cost".cyan(), currency, b.total_cost);
    println!(
        "  {}: {} {}  ({}% margin)",
        "Final price".cyan().bold(),
        currency,
        format!("{:.2}", b.final_price).green().bold(),
        quote.cost_model.profit_margin_percent
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> QuoteArgs {
        QuoteArgs {
            time: None,
            hours: None,
            grams: None,
            gcode: None,
            project: String::new(),
            link: String::new(),
            margin: None,
            save: false,
            share: false,
        }
    }

    #[test]
    fn test_job_input_from_time() {
        let mut a = args();
        a.time = Some("2h30".to_string());
        a.grams = Some(40.0);
        assert_eq!(
            job_input(&a).unwrap(),
            JobInput::Duration { duration: "2h30".to_string(), filament_grams: 40.0 }
        );
    }

    #[test]
    fn test_job_input_from_hours() {
        let mut a = args();
        a.hours = Some(1.5);
        a.grams = Some(12.0);
        assert_eq!(
            job_input(&a).unwrap(),
            JobInput::Manual { hours: 1.5, filament_grams: 12.0 }
        );
    }

    #[test]
    fn test_job_input_requires_grams() {
        let mut a = args();
        a.time = Some("2h".to_string());
        assert!(job_input(&a).unwrap_err().to_string().contains("--grams"));
    }

    #[test]
    fn test_job_input_from_gcode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("part.gcode");
        std::fs::write(&path, ";TIME_ELAPSED:3600\n;Filament used: 1m\n").unwrap();

        let mut a = args();
        a.gcode = Some(path);
        match job_input(&a).unwrap() {
            JobInput::GCode { gcode } => assert!(gcode.contains(";TIME_ELAPSED:3600")),
            other => panic!("Expected GCode input, got {:?}", other),
        }
    }

    #[test]
    fn test_job_input_missing_gcode_file() {
        let mut a = args();
        a.gcode = Some(PathBuf::from("/nonexistent/part.gcode"));
        assert!(job_input(&a).is_err());
    }
}
