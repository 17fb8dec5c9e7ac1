use anyhow::Result;
use colored::Colorize;
use print_quote::config::{self, Config};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the merged configuration (file + environment)
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&cfg)?;
    println!("{}", toml_string);

    info!("Configuration displayed successfully");
    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration from {}", config_path.display());

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    print_summary(&cfg)?;

    info!("Configuration validation successful");
    Ok(())
}

fn print_summary(cfg: &Config) -> Result<()> {
    let model = cfg.pricing.cost_model()?;
    let currency = &cfg.share.currency;

    println!("{}", "Cost Model:".bold());
    println!("  {}: {} {:.2}/h", "Printer".cyan(), currency, model.printer_cost_per_hour);
    println!("  {}: {} {:.2}/kg", "Filament".cyan(), currency, model.filament_cost_per_kg);
    println!(
        "  {}: {} {:.4}/h ({})",
        "Energy".cyan(),
        currency,
        model.energy_cost_per_hour,
        energy_source(cfg)
    );
    println!("  {}: {}%", "Profit margin".cyan(), model.profit_margin_percent);
    println!();
    println!("  {}: {}:{}", "Server".cyan(), cfg.server.host, cfg.server.port);
    println!("  {}: {}", "Ledger".cyan(), cfg.ledger.path.display());
    println!(
        "  {}: {}{}",
        "Share".cyan(),
        cfg.share.base_url,
        cfg.share
            .recipient
            .as_deref()
            .map(|r| format!("/{}", r))
            .unwrap_or_default()
    );
    Ok(())
}

/// Describe which keys produced the energy rate
fn energy_source(cfg: &Config) -> &'static str {
    if cfg.pricing.energy_cost_per_hour.is_some() {
        "ENERGY_COST_PER_HOUR"
    } else {
        "PRINTER_POWER_W × PRICE_PER_KWH"
    }
}
