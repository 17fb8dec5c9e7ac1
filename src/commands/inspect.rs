use anyhow::{Context, Result};
use colored::Colorize;
use print_quote::gcode;
use std::path::Path;
use tracing::info;

/// Execute the inspect command
pub fn execute(file: &Path) -> Result<()> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("Failed to read G-code file {}", file.display()))?;
    let metadata = gcode::extract_bytes(&bytes);
    info!("Scanned {} bytes from {}", bytes.len(), file.display());

    println!("{}", format!("G-code: {}", file.display()).bold());
    match metadata.hours {
        Some(hours) => println!("  {}: {:.2} h", "Print time".cyan(), hours),
        None => println!("  {}: {}", "Print time".cyan(), "not found".red()),
    }
    match metadata.filament_grams {
        Some(grams) => println!("  {}: {:.2} g", "Filament".cyan(), grams),
        None => println!("  {}: {}", "Filament".cyan(), "not found".red()),
    }

    if !metadata.is_complete() {
        println!();
        println!(
            "{}",
            format!(
                "Could not extract {}; enter the values manually with --time/--hours and --grams",
                metadata.missing_fields().join(" and ")
            )
            .yellow()
        );
    }

    Ok(())
}
