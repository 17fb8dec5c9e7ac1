use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use print_quote::{config, ledger::{Ledger, LedgerRow, LEDGER_HEADER}};
use std::path::Path;
use tracing::info;

/// Execute the ledger show command
pub fn show(config_path: &Path) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let ledger = Ledger::new(cfg.ledger.path.clone());
    let rows = ledger.read_all()?;
    info!("Read {} ledger rows from {}", rows.len(), ledger.path().display());

    if rows.is_empty() {
        println!("{}", format!("No quotes saved in {}", ledger.path().display()).yellow());
        return Ok(());
    }

    println!("{}", build_table(&rows));

    let revenue: f64 = rows.iter().map(|r| r.final_price).sum();
    println!();
    println!(
        "{} quotes, {} {:.2} total",
        rows.len(),
        cfg.share.currency,
        revenue
    );

    Ok(())
}

fn build_table(rows: &[LedgerRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        LEDGER_HEADER
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );

    for row in rows {
        let number = |v: f64| Cell::new(format!("{:.2}", v)).set_alignment(CellAlignment::Right);
        table.add_row(vec![
            Cell::new(&row.project_name),
            number(row.hours),
            number(row.filament_grams),
            number(row.printer_cost),
            number(row.filament_cost),
            number(row.energy_cost),
            number(row.final_price).fg(Color::Green),
            Cell::new(&row.link),
        ]);
    }

    table
}
