use crate::pricing::models::{CostBreakdown, CostModel, PrintJob};

/// Price a print job
///
/// Evaluated in a fixed order (printer, filament, energy, total, margin)
/// without any intermediate rounding.
pub fn price(job: &PrintJob, model: &CostModel) -> CostBreakdown {
    let mut breakdown = CostBreakdown {
        printer_cost: job.hours * model.printer_cost_per_hour,
        filament_cost: (job.filament_grams / 1000.0) * model.filament_cost_per_kg,
        energy_cost: job.hours * model.energy_cost_per_hour,
        total_cost: 0.0,
        final_price: 0.0,
    };

    breakdown.calculate_total();
    breakdown.apply_margin(model.profit_margin_percent);

    breakdown
}

/// Round to cents for display and ledger output
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
