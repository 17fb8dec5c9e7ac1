pub mod calculator;
pub mod models;

pub use calculator::{price, round_currency};
pub use models::{CostBreakdown, CostModel, PrintJob};
