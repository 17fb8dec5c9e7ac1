pub mod gcode;
pub mod health;
pub mod ledger;
pub mod metrics_handler;
pub mod quote;

use std::sync::Arc;

use crate::quote::QuoteService;

/// Shared state for the quote API
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QuoteService>,
}
