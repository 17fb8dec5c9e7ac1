use axum::{extract::State, Json};

use crate::error::AppError;
use crate::handlers::AppState;
use crate::ledger::LedgerRow;

/// Handle /v1/ledger endpoint
/// Returns every saved quote in file order
pub async fn list_ledger(State(state): State<AppState>) -> Result<Json<Vec<LedgerRow>>, AppError> {
    let rows = state.service.ledger().read_all()?;
    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShareConfig;
    use crate::ledger::Ledger;
    use crate::pricing::CostModel;
    use crate::quote::QuoteService;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let model = CostModel {
            printer_cost_per_hour: 1.0,
            filament_cost_per_kg: 1.0,
            energy_cost_per_hour: 1.0,
            profit_margin_percent: 0.0,
        };
        let state = AppState {
            service: Arc::new(QuoteService::new(
                model,
                Ledger::new(dir.path().join("quotes.csv")),
                ShareConfig::default(),
            )),
        };

        let Json(rows) = list_ledger(State(state)).await.unwrap();
        assert!(rows.is_empty());
    }
}
