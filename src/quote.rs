//! Quote workflow: resolve a print job, price it, then hand the result to
//! the ledger and share-link sinks.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ShareConfig;
use crate::duration::parse_duration;
use crate::error::AppError;
use crate::gcode;
use crate::ledger::{Ledger, LedgerRow};
use crate::metrics;
use crate::pricing::{self, CostBreakdown, CostModel, PrintJob};
use crate::share::{self, ShareSummary};

/// Where the print time and filament mass come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum JobInput {
    /// Numbers typed directly
    Manual { hours: f64, filament_grams: f64 },
    /// Free-text duration such as `2h30`
    Duration { duration: String, filament_grams: f64 },
    /// Contents of a sliced `.gcode` file
    #[serde(rename = "gcode")]
    GCode { gcode: String },
}

impl JobInput {
    pub fn source_name(&self) -> &'static str {
        match self {
            Self::Manual { .. } => "manual",
            Self::Duration { .. } => "duration",
            Self::GCode { .. } => "gcode",
        }
    }

    /// Turn the raw input into a validated job
    pub fn resolve(&self) -> Result<PrintJob, AppError> {
        let job = match self {
            Self::Manual { hours, filament_grams } => PrintJob {
                hours: *hours,
                filament_grams: *filament_grams,
            },
            Self::Duration { duration, filament_grams } => PrintJob {
                hours: parse_duration(duration)?,
                filament_grams: *filament_grams,
            },
            Self::GCode { gcode } => gcode::extract(gcode).to_print_job()?,
        };
        job.validate()?;
        Ok(job)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub link: String,
    pub input: JobInput,
    /// Overrides the configured margin for this quote only
    #[serde(default)]
    pub profit_margin_percent: Option<f64>,
    /// Append the result to the ledger
    #[serde(default)]
    pub save: bool,
    /// Build a messaging share link
    #[serde(default)]
    pub share: bool,
}

/// Outcome of the optional ledger append
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum LedgerStatus {
    NotRequested,
    Saved,
    Failed(String),
}

/// Outcome of the optional share link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ShareStatus {
    NotRequested,
    Created(String),
    Failed(String),
}

impl ShareStatus {
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Created(link) => Some(link),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub project_name: String,
    pub job: PrintJob,
    pub cost_model: CostModel,
    pub breakdown: CostBreakdown,
    pub ledger: LedgerStatus,
    pub share: ShareStatus,
}

impl Quote {
    pub fn ledger_row(&self, link: &str) -> LedgerRow {
        LedgerRow {
            project_name: self.project_name.clone(),
            hours: self.job.hours,
            filament_grams: self.job.filament_grams,
            printer_cost: self.breakdown.printer_cost,
            filament_cost: self.breakdown.filament_cost,
            energy_cost: self.breakdown.energy_cost,
            final_price: self.breakdown.final_price,
            link: link.to_string(),
        }
    }
}

/// Prices jobs against a fixed cost model and feeds the sinks
#[derive(Debug)]
pub struct QuoteService {
    cost_model: CostModel,
    ledger: Ledger,
    share: ShareConfig,
}

impl QuoteService {
    pub fn new(cost_model: CostModel, ledger: Ledger, share: ShareConfig) -> Self {
        Self {
            cost_model,
            ledger,
            share,
        }
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Price a request
    ///
    /// Ledger and share-link failures are reported in [`Quote::ledger`] and
    /// [`Quote::share`] and never turn a successful calculation into an error.
    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote, AppError> {
        let source = request.input.source_name();

        let result = self.calculate(request);
        let mut quote = match result {
            Ok(quote) => quote,
            Err(e) => {
                metrics::record_error(source, crate::error::error_type_name(&e));
                return Err(e);
            }
        };

        metrics::record_quote(source, quote.breakdown.final_price);
        info!(
            source,
            project = %quote.project_name,
            hours = quote.job.hours,
            filament_grams = quote.job.filament_grams,
            final_price = quote.breakdown.final_price,
            "Quote calculated"
        );

        if request.save {
            quote.ledger = match self.ledger.append(&quote.ledger_row(&request.link)) {
                Ok(()) => {
                    metrics::record_ledger_write(true);
                    LedgerStatus::Saved
                }
                Err(e) => {
                    metrics::record_ledger_write(false);
                    warn!("Failed to save quote to {}: {}", self.ledger.path().display(), e);
                    LedgerStatus::Failed(e.to_string())
                }
            };
        }

        if request.share {
            let summary = ShareSummary {
                project_name: request.project_name.clone(),
                link: request.link.clone(),
                hours: quote.job.hours,
                filament_grams: quote.job.filament_grams,
                final_price: quote.breakdown.final_price,
            };
            quote.share = match share::share_link(&self.share, &summary) {
                Ok(link) => ShareStatus::Created(link),
                Err(e) => {
                    warn!("Failed to build share link: {}", e);
                    ShareStatus::Failed(e.to_string())
                }
            };
        }

        Ok(quote)
    }

    fn calculate(&self, request: &QuoteRequest) -> Result<Quote, AppError> {
        let job = request.input.resolve()?;

        let cost_model = match request.profit_margin_percent {
            Some(margin) => self.cost_model.with_margin(margin),
            None => self.cost_model,
        };
        cost_model.validate()?;

        Ok(Quote {
            project_name: request.project_name.clone(),
            job,
            cost_model,
            breakdown: pricing::price(&job, &cost_model),
            ledger: LedgerStatus::NotRequested,
            share: ShareStatus::NotRequested,
        })
    }
}
