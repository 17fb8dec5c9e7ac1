use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Rates used to price a print job
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    /// Amortized machine cost per printing hour
    pub printer_cost_per_hour: f64,
    pub filament_cost_per_kg: f64,
    pub energy_cost_per_hour: f64,
    /// Markup applied on top of the total cost, in percent
    pub profit_margin_percent: f64,
}

impl CostModel {
    /// Copy of this model with a different profit margin
    pub fn with_margin(self, profit_margin_percent: f64) -> Self {
        Self {
            profit_margin_percent,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let rates = [
            ("printer_cost_per_hour", self.printer_cost_per_hour),
            ("filament_cost_per_kg", self.filament_cost_per_kg),
            ("energy_cost_per_hour", self.energy_cost_per_hour),
            ("profit_margin_percent", self.profit_margin_percent),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Inputs of one calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintJob {
    pub hours: f64,
    pub filament_grams: f64,
}

impl PrintJob {
    pub fn new(hours: f64, filament_grams: f64) -> Result<Self, AppError> {
        let job = Self { hours, filament_grams };
        job.validate()?;
        Ok(job)
    }

    /// Pricing is only defined for finite, non-negative inputs
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.hours.is_finite() || self.hours < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "print time must be a non-negative number of hours, got {}",
                self.hours
            )));
        }
        if !self.filament_grams.is_finite() || self.filament_grams < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "filament must be a non-negative number of grams, got {}",
                self.filament_grams
            )));
        }
        Ok(())
    }
}

/// Itemized cost of a print job
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub printer_cost: f64,
    pub filament_cost: f64,
    pub energy_cost: f64,
    pub total_cost: f64,
    pub final_price: f64,
}

impl CostBreakdown {
    /// Calculate total cost from components
    pub fn calculate_total(&mut self) {
        self.total_cost = self.printer_cost + self.filament_cost + self.energy_cost;
    }

    /// Apply a percentage markup to the total
    pub fn apply_margin(&mut self, profit_margin_percent: f64) {
        self.final_price = self.total_cost * (1.0 + profit_margin_percent / 100.0);
    }
}
