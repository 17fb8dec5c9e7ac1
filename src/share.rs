use serde::{Deserialize, Serialize};

use crate::config::ShareConfig;
use crate::error::AppError;

/// Fields included in an outbound quote message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareSummary {
    pub project_name: String,
    pub link: String,
    pub hours: f64,
    pub filament_grams: f64,
    pub final_price: f64,
}

/// Human-readable quote summary
pub fn format_summary(summary: &ShareSummary, currency: &str) -> String {
    let mut lines = Vec::with_capacity(5);
    if !summary.project_name.is_empty() {
        lines.push(format!("Projeto: {}", summary.project_name));
    }
    lines.push(format!("Tempo de impressão: {:.2} h", summary.hours));
    lines.push(format!("Filamento: {:.2} g", summary.filament_grams));
    lines.push(format!("Preço final: {} {:.2}", currency, summary.final_price));
    if !summary.link.is_empty() {
        lines.push(format!("Link: {}", summary.link));
    }
    lines.join("\n")
}

/// Messaging deep link: `<base_url>/<recipient>?text=<summary>`
pub fn share_link(config: &ShareConfig, summary: &ShareSummary) -> Result<String, AppError> {
    let mut url = url::Url::parse(&config.base_url)
        .map_err(|e| AppError::ConfigError(format!("Invalid share base URL: {}", e)))?;

    if let Some(recipient) = config.recipient.as_deref().filter(|r| !r.is_empty()) {
        url.path_segments_mut()
            .map_err(|_| {
                AppError::ConfigError(format!("Share base URL cannot have a path: {}", config.base_url))
            })?
            .pop_if_empty()
            .push(recipient);
    }

    url.query_pairs_mut()
        .append_pair("text", &format_summary(summary, &config.currency));

    // Form encoding writes spaces as `+` and a literal plus as `%2B`
    let query = url.query().map(|q| q.replace('+', "%20"));
    url.set_query(query.as_deref());

    Ok(url.to_string())
}
