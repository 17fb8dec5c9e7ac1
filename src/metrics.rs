use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder
///
/// Fails if a global recorder is already installed.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!("print_quote_quotes_total", "Total number of calculated quotes");
    describe_counter!("print_quote_errors_total", "Total number of rejected quote requests");
    describe_counter!("print_quote_ledger_writes_total", "Ledger append attempts by outcome");
    describe_histogram!("print_quote_final_price", "Final price of calculated quotes");
    describe_gauge!("print_quote_info", "Service version information");

    gauge!("print_quote_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a calculated quote
pub fn record_quote(source: &str, final_price: f64) {
    counter!("print_quote_quotes_total", "source" => source.to_string()).increment(1);
    histogram!("print_quote_final_price", "source" => source.to_string()).record(final_price);
}

/// Record a rejected request
pub fn record_error(source: &str, error_type: &str) {
    counter!(
        "print_quote_errors_total",
        "source" => source.to_string(),
        "error_type" => error_type.to_string(),
    )
    .increment(1);
}

/// Record a ledger append
pub fn record_ledger_write(success: bool) {
    let status = if success { "saved" } else { "failed" };
    counter!("print_quote_ledger_writes_total", "status" => status).increment(1);
}
