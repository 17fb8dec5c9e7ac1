use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::pricing::CostModel;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(flatten)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub share: ShareConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShareConfig {
    #[serde(default = "default_share_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Flat cost keys, read from the file's top level or the environment
/// (`FILAMENT_PRICE_PER_KG`, `PRICE_PER_KWH`, ...)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PricingConfig {
    pub filament_price_per_kg: Option<f64>,
    pub printer_cost_per_hour: Option<f64>,
    pub energy_cost_per_hour: Option<f64>,
    pub price_per_kwh: Option<f64>,
    pub printer_power_w: Option<f64>,
    pub profit_margin_percent: Option<f64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("quotes.csv")
}

fn default_share_base_url() -> String {
    "https://wa.me".to_string()
}

fn default_currency() -> String {
    "R$".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_share_base_url(),
            recipient: None,
            currency: default_currency(),
        }
    }
}

impl PricingConfig {
    /// Resolve the cost model, failing on any missing or negative key
    ///
    /// Energy cost comes from `ENERGY_COST_PER_HOUR` when set, otherwise from
    /// `PRINTER_POWER_W / 1000 * PRICE_PER_KWH`.
    pub fn cost_model(&self) -> anyhow::Result<CostModel> {
        let filament_cost_per_kg = require("FILAMENT_PRICE_PER_KG", self.filament_price_per_kg)?;
        let printer_cost_per_hour = require("PRINTER_COST_PER_HOUR", self.printer_cost_per_hour)?;
        let profit_margin_percent = require("PROFIT_MARGIN_PERCENT", self.profit_margin_percent)?;

        let energy_cost_per_hour = match (self.energy_cost_per_hour, self.price_per_kwh, self.printer_power_w) {
            (Some(per_hour), _, _) => require("ENERGY_COST_PER_HOUR", Some(per_hour))?,
            (None, Some(_), None) => {
                anyhow::bail!("PRICE_PER_KWH is set but PRINTER_POWER_W is missing")
            }
            (None, price_per_kwh, printer_power_w) => {
                let price_per_kwh = require("ENERGY_COST_PER_HOUR or PRICE_PER_KWH", price_per_kwh)?;
                let printer_power_w = require("PRINTER_POWER_W", printer_power_w)?;
                printer_power_w / 1000.0 * price_per_kwh
            }
        };

        Ok(CostModel {
            printer_cost_per_hour,
            filament_cost_per_kg,
            energy_cost_per_hour,
            profit_margin_percent,
        })
    }
}

/// Cost keys accepted from the unprefixed environment
pub const PRICING_ENV_KEYS: [&str; 6] = [
    "FILAMENT_PRICE_PER_KG",
    "PRINTER_COST_PER_HOUR",
    "ENERGY_COST_PER_HOUR",
    "PRICE_PER_KWH",
    "PRINTER_POWER_W",
    "PROFIT_MARGIN_PERCENT",
];

/// Environment source holding only the flat cost keys found in `vars`
pub fn pricing_env<I>(vars: I) -> config::Environment
where
    I: IntoIterator<Item = (String, String)>,
{
    let map: HashMap<String, String> = vars
        .into_iter()
        .filter(|(key, _)| PRICING_ENV_KEYS.contains(&key.as_str()))
        .collect();
    config::Environment::default().source(Some(map)).try_parsing(true)
}

fn require(key: &str, value: Option<f64>) -> anyhow::Result<f64> {
    match value {
        None => anyhow::bail!("Missing required configuration key {}", key),
        Some(v) if !v.is_finite() || v < 0.0 => {
            anyhow::bail!("Configuration key {} must be a non-negative number, got {}", key, v)
        }
        Some(v) => Ok(v),
    }
}

/// Load configuration from an optional TOML file and the environment
///
/// Later sources win:
/// 1. the file at `path` (skipped when it does not exist)
/// 2. flat cost keys from the environment (`FILAMENT_PRICE_PER_KG`, ...)
/// 3. `PRINT_QUOTE__SECTION__KEY` overrides (e.g. `PRINT_QUOTE__SERVER__PORT`)
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Toml).required(false))
        .add_source(pricing_env(
            std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        ))
        .add_source(
            config::Environment::with_prefix("PRINT_QUOTE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    build_config(builder)
}

/// Deserialize and validate, so missing cost keys fail at startup
pub fn build_config(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<Config> {
    let cfg: Config = builder.build()?.try_deserialize()?;
    validate_config(&cfg)?;
    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    cfg.pricing.cost_model()?;

    if cfg.ledger.path.as_os_str().is_empty() {
        anyhow::bail!("Ledger path cannot be empty");
    }

    let base_url = url::Url::parse(&cfg.share.base_url)
        .map_err(|e| anyhow::anyhow!("Invalid share base URL '{}': {}", cfg.share.base_url, e))?;
    if base_url.cannot_be_a_base() {
        anyhow::bail!("Share base URL '{}' cannot carry a recipient path", cfg.share.base_url);
    }

    Ok(())
}
