pub mod cli;
pub mod core;
pub mod providers;
pub mod rate_store;
pub mod store;

use crate::core::cache::KeyValueCollection;
use crate::core::config::AppConfig;
use crate::core::{Currency, CurrencyPair, RateSnapshot};
use crate::providers::frankfurter::FrankfurterProvider;
use crate::rate_store::RateStore;
use crate::store::{KeyValueStore, memory::MemoryCollection};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name of the collection holding the persisted rate snapshot.
pub const RATES_COLLECTION: &str = "rates";

pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<Currency>,
        to: Option<Currency>,
        reverse: bool,
    },
    Rates,
    Refresh,
    Currencies,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxc starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Currencies => {
            println!("{}", cli::rates::currencies_table());
        }
        AppCommand::Convert {
            amount,
            from,
            to,
            reverse,
        } => {
            let rate_store = build_rate_store(&config)?;
            let pair = CurrencyPair::new(
                from.unwrap_or(config.default_pair.from),
                to.unwrap_or(config.default_pair.to),
            );
            let rates = load_rates(&rate_store).await?;
            let output = cli::convert::render_conversion(&amount, pair, reverse, &rates)?;
            println!("{output}");
        }
        AppCommand::Rates => {
            let rate_store = build_rate_store(&config)?;
            let rates = load_rates(&rate_store).await?;
            println!("{}", cli::rates::rates_table(&rates));
        }
        AppCommand::Refresh => {
            let rate_store = build_rate_store(&config)?;
            let spinner = cli::ui::new_spinner("Refreshing conversion rates...");
            let result = rate_store.refresh().await;
            spinner.finish_and_clear();
            let rates = result.context("Failed to refresh rates")?;
            println!(
                "Fetched rates as of {} (base {}, {} currencies)",
                rates.date(),
                rates.base(),
                rates.rates().len() + 1
            );
        }
    }
    Ok(())
}

/// Wires the configured provider to the persisted snapshot collection.
pub fn build_rate_store(config: &AppConfig) -> Result<RateStore<FrankfurterProvider>> {
    let provider_config = &config.providers.frankfurter;
    let provider = FrankfurterProvider::new(&provider_config.base_url)?
        .with_retry_policy(provider_config.retries, provider_config.retry_delay_ms);

    let store = KeyValueStore::open(&config.default_data_path()?);
    let collection: Arc<dyn KeyValueCollection> = match store.collection(RATES_COLLECTION) {
        Some(collection) => collection,
        None => {
            warn!("Persistent cache unavailable, rates will not be kept between runs");
            Arc::new(MemoryCollection::new())
        }
    };

    Ok(RateStore::new(provider, collection))
}

async fn load_rates(rate_store: &RateStore<FrankfurterProvider>) -> Result<Arc<RateSnapshot>> {
    let spinner = cli::ui::new_spinner("Loading conversion rates...");
    let result = rate_store.get_rates().await;
    spinner.finish_and_clear();
    result.context("Failed to load conversion rates")
}
