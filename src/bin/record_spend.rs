use anyhow::{bail, Context};
use tracing::{info, warn};

use spendreco::config::AppConfig;
use spendreco::io::read_ratings;
use spendreco::ledger::LedgerStore;
use spendreco::logging::init_logging;
use spendreco::RecoError;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let (config_path, category, raw_amount) = match (args.next(), args.next(), args.next()) {
        (Some(config_path), Some(category), Some(raw_amount)) => (config_path, category, raw_amount),
        _ => bail!("Usage: record_spend <config> <category> <amount>"),
    };

    let config = AppConfig::new(&config_path)?;
    init_logging(&config.log.level);
    let user = config.user.name.as_str();

    let amount: f64 = raw_amount
        .trim()
        .parse()
        .map_err(|_| RecoError::InvalidAmount(raw_amount.clone()))?;

    // Categories normally come from the transaction export
    match read_ratings(&config.data.transactions_path) {
        Ok(ratings) => {
            if !ratings.all_items().contains(category.as_str()) {
                warn!(
                    "'{}' does not appear in {}",
                    category, &config.data.transactions_path
                );
            }
        }
        Err(e) => warn!("unable to check category against transactions: {}", e),
    }

    let store = LedgerStore::open(&config.ledger.path)
        .with_context(|| format!("Unable to open ledger at {}", &config.ledger.path))?;
    let spend_per_category = store.record_spend(user, &category, amount)?;
    info!("recorded {} for '{}' / '{}'", amount, user, category);

    println!("Spend of {}:", user);
    for (category, amount) in spend_per_category.iter() {
        println!("\t{}: {}", category, amount);
    }

    Ok(())
}
