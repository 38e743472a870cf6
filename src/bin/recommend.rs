use std::time::Instant;

use anyhow::Context;
use indicatif::ProgressBar;
use num_format::{Locale, ToFormattedString};
use tracing::{info, warn};

use spendreco::config::{AppConfig, RecommendationMode};
use spendreco::io::read_ratings;
use spendreco::knn::{
    calculate_similar_items_with_progress, get_recommendations, get_recommended_items,
    top_matches, Scored,
};
use spendreco::ledger::LedgerStore;
use spendreco::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let config = AppConfig::new(&config_path)?;
    init_logging(&config.log.level);

    let user = config.user.name.as_str();
    let metric = config.model.metric;
    let mode = config.model.mode;

    let start_time = Instant::now();
    let mut ratings = read_ratings(&config.data.transactions_path).with_context(|| {
        format!(
            "Unable to load transactions from {}",
            &config.data.transactions_path
        )
    })?;

    let store = LedgerStore::open(&config.ledger.path)
        .with_context(|| format!("Unable to open ledger at {}", &config.ledger.path))?;
    match store.get_user_ratings(user)? {
        Some(spend_per_category) => ratings.set_entity(user, spend_per_category)?,
        None => warn!("no spend recorded for '{}' in {}", user, &config.ledger.path),
    }
    info!(
        "loaded ratings: {} micros",
        start_time.elapsed().as_micros()
    );

    println!("Loaded {}", &config.data.transactions_path);
    println!(
        "\tCounterparties: {}",
        ratings.len().to_formatted_string(&Locale::en)
    );
    println!(
        "\tCategories: {}",
        ratings.all_items().len().to_formatted_string(&Locale::en)
    );

    let start_time = Instant::now();
    let (title, ranking): (&str, Vec<Scored>) = match mode {
        RecommendationMode::UserBased => (
            "Recommendations",
            get_recommendations(&ratings, user, &metric),
        ),
        RecommendationMode::ItemBased => {
            let progress = ProgressBar::new(0);
            let similar_items = calculate_similar_items_with_progress(
                &ratings,
                config.model.similar_items,
                &metric,
                &progress,
            );
            (
                "Recommendations",
                get_recommended_items(&ratings, &similar_items, user),
            )
        }
        RecommendationMode::SimilarEntities => (
            "Similar counterparties",
            top_matches(&ratings, user, config.model.top_matches, &metric),
        ),
    };
    info!(
        "{} ranking with {}: {} micros",
        mode,
        metric,
        start_time.elapsed().as_micros()
    );

    if ranking.is_empty() {
        println!("No recommendations available for {}.", user);
        return Ok(());
    }

    println!("{} for {} ({} based, {}):", title, user, mode, metric);
    for scored in ranking.iter().take(config.model.num_recommendations) {
        println!("\t{} -> {:.2}", scored.id, scored.score);
    }

    Ok(())
}
