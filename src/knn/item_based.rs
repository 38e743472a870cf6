use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use hashbrown::HashMap;
use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::knn::{normalized_ranking, top_matches, Scored, SimilarItems};
use crate::ratings::{transform_prefs, Ratings};
use crate::similarity::Similarity;

const PROGRESS_LOG_INTERVAL: usize = 100;

/// Builds the item similarity index: for every item, its `n` most similar
/// other items according to `similarity` applied to the item-centric table.
pub fn calculate_similar_items<S: Similarity + Sync + ?Sized>(
    ratings: &Ratings,
    n: usize,
    similarity: &S,
) -> SimilarItems {
    calculate_similar_items_with_progress(ratings, n, similarity, &ProgressBar::hidden())
}

/// Same as [`calculate_similar_items`], advancing `progress` once per item.
pub fn calculate_similar_items_with_progress<S: Similarity + Sync + ?Sized>(
    ratings: &Ratings,
    n: usize,
    similarity: &S,
    progress: &ProgressBar,
) -> SimilarItems {
    let start_time = Instant::now();
    let item_prefs = transform_prefs(ratings);
    let items: Vec<&str> = item_prefs.entities().collect();
    let qty_items = items.len();
    progress.set_length(qty_items as u64);

    let qty_done = AtomicUsize::new(0);
    let similar_items: SimilarItems = items
        .par_iter()
        .map(|item| {
            let scores = top_matches(&item_prefs, item, n, similarity);
            progress.inc(1);
            let done = qty_done.fetch_add(1, Ordering::Relaxed) + 1;
            if done % PROGRESS_LOG_INTERVAL == 0 {
                debug!("{} / {}", done, qty_items);
            }
            (item.to_string(), scores)
        })
        .collect();
    progress.finish_and_clear();

    info!(
        "indexed {} items: {} micros",
        qty_items,
        start_time.elapsed().as_micros()
    );
    similar_items
}

/// Predicts scores for the items `target` has not rated from a prebuilt item
/// similarity index, weighting each similar item by the target's own rating of
/// the item it was found through.
pub fn get_recommended_items(
    ratings: &Ratings,
    similar_items: &SimilarItems,
    target: &str,
) -> Vec<Scored> {
    let target_ratings = ratings.ratings_for(target);

    let mut scores: HashMap<&str, f64> = HashMap::new();
    let mut total_sims: HashMap<&str, f64> = HashMap::new();

    for (item, rating) in target_ratings.iter() {
        let neighbors = match similar_items.get(item) {
            Some(neighbors) => neighbors,
            None => continue,
        };
        for neighbor in neighbors.iter() {
            if target_ratings.contains_key(&neighbor.id) {
                continue;
            }
            *scores.entry(neighbor.id.as_str()).or_insert(0.0) += neighbor.score * rating;
            *total_sims.entry(neighbor.id.as_str()).or_insert(0.0) += neighbor.score;
        }
    }

    normalized_ranking(scores, &|item: &str| {
        total_sims.get(item).copied().unwrap_or_default()
    })
}
