use hashbrown::HashMap;
use tracing::debug;

use crate::knn::{normalized_ranking, Scored};
use crate::ratings::Ratings;
use crate::similarity::Similarity;

/// Predicts scores for the items `target` has not rated yet, as the
/// similarity-weighted average of what the other entities gave them.
///
/// Only entities with a positive similarity to `target` take part, which also
/// leaves out undefined (NaN) similarities. An item the
/// target rated with exactly zero counts as not rated. An empty result means
/// there is nothing to recommend.
pub fn get_recommendations<S: Similarity + ?Sized>(
    ratings: &Ratings,
    target: &str,
    similarity: &S,
) -> Vec<Scored> {
    let target_ratings = ratings.ratings_for(target);

    let mut totals: HashMap<&str, f64> = HashMap::new();
    let mut sim_sums: HashMap<&str, f64> = HashMap::new();
    let mut qty_neighbors = 0_usize;

    for (other, other_ratings) in ratings.iter() {
        if other == target {
            continue;
        }
        let sim = similarity.similarity(ratings, target, other);
        if sim.is_nan() || sim <= 0.0 {
            continue;
        }
        qty_neighbors += 1;

        for (item, score) in other_ratings.iter() {
            let already_rated = matches!(target_ratings.get(item), Some(own) if *own != 0.0);
            if already_rated {
                continue;
            }
            *totals.entry(item.as_str()).or_insert(0.0) += score * sim;
            *sim_sums.entry(item.as_str()).or_insert(0.0) += sim;
        }
    }

    debug!(
        "{} positively similar neighbors for '{}', {} candidate items",
        qty_neighbors,
        target,
        totals.len()
    );

    normalized_ranking(totals, &|item: &str| {
        sim_sums.get(item).copied().unwrap_or_default()
    })
}
