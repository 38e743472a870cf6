use crate::ratings::Ratings;
use crate::similarity::shared_scores;

/// Euclidean-distance based similarity, `1 / (1 + sqrt(sum of squared differences))`
/// over the shared items. Returns 0 when nothing is shared.
pub fn sim_distance(ratings: &Ratings, first: &str, second: &str) -> f64 {
    let mut qty_shared = 0_usize;
    let mut sum_of_squares = 0_f64;
    for (score, other) in shared_scores(ratings.ratings_for(first), ratings.ratings_for(second)) {
        qty_shared += 1;
        sum_of_squares += (score - other).powi(2);
    }

    if qty_shared == 0 {
        return 0.0;
    }

    1.0 / (1.0 + sum_of_squares.sqrt())
}
