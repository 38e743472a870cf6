use crate::ratings::Ratings;
use crate::similarity::shared_scores;

/// Cosine of the angle between the two score vectors, restricted to shared items.
pub fn sim_cosine(ratings: &Ratings, first: &str, second: &str) -> f64 {
    let mut dot_product = 0_f64;
    let mut norm_sq_first = 0_f64;
    let mut norm_sq_second = 0_f64;
    for (a, b) in shared_scores(ratings.ratings_for(first), ratings.ratings_for(second)) {
        dot_product += a * b;
        norm_sq_first += a * a;
        norm_sq_second += b * b;
    }

    let norms = norm_sq_first.sqrt() * norm_sq_second.sqrt();
    if norms == 0.0 {
        // nothing shared, or only zero scores
        return 0.0;
    }

    dot_product / norms
}
