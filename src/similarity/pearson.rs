use crate::ratings::Ratings;
use crate::similarity::shared_scores;

/// Pearson correlation coefficient of the two entities, restricted to the
/// items both of them rated.
///
/// Returns 0 when nothing is shared or when either side has no variance over
/// the shared items.
pub fn sim_pearson(ratings: &Ratings, first: &str, second: &str) -> f64 {
    let mut n = 0_f64;
    let mut sum_first = 0_f64;
    let mut sum_second = 0_f64;
    let mut sum_sq_first = 0_f64;
    let mut sum_sq_second = 0_f64;
    let mut sum_products = 0_f64;

    for (a, b) in shared_scores(ratings.ratings_for(first), ratings.ratings_for(second)) {
        n += 1.0;
        sum_first += a;
        sum_second += b;
        sum_sq_first += a * a;
        sum_sq_second += b * b;
        sum_products += a * b;
    }

    if n == 0.0 {
        return 0.0;
    }

    let numerator = sum_products - (sum_first * sum_second / n);
    let variance_product = (sum_sq_first - sum_first.powi(2) / n)
        * (sum_sq_second - sum_second.powi(2) / n);
    // rounding can push a zero variance slightly below zero
    if variance_product <= 0.0 {
        return 0.0;
    }

    numerator / variance_product.sqrt()
}
