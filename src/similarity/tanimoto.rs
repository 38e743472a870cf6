use crate::ratings::Ratings;

/// Binary Tanimoto coefficient.
///
/// Both entities become 0/1 presence vectors over every item known to the
/// whole table, and the result is `p / (s1 + s2 - p)` with `p` the dot product
/// and `s1`, `s2` the squared norms. Walking all items makes each call cost
/// O(distinct items in the table), which adds up inside all-pairs loops such
/// as the item index build.
pub fn sim_tanimoto(ratings: &Ratings, first: &str, second: &str) -> f64 {
    let first_items = ratings.ratings_for(first);
    let second_items = ratings.ratings_for(second);

    let mut p_sum = 0_u64;
    let mut sum_sq_first = 0_u64;
    let mut sum_sq_second = 0_u64;
    for item in ratings.all_items() {
        let a = first_items.contains_key(item) as u64;
        let b = second_items.contains_key(item) as u64;
        p_sum += a * b;
        sum_sq_first += a * a;
        sum_sq_second += b * b;
    }

    let denominator = sum_sq_first + sum_sq_second - p_sum;
    if denominator == 0 {
        return 0.0;
    }

    p_sum as f64 / denominator as f64
}
