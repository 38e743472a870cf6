use crate::ratings::Ratings;

/// Size of the intersection over the size of the union of the rated item
/// sets. Scores are ignored.
pub fn sim_jaccard(ratings: &Ratings, first: &str, second: &str) -> f64 {
    let first_items = ratings.ratings_for(first);
    let second_items = ratings.ratings_for(second);

    let qty_intersection = first_items
        .keys()
        .filter(|item| second_items.contains_key(*item))
        .count();
    let qty_union = first_items.len() + second_items.len() - qty_intersection;

    if qty_union == 0 {
        return 0.0;
    }

    qty_intersection as f64 / qty_union as f64
}

#[cfg(test)]
mod jaccard_test {
    use super::*;

    #[test]
    fn should_compare_item_sets() {
        let ratings = Ratings::from_triples(vec![
            ("Alice", "Food", 10.0),
            ("Alice", "Transport", 5.0),
            ("Alice", "Rent", 900.0),
            ("Bob", "Food", 1.0),
            ("Bob", "Transport", 1.0),
            ("Bob", "Leisure", 40.0),
        ])
        .unwrap();
        // {Food, Transport} / {Food, Transport, Rent, Leisure}
        assert_eq!(0.5, sim_jaccard(&ratings, "Alice", "Bob"));
    }

    #[test]
    fn should_score_same_items_as_one() {
        let ratings = Ratings::from_triples(vec![
            ("Alice", "Food", 10.0),
            ("Bob", "Food", 9000.0),
        ])
        .unwrap();
        assert_eq!(1.0, sim_jaccard(&ratings, "Alice", "Bob"));
    }
}
