use std::cmp::Ordering;
use std::collections::BTreeMap;

use dary_heap::OctonaryHeap;
use itertools::Itertools;

use crate::ratings::Ratings;
use crate::similarity::{Metric, Similarity};

pub mod item_based;
pub mod user_based;

pub use item_based::{calculate_similar_items, calculate_similar_items_with_progress, get_recommended_items};
pub use user_based::get_recommendations;

pub const DEFAULT_TOP_MATCHES: usize = 5;
pub const DEFAULT_SIMILAR_ITEMS: usize = 10;
/// Metric for ranking neighbors and user based recommendations.
pub const DEFAULT_NEIGHBOR_METRIC: Metric = Metric::Pearson;
/// Metric for building the item similarity index.
pub const DEFAULT_ITEM_METRIC: Metric = Metric::Distance;

/// For every item, its most similar other items, best first.
pub type SimilarItems = BTreeMap<String, Vec<Scored>>;

/// A ranking entry: an entity or item identifier with its score.
#[derive(Clone, Debug)]
pub struct Scored {
    pub score: f64,
    pub id: String,
}

impl Scored {
    pub fn new(score: f64, id: impl Into<String>) -> Self {
        Scored {
            score,
            id: id.into(),
        }
    }
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scored {}

impl Ord for Scored {
    // Reverse order by score, ties by ascending id. Sorting ascending therefore
    // puts the best entry first, and a max-heap keeps the worst entry on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The `n` entities most similar to `target`, best first.
///
/// The target itself is never part of the result. Non-positive scores are
/// kept, undefined (NaN) ones are not. A target missing from the table is
/// compared as if it rated nothing.
pub fn top_matches<S: Similarity + ?Sized>(
    ratings: &Ratings,
    target: &str,
    n: usize,
    similarity: &S,
) -> Vec<Scored> {
    if n == 0 {
        return Vec::new();
    }

    let mut top: OctonaryHeap<Scored> = OctonaryHeap::with_capacity(n);
    for other in ratings.entities().filter(|other| *other != target) {
        let score = similarity.similarity(ratings, target, other);
        if score.is_nan() {
            continue;
        }
        let scored = Scored::new(score, other);
        if top.len() < n {
            top.push(scored);
        } else if let Some(mut bottom) = top.peek_mut() {
            if scored < *bottom {
                *bottom = scored;
            }
        }
    }

    top.into_sorted_vec()
}

/// Divides each accumulated total by its similarity sum and ranks the result.
/// Candidates whose similarities sum to zero have no defined prediction and
/// are left out.
pub(crate) fn normalized_ranking<'a, T, W>(totals: T, sim_sums: &W) -> Vec<Scored>
where
    T: IntoIterator<Item = (&'a str, f64)>,
    W: Fn(&str) -> f64,
{
    totals
        .into_iter()
        .filter_map(|(id, total)| {
            let sim_sum = sim_sums(id);
            if sim_sum == 0.0 {
                None
            } else {
                Some(Scored::new(total / sim_sum, id))
            }
        })
        .sorted()
        .collect()
}

#[cfg(test)]
mod knn_test {
    use std::collections::BinaryHeap;

    use crate::ratings::fixtures::household;
    use crate::similarity::{sim_distance, Metric};

    use super::*;

    fn neighborhood() -> Ratings {
        let mut ratings = household();
        ratings.insert("Dave", "Food", 9.0).unwrap();
        ratings.insert("Dave", "Transport", 5.0).unwrap();
        ratings.insert("Erin", "Food", 2.0).unwrap();
        ratings
    }

    #[test]
    fn should_rank_closest_entities_first() {
        let ratings = neighborhood();
        let matches = top_matches(&ratings, "Alice", 3, &sim_distance);
        let ids: Vec<&str> = matches.iter().map(|scored| scored.id.as_str()).collect();
        assert_eq!(vec!["Dave", "Bob", "Erin"], ids);
    }

    #[test]
    fn should_bound_result_length_and_sort_descending() {
        let ratings = neighborhood();
        for n in 0..8 {
            let matches = top_matches(&ratings, "Alice", n, &Metric::Distance);
            assert!(matches.len() <= n.min(ratings.len() - 1));
            assert!(matches.iter().all(|scored| scored.id != "Alice"));
            for pair in matches.windows(2) {
                assert!(pair[0].score >= pair[1].score);
            }
        }
        assert_eq!(4, top_matches(&ratings, "Alice", 10, &Metric::Distance).len());
    }

    #[test]
    fn should_keep_non_positive_scores() {
        let ratings = neighborhood();
        let matches = top_matches(&ratings, "Alice", 10, &Metric::Pearson);
        let carol = matches.iter().find(|scored| scored.id == "Carol").unwrap();
        assert!(carol.score < 0.0);
        assert_eq!("Carol", matches.last().unwrap().id);
    }

    #[test]
    fn should_break_ties_by_identifier() {
        let ratings = neighborhood();
        let constant = |_: &Ratings, _: &str, _: &str| 0.5;
        let matches = top_matches(&ratings, "Alice", 3, &constant);
        let ids: Vec<&str> = matches.iter().map(|scored| scored.id.as_str()).collect();
        assert_eq!(vec!["Bob", "Carol", "Dave"], ids);
    }

    #[test]
    fn should_compare_missing_target_as_empty() {
        let ratings = neighborhood();
        let matches = top_matches(&ratings, "Mallory", 5, &Metric::Cosine);
        assert_eq!(5, matches.len());
        assert!(matches.iter().all(|scored| scored.score == 0.0));
    }

    #[test]
    fn should_be_idempotent() {
        let ratings = neighborhood();
        assert_eq!(
            top_matches(&ratings, "Bob", 4, &Metric::Pearson),
            top_matches(&ratings, "Bob", 4, &Metric::Pearson)
        );
    }

    #[test]
    fn should_skip_undefined_scores() {
        let ratings = neighborhood();
        let flaky = |_: &Ratings, _: &str, other: &str| if other == "Bob" { f64::NAN } else { 0.5 };
        let matches = top_matches(&ratings, "Alice", 10, &flaky);
        let ids: Vec<&str> = matches.iter().map(|scored| scored.id.as_str()).collect();
        assert_eq!(vec!["Carol", "Dave", "Erin"], ids);
    }

    #[test]
    fn should_agree_equality_with_ordering() {
        let positive = Scored::new(0.0, "Food");
        let negative = Scored::new(-0.0, "Food");
        assert_ne!(Ordering::Equal, positive.cmp(&negative));
        assert_ne!(positive, negative);

        let undefined = Scored::new(f64::NAN, "Food");
        assert_eq!(undefined, undefined.clone());
        assert_eq!(Scored::new(1.5, "Food"), Scored::new(1.5, "Food"));
        assert_ne!(Scored::new(1.5, "Food"), Scored::new(1.5, "Rent"));
    }

    #[test]
    fn handle_reverse_ordering_scored() {
        let largest = Scored::new(5000.0, "a");
        let middle = Scored::new(100.0, "b");
        let smallest = Scored::new(1.0, "c");
        let items = vec![largest, smallest, middle];

        let how_many = 2;
        let mut top_items: BinaryHeap<Scored> = BinaryHeap::with_capacity(how_many);
        for scored in items.into_iter() {
            if top_items.len() < how_many {
                top_items.push(scored);
            } else {
                let mut reverse_top = top_items.peek_mut().unwrap();
                if scored < *reverse_top {
                    *reverse_top = scored;
                }
            }
        }
        // the worst of the kept entries sits on top
        assert_eq!("b", top_items.pop().unwrap().id);
        assert_eq!("a", top_items.pop().unwrap().id);
    }

    #[test]
    fn should_drop_candidates_with_zero_similarity_sum() {
        let totals = vec![("Rent", 12.0), ("Food", 3.0), ("Leisure", 8.0)];
        let sums = |id: &str| if id == "Leisure" { 0.0 } else { 2.0 };
        let ranking = normalized_ranking(totals, &sums);
        assert_eq!(
            vec![Scored::new(6.0, "Rent"), Scored::new(1.5, "Food")],
            ranking
        );
    }
}
