use std::fmt;
use std::str::FromStr;

use crate::error::RecoError;
use crate::ratings::{ItemRatings, Ratings};

pub mod cosine;
pub mod distance;
pub mod jaccard;
pub mod pearson;
pub mod tanimoto;

pub use cosine::sim_cosine;
pub use distance::sim_distance;
pub use jaccard::sim_jaccard;
pub use pearson::sim_pearson;
pub use tanimoto::sim_tanimoto;

/// Scores how alike two entities of a ratings table are.
///
/// Scores of different implementations live on different scales and must not
/// be mixed in one ranking. Every implementation is symmetric in `first` and
/// `second`, and treats an entity missing from the table as having no ratings.
pub trait Similarity {
    fn similarity(&self, ratings: &Ratings, first: &str, second: &str) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&Ratings, &str, &str) -> f64,
{
    fn similarity(&self, ratings: &Ratings, first: &str, second: &str) -> f64 {
        self(ratings, first, second)
    }
}

/// The built-in metrics, selectable by name from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Distance,
    Pearson,
    Cosine,
    Jaccard,
    Tanimoto,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Distance => "distance",
            Metric::Pearson => "pearson",
            Metric::Cosine => "cosine",
            Metric::Jaccard => "jaccard",
            Metric::Tanimoto => "tanimoto",
        }
    }
}

impl Similarity for Metric {
    fn similarity(&self, ratings: &Ratings, first: &str, second: &str) -> f64 {
        match self {
            Metric::Distance => sim_distance(ratings, first, second),
            Metric::Pearson => sim_pearson(ratings, first, second),
            Metric::Cosine => sim_cosine(ratings, first, second),
            Metric::Jaccard => sim_jaccard(ratings, first, second),
            Metric::Tanimoto => sim_tanimoto(ratings, first, second),
        }
    }
}

impl FromStr for Metric {
    type Err = RecoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "distance" | "euclidean" => Ok(Metric::Distance),
            "pearson" => Ok(Metric::Pearson),
            "cosine" => Ok(Metric::Cosine),
            "jaccard" => Ok(Metric::Jaccard),
            "tanimoto" => Ok(Metric::Tanimoto),
            _ => Err(RecoError::UnknownMetric(name.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Score pairs of the items rated by both entities.
pub(crate) fn shared_scores<'a>(
    first: &'a ItemRatings,
    second: &'a ItemRatings,
) -> impl Iterator<Item = (f64, f64)> + 'a {
    first
        .iter()
        .filter_map(move |(item, score)| second.get(item).map(|other| (*score, *other)))
}

#[cfg(test)]
mod similarity_test {
    use float_cmp::approx_eq;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;

    const ALL_METRICS: [Metric; 5] = [
        Metric::Distance,
        Metric::Pearson,
        Metric::Cosine,
        Metric::Jaccard,
        Metric::Tanimoto,
    ];

    fn random_ratings(seed: u64) -> Ratings {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut ratings = Ratings::new();
        for entity in 0..12 {
            for item in 0..15 {
                if rng.gen_bool(0.4) {
                    let score: f64 = rng.gen_range(0.0..500.0);
                    ratings
                        .insert(&format!("company-{}", entity), &format!("account-{}", item), score)
                        .unwrap();
                }
            }
        }
        ratings
    }

    #[test]
    fn should_be_symmetric() {
        for seed in 0..5 {
            let ratings = random_ratings(seed);
            let entities: Vec<&str> = ratings.entities().collect();
            for metric in ALL_METRICS.iter() {
                for first in entities.iter() {
                    for second in entities.iter() {
                        let forward = metric.similarity(&ratings, first, second);
                        let backward = metric.similarity(&ratings, second, first);
                        assert!(
                            approx_eq!(f64, forward, backward, epsilon = 1e-12),
                            "{} not symmetric for {} / {}",
                            metric,
                            first,
                            second
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn should_return_zero_without_shared_items() {
        let ratings = Ratings::from_triples(vec![
            ("Alice", "Food", 10.0),
            ("Alice", "Transport", 5.0),
            ("Bob", "Rent", 800.0),
            ("Bob", "Utilities", 60.0),
        ])
        .unwrap();

        for metric in ALL_METRICS.iter() {
            assert_eq!(0.0, metric.similarity(&ratings, "Alice", "Bob"), "{}", metric);
        }
    }

    #[test]
    fn should_handle_missing_entities() {
        let ratings = Ratings::from_triples(vec![("Alice", "Food", 10.0)]).unwrap();
        for metric in ALL_METRICS.iter() {
            let score = metric.similarity(&ratings, "Alice", "Nobody");
            assert!(score.is_finite());
            assert_eq!(0.0, score, "{}", metric);
            assert_eq!(0.0, metric.similarity(&ratings, "Nobody", "Nobody"), "{}", metric);
        }
    }

    #[test]
    fn should_accept_plain_functions() {
        let ratings = Ratings::from_triples(vec![
            ("Alice", "Food", 10.0),
            ("Bob", "Food", 8.0),
        ])
        .unwrap();
        let as_fn = sim_distance.similarity(&ratings, "Alice", "Bob");
        let as_metric = Metric::Distance.similarity(&ratings, "Alice", "Bob");
        assert_eq!(as_fn, as_metric);

        let constant = |_: &Ratings, _: &str, _: &str| 0.25;
        assert_eq!(0.25, constant.similarity(&ratings, "Alice", "Bob"));
    }

    #[test]
    fn should_parse_metric_names() {
        assert_eq!(Metric::Cosine, "cosine".parse::<Metric>().unwrap());
        assert_eq!(Metric::Pearson, " Pearson ".parse::<Metric>().unwrap());
        assert_eq!(Metric::Distance, "euclidean".parse::<Metric>().unwrap());
        for metric in ALL_METRICS.iter() {
            assert_eq!(*metric, metric.name().parse::<Metric>().unwrap());
        }
        assert!(matches!(
            "manhattan".parse::<Metric>(),
            Err(RecoError::UnknownMetric(_))
        ));
    }
}
