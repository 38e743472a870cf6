//! Collaborative-filtering recommendations over aggregated spend.
//!
//! Counterparties (or users) are entities, spending categories are items, and
//! the aggregated spend is the rating. The [`knn`] module ranks neighbors and
//! predicts scores for unrated items, either user based or from an item
//! similarity index, with any of the metrics in [`similarity`].

pub mod config;
pub mod config_processors;
pub mod error;
pub mod io;
pub mod knn;
pub mod ledger;
pub mod logging;
pub mod ratings;
pub mod similarity;

pub use error::{RecoError, Result};
pub use knn::{
    calculate_similar_items, get_recommendations, get_recommended_items, top_matches, Scored,
    SimilarItems,
};
pub use ratings::{transform_prefs, Ratings};
pub use similarity::{Metric, Similarity};
