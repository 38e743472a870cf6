use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{RecoError, Result};

/// Scores of a single entity, keyed by item.
pub type ItemRatings = BTreeMap<String, f64>;

static NO_RATINGS: ItemRatings = BTreeMap::new();

/// Entity -> item -> score table that all recommenders read from.
///
/// Scores are validated on the way in, so every value stored here is finite.
/// Looking up an entity that is not in the table yields an empty set of
/// ratings instead of failing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ratings {
    table: BTreeMap<String, ItemRatings>,
}

impl Ratings {
    pub fn new() -> Self {
        Ratings {
            table: BTreeMap::new(),
        }
    }

    /// Builds a table from `(entity, item, score)` triples. Later triples
    /// overwrite earlier ones for the same entity and item.
    pub fn from_triples<I, E, T>(triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (E, T, f64)>,
        E: AsRef<str>,
        T: AsRef<str>,
    {
        let mut ratings = Ratings::new();
        for (entity, item, score) in triples {
            ratings.insert(entity.as_ref(), item.as_ref(), score)?;
        }
        Ok(ratings)
    }

    pub fn insert(&mut self, entity: &str, item: &str, score: f64) -> Result<()> {
        validate(entity, item, score)?;
        self.table
            .entry(entity.to_string())
            .or_insert_with(BTreeMap::new)
            .insert(item.to_string(), score);
        Ok(())
    }

    /// Replaces all ratings of `entity`. An empty map is accepted, the entity
    /// then simply contributes nothing to similarity computations.
    pub fn set_entity(&mut self, entity: &str, items: ItemRatings) -> Result<()> {
        for (item, score) in items.iter() {
            validate(entity, item, *score)?;
        }
        if entity.is_empty() {
            return Err(RecoError::EmptyIdentifier {
                entity: entity.to_string(),
                item: String::new(),
            });
        }
        self.table.insert(entity.to_string(), items);
        Ok(())
    }

    pub fn ratings_for(&self, entity: &str) -> &ItemRatings {
        self.table.get(entity).unwrap_or(&NO_RATINGS)
    }

    pub fn rating(&self, entity: &str, item: &str) -> Option<f64> {
        self.ratings_for(entity).get(item).copied()
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.table.contains_key(entity)
    }

    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(|entity| entity.as_str())
    }

    /// Every item rated by at least one entity.
    pub fn all_items(&self) -> BTreeSet<&str> {
        self.table
            .values()
            .flat_map(|items| items.keys().map(|item| item.as_str()))
            .collect()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ItemRatings> {
        self.table.iter()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<'a> IntoIterator for &'a Ratings {
    type Item = (&'a String, &'a ItemRatings);
    type IntoIter = btree_map::Iter<'a, String, ItemRatings>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}

fn validate(entity: &str, item: &str, score: f64) -> Result<()> {
    if entity.is_empty() || item.is_empty() {
        return Err(RecoError::EmptyIdentifier {
            entity: entity.to_string(),
            item: item.to_string(),
        });
    }
    if !score.is_finite() {
        return Err(RecoError::InvalidScore {
            entity: entity.to_string(),
            item: item.to_string(),
            score,
        });
    }
    Ok(())
}

/// Flips the table from entity -> item -> score to item -> entity -> score.
///
/// Applying it twice gives back the original table, except for entities that
/// had no ratings at all: those have nothing to flip and disappear.
pub fn transform_prefs(ratings: &Ratings) -> Ratings {
    let mut flipped: BTreeMap<String, ItemRatings> = BTreeMap::new();
    for (entity, items) in ratings {
        for (item, score) in items {
            flipped
                .entry(item.clone())
                .or_insert_with(BTreeMap::new)
                .insert(entity.clone(), *score);
        }
    }
    Ratings { table: flipped }
}
