use std::path::Path;
use std::time::SystemTime;

use rocksdb::{Options, DB};
use serde_derive::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RecoError, Result};
use crate::ratings::ItemRatings;

/// Per-user spend ledgers, one entry per user identifier.
pub struct LedgerStore {
    rocks_db: DB,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LedgerEntry {
    pub spend_per_category: ItemRatings,
    pub epoch_secs: u64,
}

impl LedgerStore {
    pub fn open<P: AsRef<Path>>(database_path: P) -> Result<Self> {
        let mut options = Options::default();
        options.create_if_missing(true);
        options.optimize_for_point_lookup(64);

        let rocks_db = DB::open(&options, database_path)?;
        Ok(Self { rocks_db })
    }

    /// The stored ledger of `user`, or `None` if nothing was recorded yet.
    pub fn get_user_ratings(&self, user: &str) -> Result<Option<ItemRatings>> {
        let bytes = self.rocks_db.get(user.as_bytes())?;
        match bytes {
            Some(bytes) => {
                let entry: LedgerEntry = bincode::deserialize(&bytes)?;
                Ok(Some(entry.spend_per_category))
            }
            None => Ok(None),
        }
    }

    pub fn put_user_ratings(&self, user: &str, spend_per_category: &ItemRatings) -> Result<()> {
        let entry = LedgerEntry {
            spend_per_category: spend_per_category.clone(),
            epoch_secs: seconds_since_epoch(),
        };
        let bytes = bincode::serialize(&entry)?;
        self.rocks_db.put(user.as_bytes(), &bytes)?;
        Ok(())
    }

    /// Sets the spend of `user` for `category`, starting a new ledger for
    /// users seen for the first time. Returns the updated ledger.
    pub fn record_spend(&self, user: &str, category: &str, amount: f64) -> Result<ItemRatings> {
        if user.is_empty() || category.is_empty() {
            return Err(RecoError::EmptyIdentifier {
                entity: user.to_string(),
                item: category.to_string(),
            });
        }
        if !amount.is_finite() {
            return Err(RecoError::InvalidScore {
                entity: user.to_string(),
                item: category.to_string(),
                score: amount,
            });
        }

        let mut spend_per_category = match self.get_user_ratings(user)? {
            Some(existing) => existing,
            None => {
                debug!("no ledger for '{}' yet, starting a new one", user);
                ItemRatings::new()
            }
        };
        spend_per_category.insert(category.to_string(), amount);
        self.put_user_ratings(user, &spend_per_category)?;
        Ok(spend_per_category)
    }
}

fn seconds_since_epoch() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod ledger_test {
    use std::path::PathBuf;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "spendreco-ledger-{}-{}-{}",
            name,
            std::process::id(),
            seconds_since_epoch()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn should_return_none_for_unknown_user() {
        let dir = scratch_dir("unknown");
        {
            let store = LedgerStore::open(&dir).unwrap();
            assert!(store.get_user_ratings("alice").unwrap().is_none());
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn should_record_and_update_spend() {
        let dir = scratch_dir("record");
        {
            let store = LedgerStore::open(&dir).unwrap();
            store.record_spend("alice", "Food", 120.0).unwrap();
            store.record_spend("alice", "Transport", 35.5).unwrap();
            let ledger = store.record_spend("alice", "Food", 80.0).unwrap();

            assert_eq!(2, ledger.len());
            assert_eq!(Some(&80.0), ledger.get("Food"));
            assert_eq!(Some(ledger), store.get_user_ratings("alice").unwrap());
            assert!(store.get_user_ratings("Someone Else").unwrap().is_none());
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn should_reject_invalid_amounts() {
        let dir = scratch_dir("invalid");
        {
            let store = LedgerStore::open(&dir).unwrap();
            assert!(store.record_spend("alice", "Food", f64::NAN).is_err());
            assert!(store.record_spend("", "Food", 1.0).is_err());
            assert!(store.get_user_ratings("alice").unwrap().is_none());
        }
        let _ = std::fs::remove_dir_all(&dir);
    }
}
