use std::fs::File;
use std::io::Read;
use std::path::Path;

use hashbrown::HashMap;
use serde_derive::Deserialize;
use tracing::{info, warn};

use crate::error::{RecoError, Result};
use crate::ratings::Ratings;

/// Aggregated spend at or below this amount is treated as no spend.
pub const MIN_SPEND: f64 = 1e-3;

const REQUIRED_COLUMNS: [&str; 3] = ["Company", "Account", "JV Value"];

/// One row of a transaction export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "JV Value")]
    pub value: f64,
}

pub fn read_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    let file = File::open(path.as_ref())?;
    info!("reading transactions from {}", path.as_ref().display());
    read_transactions_from(file)
}

/// Parses comma separated transactions with a header row. Extra columns are
/// ignored; a row with a non-numeric value fails the whole read.
pub fn read_transactions_from<R: Read>(input: R) -> Result<Vec<Transaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS.iter() {
        if !headers.iter().any(|header| header == *column) {
            return Err(RecoError::MissingColumn(column.to_string()));
        }
    }

    let transactions = reader
        .deserialize()
        .collect::<std::result::Result<Vec<Transaction>, csv::Error>>()?;
    info!("read {} transactions", transactions.len());
    Ok(transactions)
}

/// Sums the spend per company and account into a ratings table with companies
/// as entities and accounts as items.
///
/// Refunds and other negative values count as zero, and totals of at most
/// [`MIN_SPEND`] are left out. Companies without any remaining spend do not
/// appear in the table. A `NaN` or infinite value fails the whole aggregation.
pub fn aggregate_transactions(transactions: &[Transaction]) -> Result<Ratings> {
    let mut totals: HashMap<(&str, &str), f64> = HashMap::new();
    for transaction in transactions.iter() {
        if !transaction.value.is_finite() {
            return Err(RecoError::InvalidScore {
                entity: transaction.company.clone(),
                item: transaction.account.clone(),
                score: transaction.value,
            });
        }
        let value = if transaction.value > 0.0 {
            transaction.value
        } else {
            0.0
        };
        *totals
            .entry((transaction.company.as_str(), transaction.account.as_str()))
            .or_insert(0.0) += value;
    }

    let mut ratings = Ratings::new();
    let mut qty_dropped = 0_usize;
    for ((company, account), total) in totals.into_iter() {
        if total > MIN_SPEND {
            ratings.insert(company, account, total)?;
        } else {
            qty_dropped += 1;
        }
    }
    if qty_dropped > 0 {
        warn!("dropped {} company/account pairs without spend", qty_dropped);
    }

    Ok(ratings)
}

pub fn read_ratings<P: AsRef<Path>>(path: P) -> Result<Ratings> {
    let transactions = read_transactions(path)?;
    aggregate_transactions(&transactions)
}
