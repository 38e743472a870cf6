use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecoError>;

#[derive(Error, Debug)]
pub enum RecoError {
    #[error("Score for '{entity}' / '{item}' is not a finite number: {score}")]
    InvalidScore {
        entity: String,
        item: String,
        score: f64,
    },

    #[error("Identifiers must not be empty (entity: '{entity}', item: '{item}')")]
    EmptyIdentifier { entity: String, item: String },

    #[error("Unknown similarity metric '{0}', expected one of distance, pearson, cosine, jaccard, tanimoto")]
    UnknownMetric(String),

    #[error("Unknown recommendation mode '{0}', expected one of user, item, similar")]
    UnknownMode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unable to parse amount: '{0}'")]
    InvalidAmount(String),

    #[error("Transaction file is missing column '{0}'")]
    MissingColumn(String),

    #[error("Failed to read transactions: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ledger store error: {0}")]
    Ledger(#[from] rocksdb::Error),

    #[error("Failed to encode or decode ledger entry: {0}")]
    Codec(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
