use std::ffi::OsStr;
use std::fmt;
use std::fs::File;
use std::str::FromStr;

use justconfig::item::ValueExtractor;
use justconfig::processors::Trim;
use justconfig::sources::env::Env;
use justconfig::sources::text::ConfigText;
use justconfig::ConfPath;
use justconfig::Config;

use crate::config_processors::Unquote;
use crate::error::{RecoError, Result};
use crate::knn::{
    DEFAULT_ITEM_METRIC, DEFAULT_NEIGHBOR_METRIC, DEFAULT_SIMILAR_ITEMS, DEFAULT_TOP_MATCHES,
};
use crate::similarity::Metric;

// Set some default values
const DEFAULT_TRANSACTIONS_PATH: &str = "transactions.csv";
const DEFAULT_LEDGER_PATH: &str = "./ledger.db";
const DEFAULT_USER: &str = "me";
const DEFAULT_USER_BASED_METRIC: Metric = Metric::Cosine;
const DEFAULT_MODE: RecommendationMode = RecommendationMode::UserBased;
const DEFAULT_NUM_RECOMMENDATIONS: usize = 3;
const DEFAULT_LOG_LEVEL: &str = "info";

pub struct AppConfig {
    pub data: DataConfig,
    pub ledger: LedgerConfig,
    pub user: UserConfig,
    pub model: ModelConfig,
    pub log: LogConfig,
}

pub struct DataConfig {
    pub transactions_path: String,
}

pub struct LedgerConfig {
    pub path: String,
}

pub struct UserConfig {
    pub name: String,
}

pub struct ModelConfig {
    pub metric: Metric,
    pub mode: RecommendationMode,
    pub top_matches: usize,
    pub similar_items: usize,
    pub num_recommendations: usize,
}

pub struct LogConfig {
    pub level: String,
}

/// What the `recommend` binary computes for the configured user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecommendationMode {
    /// Weighted opinions of similar counterparties.
    UserBased,
    /// Precomputed item similarities weighted by the user's own spend.
    ItemBased,
    /// The counterparties that spend most like the user.
    SimilarEntities,
}

impl FromStr for RecommendationMode {
    type Err = RecoError;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "user" | "user_based" => Ok(RecommendationMode::UserBased),
            "item" | "item_based" => Ok(RecommendationMode::ItemBased),
            "similar" => Ok(RecommendationMode::SimilarEntities),
            _ => Err(RecoError::UnknownMode(name.to_string())),
        }
    }
}

impl RecommendationMode {
    /// The metric used when `model.metric` is not configured.
    pub fn default_metric(self) -> Metric {
        match self {
            RecommendationMode::UserBased => DEFAULT_USER_BASED_METRIC,
            RecommendationMode::ItemBased => DEFAULT_ITEM_METRIC,
            RecommendationMode::SimilarEntities => DEFAULT_NEIGHBOR_METRIC,
        }
    }
}

impl fmt::Display for RecommendationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecommendationMode::UserBased => "user",
            RecommendationMode::ItemBased => "item",
            RecommendationMode::SimilarEntities => "similar",
        };
        f.write_str(name)
    }
}

impl AppConfig {
    pub fn new(config_path: &str) -> Result<AppConfig> {
        // Initialize config object
        let mut conf = Config::default();

        // Check if there is a config file
        if let Ok(config_file) = File::open(config_path) {
            let config_text = ConfigText::new(config_file, config_path)
                .map_err(|e| RecoError::Config(e.to_string()))?;
            conf.add_source(config_text);
        }

        // Define config params from environment variables
        let config_env = Env::new(&[
            (
                ConfPath::from(&["data", "transactions_path"]),
                OsStr::new("TRANSACTIONS_DATA"),
            ),
            (
                ConfPath::from(&["ledger", "path"]),
                OsStr::new("LEDGER_PATH"),
            ),
            (ConfPath::from(&["user", "name"]), OsStr::new("SPEND_USER")),
            (
                ConfPath::from(&["model", "metric"]),
                OsStr::new("SPEND_METRIC"),
            ),
        ]);
        conf.add_source(config_env);

        // Parse into custom config struct
        AppConfig::parse(conf)
    }

    fn parse(conf: Config) -> Result<AppConfig> {
        Ok(AppConfig {
            data: DataConfig::parse(&conf, ConfPath::from(&["data"])),
            ledger: LedgerConfig::parse(&conf, ConfPath::from(&["ledger"])),
            user: UserConfig::parse(&conf, ConfPath::from(&["user"])),
            model: ModelConfig::parse(&conf, ConfPath::from(&["model"]))?,
            log: LogConfig::parse(&conf, ConfPath::from(&["log"])),
        })
    }
}

impl DataConfig {
    fn parse(conf: &Config, path: ConfPath) -> DataConfig {
        DataConfig {
            transactions_path: conf
                .get(path.push("transactions_path"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from(DEFAULT_TRANSACTIONS_PATH)),
        }
    }
}

impl LedgerConfig {
    fn parse(conf: &Config, path: ConfPath) -> LedgerConfig {
        LedgerConfig {
            path: conf
                .get(path.push("path"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from(DEFAULT_LEDGER_PATH)),
        }
    }
}

impl UserConfig {
    fn parse(conf: &Config, path: ConfPath) -> UserConfig {
        UserConfig {
            name: conf
                .get(path.push("name"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from(DEFAULT_USER)),
        }
    }
}

impl ModelConfig {
    fn parse(conf: &Config, path: ConfPath) -> Result<ModelConfig> {
        let mode_name: std::result::Result<String, _> =
            conf.get(path.push("mode")).unquote().value();
        let mode = match mode_name {
            Ok(name) => name.parse::<RecommendationMode>()?,
            Err(_) => DEFAULT_MODE,
        };
        let metric_name: std::result::Result<String, _> =
            conf.get(path.push("metric")).unquote().value();
        let metric = match metric_name {
            Ok(name) => name.parse::<Metric>()?,
            Err(_) => mode.default_metric(),
        };

        Ok(ModelConfig {
            metric,
            mode,
            top_matches: conf
                .get(path.push("top_matches"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_TOP_MATCHES),
            similar_items: conf
                .get(path.push("similar_items"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_SIMILAR_ITEMS),
            num_recommendations: conf
                .get(path.push("num_recommendations"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_NUM_RECOMMENDATIONS),
        })
    }
}

impl LogConfig {
    fn parse(conf: &Config, path: ConfPath) -> LogConfig {
        LogConfig {
            level: conf
                .get(path.push("level"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from(DEFAULT_LOG_LEVEL)),
        }
    }
}
