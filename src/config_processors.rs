use justconfig::error::ConfigError;
use justconfig::item::{MapAction, StringItem};

/// Remove quotes from configuration strings.
pub trait Unquote
where
    Self: Sized,
{
    fn unquote(self) -> Result<StringItem, ConfigError>;
}

impl Unquote for Result<StringItem, ConfigError> {
    /// Strips one pair of surrounding double quotes from every value.
    ///
    /// Values are trimmed first. Unquoted values are passed through as they
    /// are, so `name = alice` and `name = "alice"` read the same. Paths with
    /// spaces in them, like transaction exports, are the usual reason to quote.
    ///
    /// ## Example
    ///
    /// ```rust
    /// # use justconfig::Config;
    /// # use justconfig::ConfPath;
    /// # use justconfig::item::ValueExtractor;
    /// # use justconfig::sources::defaults::Defaults;
    /// # use spendreco::config_processors::Unquote;
    /// #
    /// # let mut conf = Config::default();
    /// # let mut defaults = Defaults::default();
    /// defaults.set(conf.root().push_all(&["data"]), " \"exports/bank 2021.csv\" ", "source info");
    /// defaults.set(conf.root().push_all(&["user"]), "alice", "source info");
    /// conf.add_source(defaults);
    ///
    /// let path: String = conf.get(ConfPath::from(&["data"])).unquote().value().unwrap();
    /// let user: String = conf.get(ConfPath::from(&["user"])).unquote().value().unwrap();
    ///
    /// assert_eq!(path, "exports/bank 2021.csv");
    /// assert_eq!(user, "alice");
    /// ```
    fn unquote(self) -> Result<StringItem, ConfigError> {
        self?.map(|value| {
            let trimmed = value.trim();

            if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
                MapAction::Replace(vec![trimmed[1..trimmed.len() - 1].to_owned()])
            } else if trimmed.len() != value.len() {
                MapAction::Replace(vec![trimmed.to_owned()])
            } else {
                MapAction::Keep
            }
        })
    }
}
