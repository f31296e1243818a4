//! Command line and environment configuration for the server.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    Error,
    transaction::{Categories, DEFAULT_CATEGORIES},
};

/// Where transactions are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// A CSV file on the local disk.
    File,
    /// The first worksheet of a Google spreadsheet.
    Sheet,
}

/// The web server for Pocket Ledger.
///
/// Every option can also be set with the environment variable shown in `--help`.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// The port to serve the app from.
    #[arg(short, long, env = "POCKET_LEDGER_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Which backend stores the transactions.
    #[arg(long, env = "POCKET_LEDGER_STORE", value_enum, default_value_t = StoreBackend::File)]
    pub store: StoreBackend,

    /// The CSV file used by the `file` backend. Created if it does not exist.
    #[arg(long, env = "POCKET_LEDGER_DATA_PATH", default_value = "butce_verileri.csv")]
    pub data_path: PathBuf,

    /// The service account key file used by the `sheet` backend.
    #[arg(
        long,
        env = "GOOGLE_APPLICATION_CREDENTIALS",
        required_if_eq("store", "sheet")
    )]
    pub credentials_path: Option<PathBuf>,

    /// The name of the spreadsheet used by the `sheet` backend.
    #[arg(long, env = "POCKET_LEDGER_SPREADSHEET_NAME", default_value = "ButceVerileri")]
    pub spreadsheet_name: String,

    /// The ID of the spreadsheet used by the `sheet` backend. Skips the lookup by name.
    #[arg(long, env = "POCKET_LEDGER_SPREADSHEET_ID")]
    pub spreadsheet_id: Option<String>,

    /// The canonical name of the local timezone, e.g. "Europe/Istanbul".
    #[arg(long, env = "POCKET_LEDGER_TIMEZONE", default_value = "Europe/Istanbul")]
    pub timezone: String,

    /// The comma separated categories offered when recording a transaction.
    #[arg(
        long,
        env = "POCKET_LEDGER_CATEGORIES",
        value_delimiter = ',',
        default_values = DEFAULT_CATEGORIES
    )]
    pub categories: Vec<String>,
}

impl Config {
    /// The configured category vocabulary.
    ///
    /// # Errors
    /// Returns [Error::ValidationFailed] if no non-blank category was given.
    pub fn categories(&self) -> Result<Categories, Error> {
        Categories::new(self.categories.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};

    use crate::{
        Error,
        config::{Config, StoreBackend},
        transaction::DEFAULT_CATEGORIES,
    };

    #[test]
    fn command_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let config = Config::try_parse_from([
            "server",
            "--port",
            "8080",
            "--store",
            "sheet",
            "--credentials-path",
            "key.json",
            "--spreadsheet-id",
            "abc123",
            "--timezone",
            "Etc/UTC",
            "--data-path",
            "ledger.csv",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.store, StoreBackend::Sheet);
        assert_eq!(config.credentials_path, Some(PathBuf::from("key.json")));
        assert_eq!(config.spreadsheet_id.as_deref(), Some("abc123"));
        assert_eq!(config.timezone, "Etc/UTC");
        assert_eq!(config.data_path, PathBuf::from("ledger.csv"));
    }

    #[test]
    fn categories_are_comma_separated() {
        let config =
            Config::try_parse_from(["server", "--categories", "Food, Rent,,Fun"]).unwrap();

        let categories = config.categories().unwrap();

        assert_eq!(
            categories.iter().collect::<Vec<_>>(),
            vec!["Food", "Rent", "Fun"]
        );
    }

    #[test]
    fn default_categories_are_offered() {
        let config = Config::try_parse_from(["server", "--store", "file"]).unwrap();

        assert_eq!(
            config.categories().unwrap().iter().collect::<Vec<_>>(),
            DEFAULT_CATEGORIES.to_vec()
        );
    }

    #[test]
    fn blank_categories_are_rejected() {
        let config = Config::try_parse_from(["server", "--categories", " , "]).unwrap();

        assert!(matches!(config.categories(), Err(Error::ValidationFailed(_))));
    }
}
