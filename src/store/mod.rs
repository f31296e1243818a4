//! Persistence of the transaction table.
//!
//! Handlers only see [RecordStore]; which backend sits behind it is decided
//! once at start-up by [open_store].
//!
//! The table is always newest-first at this interface: position 0 is the most
//! recently recorded transaction, whatever order the backend keeps on disk.

mod csv_file;
mod record;
mod spreadsheet;

use std::{collections::BTreeSet, sync::Arc};

use async_trait::async_trait;

pub use csv_file::CsvFileStore;
pub use spreadsheet::{GoogleSheet, SpreadsheetLocator, SpreadsheetStore};

#[cfg(test)]
pub(crate) use spreadsheet::MemorySheet;

use crate::{
    Error,
    config::{Config, StoreBackend},
    transaction::Transaction,
};

/// Loads and mutates the transaction table.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Get the full table, newest first.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the backing store cannot be
    /// reached, or [Error::MalformedRecord] if any stored row cannot be decoded.
    async fn load(&self) -> Result<Vec<Transaction>, Error>;

    /// Persist `transaction` as the newest row of the table.
    ///
    /// # Errors
    /// Returns [Error::WriteFailed] if the row could not be persisted.
    async fn append(&self, transaction: Transaction) -> Result<(), Error>;

    /// Remove the rows at `positions` of the newest-first table.
    ///
    /// An empty set does nothing.
    ///
    /// # Errors
    /// Returns [Error::ValidationFailed] if a position is outside the table,
    /// in which case nothing is removed, or [Error::WriteFailed] if the
    /// change could not be persisted.
    async fn delete(&self, positions: &BTreeSet<usize>) -> Result<(), Error>;
}

/// Open the backend selected by `config`.
///
/// # Errors
/// Returns [Error::StoreUnavailable] if the spreadsheet credentials cannot be read.
pub async fn open_store(config: &Config) -> Result<Arc<dyn RecordStore>, Error> {
    match config.store {
        StoreBackend::File => {
            tracing::info!("Using the CSV file {}", config.data_path.display());
            Ok(Arc::new(CsvFileStore::new(&config.data_path)))
        }
        StoreBackend::Sheet => {
            let credentials_path = config.credentials_path.as_deref().ok_or_else(|| {
                Error::StoreUnavailable(
                    "a service account key file is required for the sheet store".to_owned(),
                )
            })?;

            let locator = match &config.spreadsheet_id {
                Some(id) => SpreadsheetLocator::Id(id.clone()),
                None => SpreadsheetLocator::Name(config.spreadsheet_name.clone()),
            };

            tracing::info!("Using the Google spreadsheet {locator}");
            let sheet = GoogleSheet::open(credentials_path, locator).await?;

            Ok(Arc::new(SpreadsheetStore::new(sheet)))
        }
    }
}

/// Check that every position refers to a row of a table with `len` rows.
pub(crate) fn check_positions(positions: &BTreeSet<usize>, len: usize) -> Result<(), Error> {
    match positions.last() {
        Some(&last) if last >= len => {
            tracing::error!("Tried to delete row {last} from a table with {len} rows");
            Err(Error::ValidationFailed(format!(
                "Transaction {} does not exist. Refresh the page and try again.",
                last + 1
            )))
        }
        _ => Ok(()),
    }
}

/// Remove the items at `positions` from `rows`, keeping the rest in order.
pub(crate) fn remove_positions<T>(rows: Vec<T>, positions: &BTreeSet<usize>) -> Vec<T> {
    rows.into_iter()
        .enumerate()
        .filter(|(position, _)| !positions.contains(position))
        .map(|(_, row)| row)
        .collect()
}
