//! A [RecordStore] backed by a local CSV file.

use std::{
    collections::BTreeSet,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use async_trait::async_trait;

use crate::{
    Error,
    store::{
        RecordStore, check_positions,
        record::{ColumnMap, HEADER, is_blank},
        remove_positions,
    },
    transaction::Transaction,
};

/// Stores the table in a CSV file, newest row first.
///
/// Every write rewrites the whole file through a temporary file that is
/// renamed over the original, so a failed write leaves the previous table
/// intact. Writes from this process are serialized; writes from other
/// processes are not, and the last one wins.
#[derive(Debug)]
pub struct CsvFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvFileStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_owned(),
            lock: Mutex::new(()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, Error> {
        self.lock.lock().map_err(|error| {
            tracing::error!("could not acquire the CSV file lock: {error}");
            Error::WriteFailed("the data file is locked by a failed write".to_owned())
        })
    }

    fn load_sync(&self) -> Result<Vec<Transaction>, Error> {
        let _guard = self.lock()?;
        self.read_rows()
    }

    fn append_sync(&self, transaction: Transaction) -> Result<(), Error> {
        let _guard = self.lock()?;

        let mut rows = self.read_rows()?;
        rows.insert(0, transaction);

        self.write_rows(&rows)
    }

    fn delete_sync(&self, positions: &BTreeSet<usize>) -> Result<(), Error> {
        let _guard = self.lock()?;

        let rows = self.read_rows()?;
        check_positions(positions, rows.len())?;

        let kept = remove_positions(rows, positions);
        self.write_rows(&kept)
    }

    /// Read every row, creating the file with only a header if it does not exist.
    fn read_rows(&self) -> Result<Vec<Transaction>, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::info!(
                    "Data file {} not found, creating an empty table",
                    self.path.display()
                );
                self.write_rows(&[]).map_err(|error| {
                    Error::StoreUnavailable(format!(
                        "could not create {}: {error}",
                        self.path.display()
                    ))
                })?;
                return Ok(Vec::new());
            }
            Err(error) => {
                tracing::error!("could not open {}: {error}", self.path.display());
                return Err(Error::StoreUnavailable(format!(
                    "could not open {}: {error}",
                    self.path.display()
                )));
            }
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);
        let mut records = reader.records();

        let columns = match records.next() {
            Some(header) => {
                let header = header.map_err(|error| read_error(&self.path, error))?;
                ColumnMap::from_header(&header.iter().collect::<Vec<_>>())?
            }
            // An empty file has no header yet.
            None => return Ok(Vec::new()),
        };

        let mut rows = Vec::new();

        for (i, record) in records.enumerate() {
            let record = record.map_err(|error| read_error(&self.path, error))?;
            let cells: Vec<&str> = record.iter().collect();

            if is_blank(cells.as_slice()) {
                continue;
            }

            let row_number = record
                .position()
                .map(|position| position.line() as usize)
                .unwrap_or(i + 2);

            rows.push(columns.decode(cells.as_slice(), row_number)?);
        }

        tracing::debug!("Loaded {} rows from {}", rows.len(), self.path.display());

        Ok(rows)
    }

    fn write_rows(&self, rows: &[Transaction]) -> Result<(), Error> {
        let temp_path = self.path.with_extension("csv.tmp");

        let write = || -> Result<(), csv::Error> {
            let mut writer = csv::Writer::from_path(&temp_path)?;
            let columns = ColumnMap::default();

            writer.write_record(HEADER)?;

            for row in rows {
                writer.write_record(columns.encode(row))?;
            }

            writer.flush()?;
            Ok(())
        };

        write()
            .map_err(|error| error.to_string())
            .and_then(|_| {
                fs::rename(&temp_path, &self.path).map_err(|error| error.to_string())
            })
            .map_err(|error| {
                tracing::error!("could not write {}: {error}", self.path.display());
                // Best effort, the original file is untouched either way.
                let _ = fs::remove_file(&temp_path);
                Error::WriteFailed(format!("could not write {}: {error}", self.path.display()))
            })?;

        tracing::debug!("Wrote {} rows to {}", rows.len(), self.path.display());

        Ok(())
    }
}

fn read_error(path: &Path, error: csv::Error) -> Error {
    tracing::error!("could not read {}: {error}", path.display());
    Error::StoreUnavailable(format!("could not read {}: {error}", path.display()))
}

#[async_trait]
impl RecordStore for CsvFileStore {
    async fn load(&self) -> Result<Vec<Transaction>, Error> {
        self.load_sync()
    }

    async fn append(&self, transaction: Transaction) -> Result<(), Error> {
        self.append_sync(transaction)
    }

    async fn delete(&self, positions: &BTreeSet<usize>) -> Result<(), Error> {
        if positions.is_empty() {
            return Ok(());
        }

        self.delete_sync(positions)
    }
}
