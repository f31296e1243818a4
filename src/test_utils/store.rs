use std::{collections::BTreeSet, sync::Mutex};

use async_trait::async_trait;

use crate::{
    Error,
    store::{RecordStore, check_positions, remove_positions},
    transaction::Transaction,
};

/// A [RecordStore] that keeps rows in memory and counts the writes it receives.
#[derive(Debug, Default)]
pub(crate) struct RecordingStore {
    rows: Mutex<Vec<Transaction>>,
    appends: Mutex<usize>,
    deletes: Mutex<usize>,
    fail_writes: bool,
    unavailable: bool,
}

impl RecordingStore {
    /// A store holding `rows`, newest first.
    pub(crate) fn with_rows(rows: Vec<Transaction>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    pub(crate) fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub(crate) fn rows(&self) -> Vec<Transaction> {
        self.rows.lock().unwrap().clone()
    }

    pub(crate) fn append_count(&self) -> usize {
        *self.appends.lock().unwrap()
    }

    pub(crate) fn delete_count(&self) -> usize {
        *self.deletes.lock().unwrap()
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn load(&self) -> Result<Vec<Transaction>, Error> {
        if self.unavailable {
            return Err(Error::StoreUnavailable("the test store is offline".to_owned()));
        }

        Ok(self.rows())
    }

    async fn append(&self, transaction: Transaction) -> Result<(), Error> {
        *self.appends.lock().unwrap() += 1;

        if self.fail_writes {
            return Err(Error::WriteFailed("the test store rejects writes".to_owned()));
        }

        self.rows.lock().unwrap().insert(0, transaction);
        Ok(())
    }

    async fn delete(&self, positions: &BTreeSet<usize>) -> Result<(), Error> {
        if positions.is_empty() {
            return Ok(());
        }

        *self.deletes.lock().unwrap() += 1;

        if self.fail_writes {
            return Err(Error::WriteFailed("the test store rejects writes".to_owned()));
        }

        let mut rows = self.rows.lock().unwrap();
        check_positions(positions, rows.len())?;
        *rows = remove_positions(std::mem::take(&mut *rows), positions);

        Ok(())
    }
}
