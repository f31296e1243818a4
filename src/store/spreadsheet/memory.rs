//! An in-memory [Sheet] so the spreadsheet store can be tested without network access.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{Error, store::spreadsheet::sheet::Sheet};

#[derive(Debug, Default)]
pub(crate) struct MemorySheet {
    rows: Mutex<Vec<Vec<String>>>,
    fail_writes: bool,
    write_count: Mutex<usize>,
}

impl MemorySheet {
    pub(crate) fn with_rows(rows: Vec<Vec<&str>>) -> Self {
        Self {
            rows: Mutex::new(
                rows.into_iter()
                    .map(|row| row.into_iter().map(str::to_owned).collect())
                    .collect(),
            ),
            ..Default::default()
        }
    }

    pub(crate) fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub(crate) fn snapshot(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    pub(crate) fn write_count(&self) -> usize {
        *self.write_count.lock().unwrap()
    }
}

#[async_trait]
impl Sheet for MemorySheet {
    /// Like the Sheets API, rows after the last one with data are left out.
    async fn rows(&self) -> Result<Vec<Vec<String>>, Error> {
        let mut rows = self.snapshot();

        while rows
            .last()
            .is_some_and(|row| row.iter().all(String::is_empty))
        {
            rows.pop();
        }

        Ok(rows)
    }

    async fn write_rows(&self, first_row: usize, rows: Vec<Vec<String>>) -> Result<(), Error> {
        *self.write_count.lock().unwrap() += 1;

        if self.fail_writes {
            return Err(Error::WriteFailed("the sheet rejected the write".to_owned()));
        }

        let mut stored = self.rows.lock().unwrap();
        let end = first_row + rows.len();
        if stored.len() < end {
            stored.resize(end, Vec::new());
        }

        for (index, row) in rows.into_iter().enumerate() {
            stored[first_row + index] = row;
        }

        Ok(())
    }
}
