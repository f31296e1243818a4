//! A [RecordStore] backed by the first worksheet of a Google spreadsheet.
//!
//! The worksheet keeps rows oldest first, so a new row is written after the
//! last row with data. Rows are reversed on load, and a delete rewrites the
//! rows that remain over the old table.

mod google;
#[cfg(test)]
mod memory;
mod sheet;

use std::collections::BTreeSet;

use async_trait::async_trait;

pub use google::{GoogleSheet, SpreadsheetLocator};
#[cfg(test)]
pub(crate) use memory::MemorySheet;
use sheet::Sheet;

use crate::{
    Error,
    store::{
        RecordStore, check_positions,
        record::{ColumnMap, HEADER, is_blank},
    },
    transaction::Transaction,
};

/// Stores the table in a spreadsheet worksheet.
pub struct SpreadsheetStore<S> {
    sheet: S,
}

impl<S: Sheet> SpreadsheetStore<S> {
    pub fn new(sheet: S) -> Self {
        Self { sheet }
    }

    #[cfg(test)]
    pub(crate) fn sheet(&self) -> &S {
        &self.sheet
    }

    /// The worksheet row index of each data row, oldest first.
    fn data_row_indices(rows: &[Vec<String>]) -> Vec<usize> {
        rows.iter()
            .enumerate()
            .skip(1)
            .filter(|(_, row)| !is_blank(row.as_slice()))
            .map(|(index, _)| index)
            .collect()
    }
}

#[async_trait]
impl<S: Sheet> RecordStore for SpreadsheetStore<S> {
    async fn load(&self) -> Result<Vec<Transaction>, Error> {
        let rows = self.sheet.rows().await?;

        let Some(header) = rows.first() else {
            return Ok(Vec::new());
        };
        let columns = ColumnMap::from_header(header.as_slice())?;

        let mut transactions = Self::data_row_indices(&rows)
            .into_iter()
            // Worksheet row numbers start at 1.
            .map(|index| columns.decode(rows[index].as_slice(), index + 1))
            .collect::<Result<Vec<_>, _>>()?;
        transactions.reverse();

        tracing::debug!("Loaded {} rows from the spreadsheet", transactions.len());

        Ok(transactions)
    }

    async fn append(&self, transaction: Transaction) -> Result<(), Error> {
        let rows = self.sheet.rows().await?;

        let (first_row, new_rows) = match rows.first().filter(|header| !is_blank(header.as_slice()))
        {
            Some(header) => {
                let columns = ColumnMap::from_header(header.as_slice())?;
                (rows.len(), vec![columns.encode(&transaction)])
            }
            None => {
                tracing::info!("The spreadsheet is empty, writing the header row");
                let header = HEADER.iter().map(|&name| name.to_owned()).collect();
                (0, vec![header, ColumnMap::default().encode(&transaction)])
            }
        };

        self.sheet.write_rows(first_row, new_rows).await?;
        tracing::info!("Added a row to the spreadsheet");

        Ok(())
    }

    async fn delete(&self, positions: &BTreeSet<usize>) -> Result<(), Error> {
        if positions.is_empty() {
            return Ok(());
        }

        let rows = self.sheet.rows().await?;
        let indices = Self::data_row_indices(&rows);
        check_positions(positions, indices.len())?;

        let newest = indices.len() - 1;
        let removed = positions
            .iter()
            .map(|&position| indices[newest - position])
            .collect::<BTreeSet<_>>();

        let table_len = rows.len();
        let remaining = rows
            .into_iter()
            .enumerate()
            .filter(|(index, _)| !removed.contains(index))
            .map(|(_, row)| row)
            .collect();

        self.sheet
            .write_rows(0, padded_table(remaining, table_len))
            .await?;
        tracing::info!("Deleted {} rows from the spreadsheet", removed.len());

        Ok(())
    }
}

/// Pad `rows` with blank rows up to `len` rows and every row to the table
/// width, so writing them over a table of `len` rows leaves no old cells behind.
fn padded_table(mut rows: Vec<Vec<String>>, len: usize) -> Vec<Vec<String>> {
    let width = rows
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or_default()
        .max(HEADER.len());

    rows.resize(len.max(rows.len()), Vec::new());
    for row in &mut rows {
        row.resize(width, String::new());
    }

    rows
}
