//! The minimal set of worksheet operations the spreadsheet store needs.

use async_trait::async_trait;

use crate::Error;

/// One worksheet of a spreadsheet, addressed by 0-based row index where row 0
/// is the header.
#[async_trait]
pub trait Sheet: Send + Sync {
    /// Every row of the worksheet up to the last one with data, including the
    /// header, with each cell as text.
    ///
    /// Trailing empty cells may be missing from a row.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the worksheet cannot be read.
    async fn rows(&self) -> Result<Vec<Vec<String>>, Error>;

    /// Overwrite the worksheet with `rows` starting at row `first_row`, in a
    /// single request. Cells are stored as text, exactly as given.
    ///
    /// # Errors
    /// Returns [Error::WriteFailed] if the rows could not be written.
    async fn write_rows(&self, first_row: usize, rows: Vec<Vec<String>>) -> Result<(), Error>;
}

/// The A1 range covering the table columns of rows `first_row..first_row + count`,
/// e.g. `A2:E4` for three rows after the header.
///
/// Ranges without a sheet name refer to the first worksheet.
pub(crate) fn table_range(first_row: usize, count: usize) -> String {
    let first = first_row + 1;
    let last = first_row + count.max(1);

    format!("A{first}:E{last}")
}
