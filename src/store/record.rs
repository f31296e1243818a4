//! The row layout shared by every backing store.
//!
//! A stored row has five columns named by the header row. Columns are located
//! by name so a table with re-ordered or extra columns still loads.

use rust_decimal::Decimal;
use time::PrimitiveDateTime;

use crate::{
    Error,
    transaction::{
        TIMESTAMP_FORMAT, Transaction, TransactionKind, format_amount, max_amount, parse_amount,
    },
};

/// The header row written to a new table, in column order.
pub const HEADER: [&str; 5] = ["Tarih", "Tür", "Kategori", "Açıklama", "Tutar"];

const TIMESTAMP_COLUMN: &str = HEADER[0];
const KIND_COLUMN: &str = HEADER[1];
const CATEGORY_COLUMN: &str = HEADER[2];
const NOTE_COLUMN: &str = HEADER[3];
const AMOUNT_COLUMN: &str = HEADER[4];

/// The index of each required column within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    timestamp: usize,
    kind: usize,
    category: usize,
    note: usize,
    amount: usize,
    width: usize,
}

impl Default for ColumnMap {
    /// The layout of [HEADER].
    fn default() -> Self {
        Self {
            timestamp: 0,
            kind: 1,
            category: 2,
            note: 3,
            amount: 4,
            width: HEADER.len(),
        }
    }
}

impl ColumnMap {
    /// Locate the required columns in a header row.
    ///
    /// # Errors
    /// Returns [Error::MalformedRecord] for row 1 if a required column is missing.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self, Error> {
        let names: Vec<&str> = header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.as_ref().trim();
                // Spreadsheet exports often start with a byte order mark.
                if i == 0 {
                    name.trim_start_matches('\u{feff}')
                } else {
                    name
                }
            })
            .collect();

        let find = |column: &str| {
            names
                .iter()
                .position(|name| *name == column)
                .ok_or_else(|| Error::MalformedRecord {
                    row: 1,
                    reason: format!("the header has no \"{column}\" column"),
                })
        };

        Ok(Self {
            timestamp: find(TIMESTAMP_COLUMN)?,
            kind: find(KIND_COLUMN)?,
            category: find(CATEGORY_COLUMN)?,
            note: find(NOTE_COLUMN)?,
            amount: find(AMOUNT_COLUMN)?,
            width: names.len(),
        })
    }

    /// Decode one stored row.
    ///
    /// `row` is the 1-based row number in the backing store, used for error
    /// messages. Cells past the end of a short row are treated as empty.
    /// The note is read exactly as stored, every other cell is trimmed.
    ///
    /// # Errors
    /// Returns [Error::MalformedRecord] if the timestamp, kind or amount cannot
    /// be parsed, or if the amount is negative or above [max_amount].
    pub fn decode<S: AsRef<str>>(&self, cells: &[S], row: usize) -> Result<Transaction, Error> {
        let raw_cell = |index: usize| cells.get(index).map(|cell| cell.as_ref()).unwrap_or("");
        let cell = |index: usize| raw_cell(index).trim();

        let timestamp_text = cell(self.timestamp);
        let timestamp = PrimitiveDateTime::parse(timestamp_text, TIMESTAMP_FORMAT).map_err(|_| {
            Error::MalformedRecord {
                row,
                reason: format!("invalid timestamp \"{timestamp_text}\""),
            }
        })?;

        let kind_text = cell(self.kind);
        let kind =
            TransactionKind::from_stored_value(kind_text).ok_or_else(|| Error::MalformedRecord {
                row,
                reason: format!("invalid type \"{kind_text}\""),
            })?;

        let amount_text = cell(self.amount);
        let amount = parse_amount(amount_text).ok_or_else(|| Error::MalformedRecord {
            row,
            reason: format!("invalid amount \"{amount_text}\""),
        })?;

        if amount < Decimal::ZERO {
            return Err(Error::MalformedRecord {
                row,
                reason: format!("negative amount \"{amount_text}\""),
            });
        }

        if amount.round_dp(2) > max_amount() {
            return Err(Error::MalformedRecord {
                row,
                reason: format!("amount \"{amount_text}\" is too large"),
            });
        }

        Ok(Transaction {
            timestamp,
            kind,
            category: cell(self.category).to_owned(),
            note: raw_cell(self.note).to_owned(),
            amount: amount.round_dp(2),
        })
    }

    /// Encode a transaction as a row with this map's column layout.
    ///
    /// Columns other than the required five are left empty.
    pub fn encode(&self, transaction: &Transaction) -> Vec<String> {
        let mut cells = vec![String::new(); self.width];

        cells[self.timestamp] = transaction.formatted_timestamp();
        cells[self.kind] = transaction.kind.stored_value().to_owned();
        cells[self.category] = transaction.category.clone();
        cells[self.note] = transaction.note.clone();
        cells[self.amount] = format_amount(transaction.amount);

        cells
    }
}

/// Whether every cell in a row is empty or whitespace.
pub fn is_blank<S: AsRef<str>>(cells: &[S]) -> bool {
    cells.iter().all(|cell| cell.as_ref().trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::{
        Error,
        store::record::{ColumnMap, HEADER, is_blank},
        transaction::TransactionKind,
    };

    #[test]
    fn decodes_row_in_header_order() {
        let columns = ColumnMap::from_header(&HEADER).unwrap();

        let transaction = columns
            .decode(
                &["2024-03-05 14:30", "Gider", "Food", "lunch", "12,5"],
                2,
            )
            .unwrap();

        assert_eq!(transaction.timestamp, datetime!(2024-03-05 14:30));
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(transaction.category, "Food");
        assert_eq!(transaction.note, "lunch");
        assert_eq!(transaction.amount, Decimal::from_str("12.50").unwrap());
    }

    #[test]
    fn locates_reordered_columns_and_ignores_extra_ones() {
        let columns =
            ColumnMap::from_header(&["Tutar", "Not used", "Kategori", "Tarih", "Açıklama", "Tür"])
                .unwrap();

        let transaction = columns
            .decode(&["40", "x", "Salary", "2024-03-01 09:00", "", "Gelir"], 2)
            .unwrap();

        assert_eq!(transaction.kind, TransactionKind::Income);
        assert_eq!(transaction.amount, Decimal::from(40));
        assert_eq!(
            columns.encode(&transaction),
            vec!["40.00", "", "Salary", "2024-03-01 09:00", "", "Gelir"]
        );
    }

    #[test]
    fn header_with_byte_order_mark_is_accepted() {
        let result = ColumnMap::from_header(&["\u{feff}Tarih", "Tür", "Kategori", "Açıklama", "Tutar"]);

        assert_eq!(result, Ok(ColumnMap::default()));
    }

    #[test]
    fn missing_column_is_malformed_header() {
        let result = ColumnMap::from_header(&["Tarih", "Tür", "Kategori", "Tutar"]);

        assert!(matches!(result, Err(Error::MalformedRecord { row: 1, .. })));
    }

    #[test]
    fn invalid_amount_names_the_row() {
        let result = ColumnMap::default().decode(
            &["2024-03-05 14:30", "Gider", "Food", "", "abc"],
            4,
        );

        assert_eq!(
            result,
            Err(Error::MalformedRecord {
                row: 4,
                reason: "invalid amount \"abc\"".to_owned()
            })
        );
    }

    #[test]
    fn negative_amount_is_malformed() {
        let result = ColumnMap::default().decode(
            &["2024-03-05 14:30", "Gider", "Food", "", "-5"],
            3,
        );

        assert_eq!(
            result,
            Err(Error::MalformedRecord {
                row: 3,
                reason: "negative amount \"-5\"".to_owned()
            })
        );
    }

    #[test]
    fn amount_above_the_limit_is_malformed() {
        let result = ColumnMap::default().decode(
            &["2024-03-05 14:30", "Gelir", "Salary", "", "50000000000000000000000000000"],
            2,
        );

        assert!(matches!(result, Err(Error::MalformedRecord { row: 2, .. })));
    }

    #[test]
    fn note_is_read_without_trimming() {
        let transaction = ColumnMap::default()
            .decode(&[" 2024-03-05 14:30 ", " Gider", "Food ", "  indented note ", " 3 "], 2)
            .unwrap();

        assert_eq!(transaction.note, "  indented note ");
        assert_eq!(transaction.category, "Food");
        assert_eq!(transaction.amount, Decimal::from(3));
    }

    #[test]
    fn unknown_kind_is_malformed() {
        let result = ColumnMap::default().decode(
            &["2024-03-05 14:30", "Transfer", "Food", "", "1"],
            2,
        );

        assert!(matches!(result, Err(Error::MalformedRecord { row: 2, .. })));
    }

    #[test]
    fn short_row_treats_missing_note_as_empty() {
        let columns = ColumnMap::from_header(&["Tarih", "Tür", "Kategori", "Tutar", "Açıklama"])
            .unwrap();

        let transaction = columns
            .decode(&["2024-03-05 14:30", "Gider", "Food", "3"], 2)
            .unwrap();

        assert_eq!(transaction.note, "");
    }

    #[test]
    fn blank_rows_are_detected() {
        assert!(is_blank(&["", " ", ""]));
        assert!(is_blank::<&str>(&[]));
        assert!(!is_blank(&["", "x"]));
    }
}
