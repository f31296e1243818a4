//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::{Error, store::RecordStore, timezone::get_local_offset, transaction::Categories};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// Where transactions are loaded from and saved to.
    pub store: Arc<dyn RecordStore>,

    /// The local timezone as a canonical timezone name, e.g. "Europe/Istanbul".
    pub local_timezone: String,

    /// The categories offered when recording a transaction.
    pub categories: Categories,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Europe/Istanbul".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        store: Arc<dyn RecordStore>,
        local_timezone: &str,
        categories: Categories,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            store,
            local_timezone: local_timezone.to_owned(),
            categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{AppState, Error, test_utils::RecordingStore, transaction::Categories};

    #[test]
    fn rejects_unknown_timezone() {
        let result = AppState::new(
            Arc::new(RecordingStore::default()),
            "Not/A_Zone",
            Categories::default(),
        );

        assert!(matches!(result, Err(Error::InvalidTimezoneError(_))));
    }
}
