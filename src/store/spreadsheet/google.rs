//! Implements [Sheet] with the `sheets` client, authorized as a Google service account.

use std::{fmt, path::Path};

use async_trait::async_trait;
use sheets::types::{
    BatchUpdateValuesRequest, DateTimeRenderOption, Dimension, ValueInputOption, ValueRange,
    ValueRenderOption,
};
use tokio::sync::OnceCell;
use url::Url;
use yup_oauth2::{ServiceAccountAuthenticator, authenticator::DefaultAuthenticator};

use crate::{
    Error,
    store::spreadsheet::sheet::{Sheet, table_range},
};

const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];
const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";
/// The table columns of the first worksheet.
const TABLE_RANGE: &str = "A:E";

/// How to find the spreadsheet holding the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetLocator {
    /// Search the files shared with the service account for this title.
    Name(String),
    /// The ID from the spreadsheet's URL.
    Id(String),
}

impl fmt::Display for SpreadsheetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpreadsheetLocator::Name(name) => write!(f, "named \"{name}\""),
            SpreadsheetLocator::Id(id) => write!(f, "with ID {id}"),
        }
    }
}

/// The first worksheet of a Google spreadsheet shared with a service account.
pub struct GoogleSheet {
    auth: DefaultAuthenticator,
    http: reqwest::Client,
    locator: SpreadsheetLocator,
    spreadsheet_id: OnceCell<String>,
}

impl GoogleSheet {
    /// Create a sheet authorized by the service account key at `key_path`.
    ///
    /// The spreadsheet itself is not looked up until the first request.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the key file cannot be read or the
    /// authenticator cannot be created.
    pub async fn open(key_path: &Path, locator: SpreadsheetLocator) -> Result<Self, Error> {
        let key = yup_oauth2::read_service_account_key(key_path)
            .await
            .map_err(|error| {
                tracing::error!("could not read {}: {error}", key_path.display());
                Error::StoreUnavailable(format!(
                    "could not read the credentials file {}: {error}",
                    key_path.display()
                ))
            })?;

        let auth = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|error| {
                tracing::error!("could not create the service account authenticator: {error}");
                Error::StoreUnavailable(format!("could not authorize the service account: {error}"))
            })?;

        Ok(Self {
            auth,
            http: reqwest::Client::new(),
            locator,
            spreadsheet_id: OnceCell::new(),
        })
    }

    /// A valid access token. The authenticator caches tokens and refreshes
    /// them shortly before they expire.
    async fn access_token(&self) -> Result<String, String> {
        let token = self
            .auth
            .token(SCOPES)
            .await
            .map_err(|error| format!("could not authorize the service account: {error}"))?;

        token
            .token()
            .map(str::to_owned)
            .ok_or_else(|| "the authorization server returned no access token".to_owned())
    }

    /// A `sheets` client using a fresh access token.
    async fn client(&self) -> Result<sheets::Client, String> {
        let access_token = self.access_token().await?;

        // Only the access token is used for API calls.
        Ok(sheets::Client::new(
            String::new(),
            String::new(),
            String::new(),
            access_token,
            String::new(),
        ))
    }

    async fn spreadsheet_id(&self) -> Result<&str, Error> {
        self.spreadsheet_id
            .get_or_try_init(|| async {
                match &self.locator {
                    SpreadsheetLocator::Id(id) => Ok(id.clone()),
                    SpreadsheetLocator::Name(name) => {
                        self.find_spreadsheet_id(name).await.map_err(|error| {
                            tracing::error!(
                                "could not open the spreadsheet {}: {error}",
                                self.locator
                            );
                            Error::StoreUnavailable(format!(
                                "could not open the spreadsheet {}: {error}",
                                self.locator
                            ))
                        })
                    }
                }
            })
            .await
            .map(String::as_str)
    }

    /// Search Drive for a spreadsheet called `name`.
    async fn find_spreadsheet_id(&self, name: &str) -> Result<String, String> {
        let url = drive_search_url(name)?;
        let access_token = self.access_token().await?;

        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|error| format!("could not reach Google Drive: {error}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Google Drive search failed with status {status}: {body}"));
        }

        let files: serde_json::Value = response
            .json()
            .await
            .map_err(|error| format!("could not parse the Google Drive response: {error}"))?;

        let id = first_file_id(&files).ok_or_else(|| {
            format!("no spreadsheet named \"{name}\" is shared with the service account")
        })?;
        tracing::info!("Found spreadsheet {id} named \"{name}\"");

        Ok(id)
    }
}

#[async_trait]
impl Sheet for GoogleSheet {
    async fn rows(&self) -> Result<Vec<Vec<String>>, Error> {
        let spreadsheet_id = self.spreadsheet_id().await?;

        let read = async {
            let client = self.client().await?;
            client
                .spreadsheets()
                .values_get(
                    spreadsheet_id,
                    TABLE_RANGE,
                    DateTimeRenderOption::FormattedString,
                    Dimension::Rows,
                    ValueRenderOption::FormattedValue,
                )
                .await
                .map_err(|error| error.to_string())
        };

        let response = read.await.map_err(|error| {
            tracing::error!("could not read the spreadsheet: {error}");
            Error::StoreUnavailable(format!("could not read the spreadsheet: {error}"))
        })?;

        Ok(response.body.values)
    }

    async fn write_rows(&self, first_row: usize, rows: Vec<Vec<String>>) -> Result<(), Error> {
        let spreadsheet_id = self
            .spreadsheet_id()
            .await
            .map_err(|error| Error::WriteFailed(error.to_string()))?;
        let request = write_request(first_row, rows);

        let write = async {
            let client = self.client().await?;
            client
                .spreadsheets()
                .values_batch_update(spreadsheet_id, &request)
                .await
                .map_err(|error| error.to_string())
        };

        write.await.map(|_| ()).map_err(|error| {
            tracing::error!("could not write to the spreadsheet: {error}");
            Error::WriteFailed(format!("could not write to the spreadsheet: {error}"))
        })
    }
}

/// A request storing `rows` as text from row `first_row` onwards.
fn write_request(first_row: usize, rows: Vec<Vec<String>>) -> BatchUpdateValuesRequest {
    BatchUpdateValuesRequest {
        data: vec![ValueRange {
            major_dimension: Some(Dimension::Rows),
            range: table_range(first_row, rows.len()),
            values: rows,
        }],
        include_values_in_response: Some(false),
        response_date_time_render_option: None,
        response_value_render_option: None,
        // Stored as typed, so notes are never read as formulas.
        value_input_option: Some(ValueInputOption::Raw),
    }
}

/// The Drive `files.list` URL searching for a spreadsheet called `name`.
fn drive_search_url(name: &str) -> Result<Url, String> {
    let query = format!(
        "name = '{}' and mimeType = '{SPREADSHEET_MIME_TYPE}' and trashed = false",
        name.replace('\\', "\\\\").replace('\'', "\\'")
    );

    let mut url = Url::parse(DRIVE_FILES_API).map_err(|error| error.to_string())?;
    url.query_pairs_mut()
        .append_pair("q", &query)
        .append_pair("fields", "files(id,name)")
        .append_pair("pageSize", "1");

    Ok(url)
}

/// The ID of the first file in a Drive `files.list` response.
fn first_file_id(response: &serde_json::Value) -> Option<String> {
    response
        .get("files")?
        .get(0)?
        .get("id")?
        .as_str()
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sheets::types::{Dimension, ValueInputOption};

    use super::{drive_search_url, first_file_id, write_request};

    #[test]
    fn drive_search_escapes_quotes() {
        let url = drive_search_url("Bob's ledger").unwrap();

        let query = url
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned());

        assert_eq!(
            query.as_deref(),
            Some(
                "name = 'Bob\\'s ledger' and \
                mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false"
            )
        );
    }

    #[test]
    fn finds_first_file_id() {
        let response = json!({ "files": [{ "id": "abc123", "name": "ButceVerileri" }] });

        assert_eq!(first_file_id(&response), Some("abc123".to_owned()));
        assert_eq!(first_file_id(&json!({ "files": [] })), None);
        assert_eq!(first_file_id(&json!({})), None);
    }

    #[test]
    fn writes_rows_as_raw_text_from_the_given_row() {
        let rows = vec![vec!["2024-03-05 09:00".to_owned(), "Gider".to_owned()]; 2];

        let request = write_request(3, rows.clone());

        assert_eq!(request.data.len(), 1);
        assert_eq!(request.data[0].range, "A4:E5");
        assert_eq!(request.data[0].values, rows);
        assert!(matches!(request.data[0].major_dimension, Some(Dimension::Rows)));
        assert!(matches!(request.value_input_option, Some(ValueInputOption::Raw)));
    }
}
