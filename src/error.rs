use std::path::PathBuf;

use reqwest::StatusCode;

/// Failures talking to the price API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Error sending GET request to {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET Request to {endpoint} failed! {status} Response text: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("Could not turn the response from {endpoint} into json: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{field} can't be used as an HTTP header value: {value:?}")]
    InvalidHeader { field: &'static str, value: String },

    #[error("Build of the price api client failed: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failures locating, reading or writing the workbook.
#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    #[error("Workbook not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Sheet {0:?} not found in workbook")]
    SheetNotFound(String),

    #[error("{0:?} is not a valid cell reference")]
    InvalidCell(String),

    #[error("Couldnt read spreadsheet {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Couldnt write to spreadsheet {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },

    #[error("Spreadsheet application error: {0}")]
    Host(String),
}

/// Everything that can end a sync run early.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Request identity and contact e-mail must be provided in the Config sheet")]
    MissingConfiguration {
        identity: Option<String>,
        contact: Option<String>,
    },

    #[error(transparent)]
    RemoteFetch(#[from] FetchError),

    #[error(transparent)]
    WorkbookAccess(#[from] WorkbookError),
}

impl SyncError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            SyncError::MissingConfiguration { .. } => 1,
            SyncError::RemoteFetch(_) | SyncError::WorkbookAccess(_) => 2,
        }
    }
}
