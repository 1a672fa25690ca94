use thiserror::Error;

/// Failures that abort a whole batch. Missing or malformed cells never end up here.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Failed to read roster from {locator}")]
    Read {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to download roster from {locator}")]
    Download {
        locator: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Roster {locator} is not a valid CSV table")]
    Csv {
        locator: String,
        #[source]
        source: csv::Error,
    },

    #[error("Roster {locator} is not valid JSON (line {line})")]
    Json {
        locator: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Roster {locator} row {row} is not a JSON object")]
    NotAnObject { locator: String, row: usize },

    #[error("Failed to open database {path}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to query the roster database")]
    Query(#[from] rusqlite::Error),

    #[error("Failed to store batch {batch_id}")]
    Persist {
        batch_id: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Batch {batch_id} stored {stored} members, expected {expected}")]
    CountMismatch {
        batch_id: String,
        stored: usize,
        expected: usize,
    },
}

pub type Result<T, E = RosterError> = std::result::Result<T, E>;
