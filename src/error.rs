//! Error definitions.
use std::{io, path::PathBuf};

use thiserror::Error;

/// Crate-wide result type
pub type Result<T, E = DatasetError> = std::result::Result<T, E>;

/// Failure to turn a song dataset into records.
///
/// The hash table itself never fails; lookups and removals report absence with `Option`.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be opened or read.
    #[error("failed to read dataset {}: {source}", path.display())]
    Io {
        /// Path of the dataset file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
    /// The input is not a JSON array of song objects.
    #[error("malformed song dataset: {0}")]
    Json(#[from] serde_json::Error),
    /// A record holds a field value that cannot be converted.
    #[error("record {index}: field `{field}` has invalid value {value:?}")]
    InvalidField {
        /// Position of the record in the dataset
        index: usize,
        /// Name of the offending field
        field: &'static str,
        /// The value as it appeared in the input
        value: String,
    },
}
