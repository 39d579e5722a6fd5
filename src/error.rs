use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinnacleError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A query was requested with no selector value chosen.
    #[error("Nothing selected: {0}")]
    NothingSelected(String),

    /// Headers or a query were requested with no time grain active.
    #[error("No time grain selected — choose monthly or quarterly")]
    GrainNotSelected,

    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("Unknown product line: {0}")]
    UnknownProductLine(String),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PinnacleError>;
