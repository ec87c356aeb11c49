use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),
    #[error("Invalid weight {weight} for edge {from} - {to}: distances must be non-negative")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },
    #[error("Degenerate query: start and destination are both {0}")]
    DegenerateQuery(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Graph lock poisoned by a panicked writer")]
    LockPoisoned,
}
