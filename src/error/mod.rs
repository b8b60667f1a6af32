use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} failed with HTTP {status}")]
    Status { status: u16, url: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no country data could be loaded from any source")]
    NoCountries,

    #[error("cannot generate a question from an empty country pool")]
    EmptyPool,

    #[error("unknown difficulty level: {0}")]
    UnknownDifficulty(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
