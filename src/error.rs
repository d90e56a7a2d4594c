use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("issue fetch failed: {0}")]
    Fetch(String),
    #[error("malformed issue record: {0}")]
    MalformedRecord(String),
}

pub type AppResult<T> = Result<T, AppError>;
