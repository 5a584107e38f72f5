use crate::utils::ConverterError;

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Worker pool is closed: {0}")]
    Closed(String),

    #[error("Worker panicked: {0}")]
    Panicked(String),

    #[error("Worker was cancelled: {0}")]
    Cancelled(String),
}

pub type WorkerResult<T> = Result<T, WorkerError>;

impl From<tokio::sync::AcquireError> for WorkerError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        WorkerError::Closed(format!("Failed to acquire worker: {}", err))
    }
}

impl From<tokio::task::JoinError> for WorkerError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            WorkerError::Panicked(err.to_string())
        } else {
            WorkerError::Cancelled(err.to_string())
        }
    }
}

impl From<WorkerError> for ConverterError {
    fn from(err: WorkerError) -> Self {
        ConverterError::Worker(err.to_string())
    }
}
