mod pool;
mod error;

pub use pool::{WorkerPool, WorkerSlot};
pub use error::{WorkerError, WorkerResult};
