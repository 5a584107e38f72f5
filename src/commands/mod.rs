//! Entry points for callers of the library.
//!
//! - [`convert`]: Run a batch on the current tokio runtime
//! - [`convert_with_codec`]: Same, with a custom [`ImageCodec`](crate::processing::ImageCodec)
//! - [`execute`]: Callback-based, runs the batch on its own thread

mod convert;

pub use convert::*;
