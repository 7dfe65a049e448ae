//! Public types for the Huginn API.

mod options;
mod payload;
mod result;

pub use options::{FetchOptions, RequestOptions, ResponseFormat};
pub use payload::Payload;
pub use result::FetchResult;
