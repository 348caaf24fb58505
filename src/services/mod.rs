// Service exports
pub mod backend;
pub mod cache;
pub mod search;

pub use backend::{BackendClient, BackendError};
pub use cache::{CacheKey, NetworkCache};
pub use search::{SearchClient, SearchError};
