// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AccountRecord, BackendResponse, CombinePolicy, FilterSelection, FilterTag, SetKey, UserNetwork, INVALID_HANDLE};
pub use requests::CompareRequest;
pub use responses::{ActorSummary, ComparisonReport, ErrorResponse, SearchActorsResponse};
