//! Remote file search.
//!
//! The engine talks to the search API through the [`SearchTransport`] trait,
//! which returns raw XML bodies; [`parse_search_response`] turns those into
//! [`CandidateFile`] records.

mod dedup;
mod response;
mod types;
mod webshare;

pub use dedup::{deduplicate_candidates, CandidateSet};
pub use response::parse_search_response;
pub use types::*;
pub use webshare::WebshareTransport;
