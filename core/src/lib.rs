pub mod model;
pub mod parse;
pub mod scan;

pub use model::{SearchMatch, SearchRequest, SearchResponse, SearchResult, Tale};
