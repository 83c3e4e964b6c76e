//! Natural-language rental search.
//!
//! [`QueryInterpreter`] turns a free-text query into [`SearchCriteria`], using
//! an optional [`CriteriaExtractor`] with per-field heuristic fallback, and
//! ranks a table of [`Listing`]s against them.

pub mod config;
pub mod extractors;
pub mod interpreter;
pub mod listings;
pub mod models;

pub use extractors::{CriteriaExtractor, ExtractedFields, ExtractionError, OpenAiExtractor};
pub use interpreter::{filter_and_rank, Interpretation, QueryInterpreter};
pub use models::{Listing, ScoredListing, SearchCriteria};
