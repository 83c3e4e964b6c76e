pub mod heuristic;
pub mod merge;
pub mod ranking;

pub use merge::merge;
pub use ranking::filter_and_rank;

use crate::extractors::{CriteriaExtractor, ExtractedFields, ExtractionError};
use crate::models::{Listing, ScoredListing, SearchCriteria};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(15);

/// Result of interpreting one query
#[derive(Debug, Default)]
pub struct Interpretation {
    /// Merged criteria used for filtering
    pub criteria: SearchCriteria,
    /// Raw output of the external extractor, when it succeeded
    pub external: Option<ExtractedFields>,
    /// Why the external extractor was skipped, when it failed
    pub extraction_error: Option<ExtractionError>,
}

/// Turns free-text queries into criteria and ranks listings against them
pub struct QueryInterpreter {
    extractor: Option<Arc<dyn CriteriaExtractor>>,
    timeout: Duration,
}

impl QueryInterpreter {
    /// Interpreter that only uses the heuristic scan
    pub fn heuristic_only() -> Self {
        Self {
            extractor: None,
            timeout: DEFAULT_EXTRACT_TIMEOUT,
        }
    }

    /// Interpreter that asks `extractor` first, bounded by `timeout`
    pub fn with_extractor(extractor: Arc<dyn CriteriaExtractor>, timeout: Duration) -> Self {
        Self {
            extractor: Some(extractor),
            timeout,
        }
    }

    pub fn extractor_name(&self) -> Option<&'static str> {
        self.extractor.as_ref().map(|e| e.name())
    }

    /// Extract criteria from `query`.
    ///
    /// Never fails: an extractor error or timeout is logged, reported in
    /// [`Interpretation::extraction_error`], and the heuristic result is used
    /// for every field.
    pub async fn extract_criteria(&self, query: &str) -> Interpretation {
        if query.trim().is_empty() {
            debug!("Blank query, returning empty criteria");
            return Interpretation::default();
        }

        let heuristic_fields = heuristic::extract(query);
        debug!("Heuristic fields: {:?}", heuristic_fields);

        let Some(extractor) = &self.extractor else {
            return Interpretation {
                criteria: merge(ExtractedFields::default(), heuristic_fields),
                ..Default::default()
            };
        };

        let outcome = match tokio::time::timeout(self.timeout, extractor.extract(query)).await {
            Ok(result) => result,
            Err(_) => Err(ExtractionError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(fields) => {
                info!("{} extracted: {:?}", extractor.name(), fields);
                Interpretation {
                    criteria: merge(fields.clone(), heuristic_fields),
                    external: Some(fields),
                    extraction_error: None,
                }
            }
            Err(e) => {
                warn!("{} extraction failed, using heuristics only: {}", extractor.name(), e);
                Interpretation {
                    criteria: merge(ExtractedFields::default(), heuristic_fields),
                    external: None,
                    extraction_error: Some(e),
                }
            }
        }
    }

    /// See [`ranking::filter_and_rank`]
    pub fn filter_and_rank<'a>(
        &self,
        listings: &'a [Listing],
        criteria: &SearchCriteria,
        limit: usize,
    ) -> Vec<ScoredListing<'a>> {
        filter_and_rank(listings, criteria, limit)
    }
}

impl Default for QueryInterpreter {
    fn default() -> Self {
        Self::heuristic_only()
    }
}
