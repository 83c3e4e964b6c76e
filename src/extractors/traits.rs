use crate::extractors::error::ExtractionError;
use crate::extractors::types::ExtractedFields;
use async_trait::async_trait;

/// Common trait for all semantic criteria extractors
/// The interpreter only depends on this, so providers can be swapped freely
#[async_trait]
pub trait CriteriaExtractor: Send + Sync {
    /// Extract search criteria from the raw query text
    async fn extract(&self, query: &str) -> Result<ExtractedFields, ExtractionError>;

    /// Get the name of the extractor backend
    fn name(&self) -> &'static str;
}
