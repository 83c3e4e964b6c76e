pub mod error;
pub mod openai;
pub mod traits;
pub mod types;

pub use error::ExtractionError;
pub use openai::OpenAiExtractor;
pub use traits::CriteriaExtractor;
pub use types::ExtractedFields;
