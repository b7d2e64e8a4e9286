//! Specification ingestion: file loading, inline markup, and conversion of
//! decoded documents into examinations.

pub mod error;
pub mod loader;
pub mod markup;
pub mod specification;

pub use error::{IngestError, Result};
pub use loader::{SpecificationFormat, load_documents, split_documents};
pub use markup::text_segment;
pub use specification::parse_specification;
