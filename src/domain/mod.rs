pub mod error;
pub mod metadata;
pub mod topic;

pub use error::DomainError;
pub use metadata::MetadataCache;
pub use topic::*;
