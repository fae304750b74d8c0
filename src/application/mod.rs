pub mod broker;
pub mod error;

pub use broker::KafkaBroker;
pub use error::{ApplicationError, Result};
