#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    InvalidTopicId(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidTopicId(id) => write!(f, "Invalid topic id: {}", id),
        }
    }
}

impl std::error::Error for DomainError {}
