use async_trait::async_trait;

use crate::adapters::protocol::dto::{KafkaRequest, KafkaResponse};
use crate::Result;

/// Turns one decoded request into its response. An `Err` closes the
/// connection without a reply.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_request(&self, request: KafkaRequest) -> Result<KafkaResponse>;
}
