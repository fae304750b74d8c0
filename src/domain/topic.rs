use std::str::FromStr;

use uuid::Uuid;

use crate::domain::error::DomainError;

/// Parses the hyphenated string form of a topic id, as printed by `Uuid::to_string`.
pub fn parse_topic_id(s: &str) -> Result<Uuid, DomainError> {
    Uuid::from_str(s).map_err(|_| DomainError::InvalidTopicId(s.to_string()))
}

/// One partition of a topic, resolved from the cluster metadata log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionData {
    pub partition_id: i32,
    pub topic_id: Uuid,
    pub replicas: Vec<i32>,
    pub in_sync_replicas: Vec<i32>,
    pub leader: i32,
    pub leader_epoch: i32,
    pub partition_epoch: i32,
}

impl PartitionData {
    pub fn new(
        partition_id: i32,
        topic_id: Uuid,
        replicas: Vec<i32>,
        in_sync_replicas: Vec<i32>,
        leader: i32,
        leader_epoch: i32,
        partition_epoch: i32,
    ) -> Self {
        Self {
            partition_id,
            topic_id,
            replicas,
            in_sync_replicas,
            leader,
            leader_epoch,
            partition_epoch,
        }
    }
}
