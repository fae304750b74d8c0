use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::PartitionData;
use crate::Result;

/// Read-only view of the cluster's topic/partition directory.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Partitions of `topic_name` in log order, `None` if the topic is unknown.
    async fn get_partitions_by_name(&self, topic_name: &str) -> Result<Option<Vec<PartitionData>>>;

    async fn get_partitions_by_topic_id(
        &self,
        topic_id: &Uuid,
    ) -> Result<Option<Vec<PartitionData>>>;
}
