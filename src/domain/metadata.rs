use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::topic::{parse_topic_id, PartitionData};

/// Partition directory built once from the cluster metadata log.
///
/// Both indexes hold the partitions in log order. The cache is never mutated
/// after construction, so it is shared between connections behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataCache {
    by_name: HashMap<String, Vec<PartitionData>>,
    by_id: HashMap<Uuid, Vec<PartitionData>>,
}

impl MetadataCache {
    pub fn new(
        by_name: HashMap<String, Vec<PartitionData>>,
        by_id: HashMap<Uuid, Vec<PartitionData>>,
    ) -> Self {
        Self { by_name, by_id }
    }

    pub fn partitions_by_name(&self, topic_name: &str) -> Option<&[PartitionData]> {
        self.by_name.get(topic_name).map(Vec::as_slice)
    }

    pub fn partitions_by_topic_id(&self, topic_id: &Uuid) -> Option<&[PartitionData]> {
        self.by_id.get(topic_id).map(Vec::as_slice)
    }

    /// Lookup by the hyphenated string form of the topic id.
    pub fn partitions_by_topic_id_str(
        &self,
        topic_id: &str,
    ) -> Result<Option<&[PartitionData]>, DomainError> {
        let id = parse_topic_id(topic_id)?;
        Ok(self.partitions_by_topic_id(&id))
    }

    pub fn topic_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn partition_count(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
