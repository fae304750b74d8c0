use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::read;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::adapters::protocol::dto::kraft::{RecordBatch, RecordKind};
use crate::adapters::protocol::kraft_record_parser::KraftRecordParser;
use crate::application::error::ApplicationError;
use crate::domain::{MetadataCache, PartitionData};
use crate::ports::outgoing::metadata_store::MetadataStore;
use crate::Result;

/// Resolves the records of every batch into a [`MetadataCache`].
///
/// Topic records are collected first so that a partition can precede its
/// topic in the log. Partitions whose topic id never appears are dropped.
pub fn build_index(batches: &[RecordBatch]) -> MetadataCache {
    let records = || batches.iter().flat_map(|batch| batch.records.iter());

    // 1차: topic id -> topic name
    let mut names_by_id: HashMap<Uuid, String> = HashMap::new();
    for kind in records().filter_map(|rec| rec.kind()) {
        if let RecordKind::Topic(topic) = kind {
            names_by_id.insert(topic.topic_id, topic.topic_name.clone());
        }
    }

    // 2차: partition 을 이름/ID 양쪽 인덱스에 추가
    let mut by_name: HashMap<String, Vec<PartitionData>> = HashMap::new();
    let mut by_id: HashMap<Uuid, Vec<PartitionData>> = HashMap::new();
    for kind in records().filter_map(|rec| rec.kind()) {
        let RecordKind::Partition(p) = kind else {
            continue;
        };
        let Some(topic_name) = names_by_id.get(&p.topic_id) else {
            debug!(
                topic_id = %p.topic_id,
                partition_id = p.partition_id,
                "partition without topic record"
            );
            continue;
        };

        let partition = PartitionData::new(
            p.partition_id,
            p.topic_id,
            p.replicas.clone(),
            p.in_sync_replicas.clone(),
            p.leader_id,
            p.leader_epoch,
            p.partition_epoch,
        );
        by_name
            .entry(topic_name.clone())
            .or_default()
            .push(partition.clone());
        by_id.entry(p.topic_id).or_default().push(partition);
    }

    MetadataCache::new(by_name, by_id)
}

/// Metadata store backed by a KRaft `__cluster_metadata` log, read once.
#[derive(Debug, Clone, Default)]
pub struct KraftMetadataStore {
    cache: Arc<MetadataCache>,
}

impl KraftMetadataStore {
    pub fn from_cache(cache: MetadataCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Reads and indexes the whole log. A missing file is an `Io` error,
    /// undecodable content a `MetadataLog` error.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = read(path).await.map_err(ApplicationError::Io)?;
        let mut data = Bytes::from(content);
        let size = data.len();

        let batches = KraftRecordParser::new()
            .parse_log(&mut data)
            .map_err(|e| ApplicationError::MetadataLog(format!("{}: {}", path.display(), e)))?;
        let cache = build_index(&batches);

        info!(
            path = %path.display(),
            bytes = size,
            batches = batches.len(),
            topics = cache.topic_names().len(),
            partitions = cache.partition_count(),
            "loaded cluster metadata"
        );
        Ok(Self::from_cache(cache))
    }

    /// Like [`load`](Self::load), but falls back to an empty cache so the
    /// broker still starts and reports every topic as unknown.
    pub async fn open(path: &Path) -> Self {
        match Self::load(path).await {
            Ok(store) => store,
            Err(ApplicationError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    path = %path.display(),
                    "metadata log not found, starting with empty metadata"
                );
                Self::default()
            }
            Err(e) => {
                error!(
                    path = %path.display(),
                    error = %e,
                    "failed to load metadata log, starting with empty metadata"
                );
                Self::default()
            }
        }
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }
}

#[async_trait]
impl MetadataStore for KraftMetadataStore {
    async fn get_partitions_by_name(&self, topic_name: &str) -> Result<Option<Vec<PartitionData>>> {
        Ok(self.cache.partitions_by_name(topic_name).map(<[_]>::to_vec))
    }

    async fn get_partitions_by_topic_id(
        &self,
        topic_id: &Uuid,
    ) -> Result<Option<Vec<PartitionData>>> {
        Ok(self.cache.partitions_by_topic_id(topic_id).map(<[_]>::to_vec))
    }
}
