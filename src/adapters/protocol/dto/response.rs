use uuid::Uuid;

use crate::adapters::protocol::constants::{
    API_VERSIONS_KEY, API_VERSIONS_MAX_VERSION, API_VERSIONS_MIN_VERSION,
    DESCRIBE_TOPIC_PARTITIONS_KEY, DESCRIBE_TOPIC_PARTITIONS_MAX_VERSION,
    DESCRIBE_TOPIC_PARTITIONS_MIN_VERSION, TOPIC_AUTHORIZED_OPERATIONS,
};
use crate::adapters::protocol::dto::ErrorCode;
use crate::domain::PartitionData;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiVersion {
    pub api_key: i16,
    pub min_version: i16,
    pub max_version: i16,
}

impl ApiVersion {
    pub fn new(api_key: i16, min_version: i16, max_version: i16) -> Self {
        Self {
            api_key,
            min_version,
            max_version,
        }
    }
}

/// Every API this broker advertises.
pub fn supported_api_versions() -> Vec<ApiVersion> {
    vec![
        ApiVersion::new(API_VERSIONS_KEY, API_VERSIONS_MIN_VERSION, API_VERSIONS_MAX_VERSION),
        ApiVersion::new(
            DESCRIBE_TOPIC_PARTITIONS_KEY,
            DESCRIBE_TOPIC_PARTITIONS_MIN_VERSION,
            DESCRIBE_TOPIC_PARTITIONS_MAX_VERSION,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiVersionsResponse {
    /// Request version, selects rigid or flexible layout.
    pub version: i16,
    pub error_code: i16,
    pub api_versions: Vec<ApiVersion>,
    pub throttle_time_ms: i32,
}

impl ApiVersionsResponse {
    pub fn new(version: i16, error_code: i16, api_versions: Vec<ApiVersion>) -> Self {
        Self {
            version,
            error_code,
            api_versions,
            throttle_time_ms: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionInfo {
    pub error_code: i16,
    pub partition_index: i32,
    pub leader_id: i32,
    pub leader_epoch: i32,
    pub replica_nodes: Vec<i32>,
    pub isr_nodes: Vec<i32>,
    pub eligible_leader_replicas: Vec<i32>,
    pub last_known_eligible_leader_replicas: Vec<i32>,
    pub offline_replicas: Vec<i32>,
}

impl From<&PartitionData> for PartitionInfo {
    fn from(partition: &PartitionData) -> Self {
        Self {
            error_code: i16::from(ErrorCode::None),
            partition_index: partition.partition_id,
            leader_id: partition.leader,
            leader_epoch: partition.leader_epoch,
            replica_nodes: partition.replicas.clone(),
            isr_nodes: partition.in_sync_replicas.clone(),
            eligible_leader_replicas: vec![],
            last_known_eligible_leader_replicas: vec![],
            offline_replicas: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicResponse {
    pub error_code: i16,
    pub topic_name: String,
    pub topic_id: Uuid,
    pub is_internal: bool,
    pub partitions: Vec<PartitionInfo>,
    pub topic_authorized_operations: i32,
}

impl TopicResponse {
    pub fn known(topic_name: String, partitions: &[PartitionData]) -> Self {
        let topic_id = partitions.first().map(|p| p.topic_id).unwrap_or_else(Uuid::nil);
        Self {
            error_code: i16::from(ErrorCode::None),
            topic_name,
            topic_id,
            is_internal: false,
            partitions: partitions.iter().map(PartitionInfo::from).collect(),
            topic_authorized_operations: TOPIC_AUTHORIZED_OPERATIONS,
        }
    }

    pub fn unknown(topic_name: String) -> Self {
        Self {
            error_code: i16::from(ErrorCode::UnknownTopicOrPartition),
            topic_name,
            topic_id: Uuid::nil(), // 00000000-0000-0000-0000-000000000000
            is_internal: false,
            partitions: vec![],
            topic_authorized_operations: TOPIC_AUTHORIZED_OPERATIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescribeTopicPartitionsResponse {
    pub throttle_time_ms: i32,
    pub topics: Vec<TopicResponse>,
}

impl DescribeTopicPartitionsResponse {
    pub fn new(topics: Vec<TopicResponse>) -> Self {
        Self {
            throttle_time_ms: 0,
            topics,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    ApiVersions(ApiVersionsResponse),
    DescribeTopicPartitions(DescribeTopicPartitionsResponse),
}

impl ResponsePayload {
    /// ApiVersions keeps the v0 response header even in flexible versions,
    /// every other flexible response uses v1 (with a tag buffer).
    pub fn uses_flexible_header(&self) -> bool {
        match self {
            ResponsePayload::ApiVersions(_) => false,
            ResponsePayload::DescribeTopicPartitions(_) => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KafkaResponse {
    pub correlation_id: i32,
    pub payload: ResponsePayload,
}

impl KafkaResponse {
    pub fn new(correlation_id: i32, payload: ResponsePayload) -> Self {
        Self {
            correlation_id,
            payload,
        }
    }
}
