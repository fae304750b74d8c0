use crate::adapters::protocol::constants::{
    API_VERSIONS_KEY, API_VERSIONS_MAX_VERSION, NULL_CURSOR,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RequestHeader {
    pub api_key: i16,
    pub api_version: i16,
    pub correlation_id: i32,
    /// Empty when the client sent a zero or null length.
    pub client_id: String,
}

impl RequestHeader {
    /// Only ApiVersions answers an out-of-range version with an error code,
    /// so every other key reports `false`.
    pub fn is_supported_api_versions(&self) -> bool {
        self.api_key == API_VERSIONS_KEY && self.api_version <= API_VERSIONS_MAX_VERSION
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescribeTopicPartitionsRequest {
    pub topics: Vec<String>,
    pub response_partition_limit: i32,
    /// `NULL_CURSOR` when the client did not send one.
    pub cursor: i8,
}

impl DescribeTopicPartitionsRequest {
    pub fn new(topics: Vec<String>) -> Self {
        Self {
            topics,
            response_partition_limit: i32::MAX,
            cursor: NULL_CURSOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestPayload {
    /// No body, or a body this broker does not interpret.
    Empty,
    DescribeTopicPartitions(DescribeTopicPartitionsRequest),
}

#[derive(Debug, Clone)]
pub struct KafkaRequest {
    /// Byte count following the size field.
    pub message_size: u32,
    pub header: RequestHeader,
    pub payload: RequestPayload,
}

impl KafkaRequest {
    pub fn new(message_size: u32, header: RequestHeader, payload: RequestPayload) -> Self {
        Self {
            message_size,
            header,
            payload,
        }
    }
}
