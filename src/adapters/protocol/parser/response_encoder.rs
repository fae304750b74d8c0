use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::adapters::protocol::constants::{API_VERSIONS_FLEXIBLE_VERSION, NULL_CURSOR};
use crate::adapters::protocol::dto::{
    ApiVersionsResponse, DescribeTopicPartitionsResponse, KafkaResponse, PartitionInfo,
    ResponsePayload, TopicResponse,
};
use crate::application::error::ApplicationError;

use super::traits::Encode;
use super::writer::{
    size_of_compact_array_len, size_of_compact_i32_array, size_of_string, PutPrimitive,
    TAG_BUFFER_SIZE, UUID_SIZE,
};

/// Bytes of one `(api_key, min_version, max_version)` entry without its tag buffer.
const API_VERSION_ENTRY_SIZE: usize = 6;

impl Encode for ApiVersionsResponse {
    fn encoded_size(&self) -> usize {
        let mut size = 2; // error_code
        if self.is_flexible() {
            size += size_of_compact_array_len(Some(self.api_versions.len()));
            size += self.api_versions.len() * (API_VERSION_ENTRY_SIZE + TAG_BUFFER_SIZE);
            size += 4 + TAG_BUFFER_SIZE;
        } else {
            size += 4 + self.api_versions.len() * API_VERSION_ENTRY_SIZE;
            if self.has_throttle_time() {
                size += 4;
            }
        }
        size
    }

    fn encode(&self, dst: &mut BytesMut) {
        dst.put_i16(self.error_code);

        if self.is_flexible() {
            dst.put_compact_array_len(Some(self.api_versions.len()));
        } else {
            dst.put_i32(self.api_versions.len() as i32);
        }
        for version in &self.api_versions {
            dst.put_i16(version.api_key);
            dst.put_i16(version.min_version);
            dst.put_i16(version.max_version);
            if self.is_flexible() {
                dst.put_tag_buffer();
            }
        }

        if self.has_throttle_time() {
            dst.put_i32(self.throttle_time_ms);
        }
        if self.is_flexible() {
            dst.put_tag_buffer();
        }
    }
}

impl ApiVersionsResponse {
    fn is_flexible(&self) -> bool {
        self.version >= API_VERSIONS_FLEXIBLE_VERSION
    }

    // v0 에는 throttle_time_ms 가 없다
    fn has_throttle_time(&self) -> bool {
        self.version >= 1
    }
}

impl Encode for PartitionInfo {
    fn encoded_size(&self) -> usize {
        2 + 4 + 4 + 4
            + size_of_compact_i32_array(&self.replica_nodes)
            + size_of_compact_i32_array(&self.isr_nodes)
            + size_of_compact_i32_array(&self.eligible_leader_replicas)
            + size_of_compact_i32_array(&self.last_known_eligible_leader_replicas)
            + size_of_compact_i32_array(&self.offline_replicas)
            + TAG_BUFFER_SIZE
    }

    fn encode(&self, dst: &mut BytesMut) {
        dst.put_i16(self.error_code);
        dst.put_i32(self.partition_index);
        dst.put_i32(self.leader_id);
        dst.put_i32(self.leader_epoch);
        dst.put_compact_i32_array(&self.replica_nodes);
        dst.put_compact_i32_array(&self.isr_nodes);
        dst.put_compact_i32_array(&self.eligible_leader_replicas);
        dst.put_compact_i32_array(&self.last_known_eligible_leader_replicas);
        dst.put_compact_i32_array(&self.offline_replicas);
        dst.put_tag_buffer();
    }
}

impl Encode for TopicResponse {
    fn encoded_size(&self) -> usize {
        2 + size_of_string(&self.topic_name, true)
            + UUID_SIZE
            + 1 // is_internal
            + size_of_compact_array_len(Some(self.partitions.len()))
            + self.partitions.iter().map(Encode::encoded_size).sum::<usize>()
            + 4 // topic_authorized_operations
            + TAG_BUFFER_SIZE
    }

    fn encode(&self, dst: &mut BytesMut) {
        dst.put_i16(self.error_code);
        dst.put_compact_string(&self.topic_name);
        dst.put_uuid(&self.topic_id);
        dst.put_u8(self.is_internal as u8);

        dst.put_compact_array_len(Some(self.partitions.len()));
        for partition in &self.partitions {
            partition.encode(dst);
        }

        dst.put_i32(self.topic_authorized_operations);
        dst.put_tag_buffer();
    }
}

impl Encode for DescribeTopicPartitionsResponse {
    fn encoded_size(&self) -> usize {
        4 + size_of_compact_array_len(Some(self.topics.len()))
            + self.topics.iter().map(Encode::encoded_size).sum::<usize>()
            + 1 // next_cursor
            + TAG_BUFFER_SIZE
    }

    fn encode(&self, dst: &mut BytesMut) {
        dst.put_i32(self.throttle_time_ms);

        dst.put_compact_array_len(Some(self.topics.len()));
        for topic in &self.topics {
            topic.encode(dst);
        }

        dst.put_i8(NULL_CURSOR);
        dst.put_tag_buffer();
    }
}

impl Encode for ResponsePayload {
    fn encoded_size(&self) -> usize {
        match self {
            ResponsePayload::ApiVersions(body) => body.encoded_size(),
            ResponsePayload::DescribeTopicPartitions(body) => body.encoded_size(),
        }
    }

    fn encode(&self, dst: &mut BytesMut) {
        match self {
            ResponsePayload::ApiVersions(body) => body.encode(dst),
            ResponsePayload::DescribeTopicPartitions(body) => body.encode(dst),
        }
    }
}

/// Response header plus body, everything after the size prefix.
impl Encode for KafkaResponse {
    fn encoded_size(&self) -> usize {
        let header = if self.payload.uses_flexible_header() {
            4 + TAG_BUFFER_SIZE
        } else {
            4
        };
        header + self.payload.encoded_size()
    }

    fn encode(&self, dst: &mut BytesMut) {
        dst.put_i32(self.correlation_id);
        if self.payload.uses_flexible_header() {
            dst.put_tag_buffer();
        }
        self.payload.encode(dst);
    }
}

#[derive(Debug, Default, Clone)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Writes `size | header | body` into a buffer allocated for exactly that
    /// many bytes.
    pub fn encode(&self, response: &KafkaResponse) -> Result<Bytes, ApplicationError> {
        let size = response.encoded_size();
        let mut buf = BytesMut::with_capacity(4 + size);

        buf.put_i32(size as i32);
        response.encode(&mut buf);

        if buf.len() != 4 + size {
            return Err(ApplicationError::Protocol(format!(
                "response size mismatch: computed {} but wrote {}",
                size,
                buf.len() - 4
            )));
        }

        trace!(
            correlation_id = response.correlation_id,
            size,
            bytes = %hex::encode(&buf),
            "encoded response"
        );
        Ok(buf.freeze())
    }
}
