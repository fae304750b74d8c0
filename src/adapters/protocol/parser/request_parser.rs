use bytes::{Buf, Bytes};
use tracing::trace;

use crate::adapters::protocol::constants::DESCRIBE_TOPIC_PARTITIONS_KEY;
use crate::adapters::protocol::dto::{
    DescribeTopicPartitionsRequest, KafkaRequest, RequestHeader, RequestPayload,
};
use crate::application::error::ApplicationError;

use super::base_parser::BaseParser;
use super::traits::{ByteParser, CompactArrayParser, PrimitiveParser, StringParser};

/// Size of the `message_size` prefix in front of every request.
pub const SIZE_PREFIX: usize = 4;

#[derive(Debug, Default, Clone)]
pub struct RequestParser {
    base: BaseParser,
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            base: BaseParser::default(),
        }
    }

    /// Decodes a buffer that still starts with the 4-byte size prefix and
    /// consumes exactly one request from it.
    pub fn parse_sized(&self, data: &mut Bytes) -> Result<KafkaRequest, ApplicationError> {
        let message_size = self.base.parse_i32(data)?;
        if message_size < 0 {
            return Err(ApplicationError::Protocol(format!(
                "negative message size: {}",
                message_size
            )));
        }
        let frame = self.base.take_bytes(data, message_size as usize)?;
        self.parse(frame)
    }

    /// Decodes one request frame (everything after the size prefix).
    pub fn parse(&self, frame: Bytes) -> Result<KafkaRequest, ApplicationError> {
        trace!(frame = %hex::encode(&frame), "request frame");
        let message_size = frame.len() as u32;
        let mut buf = frame;

        let header = self.parse_header(&mut buf)?;
        let payload = self.parse_payload(&mut buf, &header)?;

        // 남은 바이트는 버린다
        if buf.has_remaining() {
            trace!(
                api_key = header.api_key,
                discarded = buf.remaining(),
                "discarding unread request bytes"
            );
            buf.advance(buf.remaining());
        }

        Ok(KafkaRequest::new(message_size, header, payload))
    }

    fn parse_header(&self, buf: &mut Bytes) -> Result<RequestHeader, ApplicationError> {
        let api_key = self.base.parse_i16(buf)?;
        let api_version = self.base.parse_i16(buf)?;
        let correlation_id = self.base.parse_i32(buf)?;

        // Client ID: i16 length, -1 = null
        let client_id = self.base.parse_nullable_string(buf)?.unwrap_or_default();

        trace!(api_key, api_version, correlation_id, client_id = %client_id, "request header");

        Ok(RequestHeader {
            api_key,
            api_version,
            correlation_id,
            client_id,
        })
    }

    fn parse_payload(
        &self,
        buf: &mut Bytes,
        header: &RequestHeader,
    ) -> Result<RequestPayload, ApplicationError> {
        match header.api_key {
            DESCRIBE_TOPIC_PARTITIONS_KEY if buf.has_remaining() => {
                self.parse_describe_topic_partitions_request(buf)
            }
            _ => Ok(RequestPayload::Empty),
        }
    }

    fn parse_describe_topic_partitions_request(
        &self,
        buf: &mut Bytes,
    ) -> Result<RequestPayload, ApplicationError> {
        self.base.parse_u8(buf)?; // header tag buffer

        let topics = self.base.parse_compact_array(buf, |buf| {
            let name = self.base.parse_compact_string(buf)?;
            self.base.parse_u8(buf)?; // topic tag buffer
            Ok(name)
        })?;
        let response_partition_limit = self.base.parse_i32(buf)?;
        let cursor = self.base.parse_i8(buf)?;

        trace!(?topics, response_partition_limit, cursor, "describe topic partitions body");

        Ok(RequestPayload::DescribeTopicPartitions(
            DescribeTopicPartitionsRequest {
                topics,
                response_partition_limit,
                cursor,
            },
        ))
    }
}
