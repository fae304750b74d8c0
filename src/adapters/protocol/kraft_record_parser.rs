use bytes::{Buf, Bytes};
use tracing::{debug, trace, warn};

use crate::adapters::protocol::constants::{
    BATCH_PREFIX_SIZE, FEATURE_LEVEL_RECORD_TYPE, PARTITION_RECORD_TYPE, TOPIC_RECORD_TYPE,
};
use crate::adapters::protocol::dto::kraft::{
    FeatureLevelValue, PartitionValue, Record, RecordBatch, RecordKind, RecordValue, TopicValue,
};
use crate::adapters::protocol::parser::{
    BaseParser, ByteParser, CompactArrayParser, PrimitiveParser, StringParser, UuidParser,
    VarIntParser,
};
use crate::application::error::ApplicationError;

/// Reader for the `__cluster_metadata` log: length-prefixed record batches
/// whose records carry typed metadata values.
#[derive(Debug, Default, Clone)]
pub struct KraftRecordParser {
    base: BaseParser,
}

impl KraftRecordParser {
    pub fn new() -> Self {
        Self {
            base: BaseParser::default(),
        }
    }

    /// Parses every batch in `data`. Batches with a non-positive length are
    /// skipped; a trailing fragment shorter than a batch prefix ends the scan.
    pub fn parse_log(&self, data: &mut Bytes) -> Result<Vec<RecordBatch>, ApplicationError> {
        let mut batches = Vec::new();

        while data.has_remaining() {
            if data.remaining() < BATCH_PREFIX_SIZE {
                debug!(trailing = data.remaining(), "end of metadata log");
                data.advance(data.remaining());
                break;
            }
            if let Some(batch) = self.parse_record_batch(data)? {
                batches.push(batch);
            }
        }

        Ok(batches)
    }

    /// Reads one batch prefix and, when the length is positive, the batch in
    /// its own window. Returns `None` for a skipped batch.
    pub fn parse_record_batch(
        &self,
        src: &mut Bytes,
    ) -> Result<Option<RecordBatch>, ApplicationError> {
        let base_offset = self.base.parse_i64(src)?;
        let batch_length = self.base.parse_i32(src)?;

        if batch_length <= 0 {
            warn!(base_offset, batch_length, "skipping record batch with invalid length");
            return Ok(None);
        }

        let mut window = self.base.take_bytes(src, batch_length as usize)?;
        self.parse_batch_body(base_offset, batch_length, &mut window)
            .map(Some)
    }

    fn parse_batch_body(
        &self,
        base_offset: i64,
        batch_length: i32,
        src: &mut Bytes,
    ) -> Result<RecordBatch, ApplicationError> {
        let partition_leader_epoch = self.base.parse_i32(src)?;
        let magic = self.base.parse_i8(src)?;
        let crc = self.base.parse_i32(src)?;
        let attributes = self.base.parse_i16(src)?;
        let last_offset_delta = self.base.parse_i32(src)?;
        let base_timestamp = self.base.parse_i64(src)?;
        let max_timestamp = self.base.parse_i64(src)?;
        let producer_id = self.base.parse_i64(src)?;
        let producer_epoch = self.base.parse_i16(src)?;
        let base_sequence = self.base.parse_i32(src)?;
        let record_count = self.base.parse_i32(src)?;

        trace!(
            base_offset,
            batch_length,
            partition_leader_epoch,
            magic,
            crc,
            attributes,
            last_offset_delta,
            base_timestamp,
            max_timestamp,
            producer_id,
            producer_epoch,
            base_sequence,
            record_count,
            "record batch header"
        );

        let records = if record_count < 0 {
            debug!(base_offset, record_count, "batch has no records");
            Vec::new()
        } else {
            let mut records = Vec::with_capacity((record_count as usize).min(src.remaining()));
            for _ in 0..record_count {
                records.push(self.parse_record(src)?);
            }
            records
        };

        if src.has_remaining() {
            trace!(base_offset, unread = src.remaining(), "bytes left in batch window");
        }

        Ok(RecordBatch {
            base_offset,
            batch_length,
            partition_leader_epoch,
            magic,
            crc,
            attributes,
            last_offset_delta,
            base_timestamp,
            max_timestamp,
            producer_id,
            producer_epoch,
            base_sequence,
            record_count,
            records,
        })
    }

    pub fn parse_record(&self, src: &mut Bytes) -> Result<Record, ApplicationError> {
        let length = self.base.parse_signed_varint(src)?;
        let attributes = self.base.parse_i8(src)?;
        let timestamp_delta = self.base.parse_signed_varint(src)?;
        let offset_delta = self.base.parse_signed_varint(src)?;

        let key_length = self.base.parse_signed_varint(src)?;
        let key = if key_length > 0 {
            Some(self.base.take_bytes(src, key_length as usize)?)
        } else {
            None
        };

        let value_length = self.base.parse_signed_varint(src)?;
        trace!(
            length,
            attributes,
            timestamp_delta,
            offset_delta,
            key_length,
            value_length,
            "record header"
        );

        let value = if value_length > 0 {
            let mut window = self.base.take_bytes(src, value_length as usize)?;
            Some(self.parse_record_value(&mut window)?)
        } else {
            None
        };

        let tagged_fields_count = self.base.parse_u8(src)?;

        Ok(Record {
            length,
            attributes,
            timestamp_delta,
            offset_delta,
            key,
            value_length,
            value,
            tagged_fields_count,
        })
    }

    pub fn parse_record_value(&self, src: &mut Bytes) -> Result<RecordValue, ApplicationError> {
        let frame_version = self.base.parse_u8(src)?;
        let record_type = self.base.parse_u8(src)?;
        let version = self.base.parse_u8(src)?;

        let kind = match record_type {
            FEATURE_LEVEL_RECORD_TYPE => self.parse_feature_level_record(src)?,
            TOPIC_RECORD_TYPE => self.parse_topic_record(src)?,
            PARTITION_RECORD_TYPE => self.parse_partition_record(src)?,
            _ => {
                debug!(record_type, version, "unknown metadata record type");
                RecordKind::Unknown
            }
        };
        trace!(frame_version, record_type, version, ?kind, "record value");

        Ok(RecordValue {
            frame_version,
            record_type,
            version,
            kind,
        })
    }

    fn parse_feature_level_record(&self, src: &mut Bytes) -> Result<RecordKind, ApplicationError> {
        let name = self.base.parse_compact_string(src)?;
        let level = self.base.parse_i16(src)?;

        Ok(RecordKind::FeatureLevel(FeatureLevelValue { name, level }))
    }

    fn parse_topic_record(&self, src: &mut Bytes) -> Result<RecordKind, ApplicationError> {
        let topic_name = self.base.parse_compact_string(src)?;
        let topic_id = self.base.parse_uuid(src)?;

        Ok(RecordKind::Topic(TopicValue {
            topic_name,
            topic_id,
        }))
    }

    fn parse_partition_record(&self, src: &mut Bytes) -> Result<RecordKind, ApplicationError> {
        let partition_id = self.base.parse_i32(src)?;
        let topic_id = self.base.parse_uuid(src)?;

        let replicas = self.parse_broker_ids(src)?;
        let in_sync_replicas = self.parse_broker_ids(src)?;
        let removing_replicas = self.parse_broker_ids(src)?;
        let adding_replicas = self.parse_broker_ids(src)?;

        let leader_id = self.base.parse_i32(src)?;
        let leader_epoch = self.base.parse_i32(src)?;
        let partition_epoch = self.base.parse_i32(src)?;

        let directories = self
            .base
            .parse_compact_array(src, |src| self.base.parse_uuid(src))?;

        Ok(RecordKind::Partition(PartitionValue {
            partition_id,
            topic_id,
            replicas,
            in_sync_replicas,
            removing_replicas,
            adding_replicas,
            leader_id,
            leader_epoch,
            partition_epoch,
            directories,
        }))
    }

    fn parse_broker_ids(&self, src: &mut Bytes) -> Result<Vec<i32>, ApplicationError> {
        self.base.parse_compact_array(src, |src| self.base.parse_i32(src))
    }
}
