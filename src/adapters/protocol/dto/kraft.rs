use bytes::Bytes;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordBatch {
    pub base_offset: i64,
    pub batch_length: i32,
    pub partition_leader_epoch: i32,
    pub magic: i8,
    pub crc: i32,
    pub attributes: i16,
    pub last_offset_delta: i32,
    pub base_timestamp: i64,
    pub max_timestamp: i64,
    pub producer_id: i64,
    pub producer_epoch: i16,
    pub base_sequence: i32,
    /// As written in the batch; negative means no records.
    pub record_count: i32,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub length: i32,
    pub attributes: i8,
    pub timestamp_delta: i32,
    pub offset_delta: i32,
    pub key: Option<Bytes>,
    pub value_length: i32,
    pub value: Option<RecordValue>,
    pub tagged_fields_count: u8,
}

impl Record {
    pub fn kind(&self) -> Option<&RecordKind> {
        self.value.as_ref().map(|value| &value.kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    pub frame_version: u8,
    pub record_type: u8,
    pub version: u8,
    pub kind: RecordKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    FeatureLevel(FeatureLevelValue),
    Topic(TopicValue),
    Partition(PartitionValue),
    /// A record type this broker does not decode; only its header was read.
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureLevelValue {
    pub name: String,
    pub level: i16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicValue {
    pub topic_name: String,
    pub topic_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionValue {
    pub partition_id: i32,
    pub topic_id: Uuid,
    pub replicas: Vec<i32>,
    pub in_sync_replicas: Vec<i32>,
    pub removing_replicas: Vec<i32>,
    pub adding_replicas: Vec<i32>,
    pub leader_id: i32,
    pub leader_epoch: i32,
    pub partition_epoch: i32,
    pub directories: Vec<Uuid>,
}
