/// Largest size prefix accepted before the frame buffer is allocated.
pub const MAX_REQUEST_SIZE: i32 = 100 * 1024 * 1024;

/// ApiVersions switches to the flexible body layout at this version.
pub const API_VERSIONS_FLEXIBLE_VERSION: i16 = 3;

pub const API_VERSIONS_KEY: i16 = 18;
pub const API_VERSIONS_MIN_VERSION: i16 = 0;
/// Highest ApiVersions version answered without an error code.
pub const API_VERSIONS_MAX_VERSION: i16 = 4;

/// DescribeTopicPartitions only exists in version 0, which is flexible.
pub const DESCRIBE_TOPIC_PARTITIONS_KEY: i16 = 75;
pub const DESCRIBE_TOPIC_PARTITIONS_MIN_VERSION: i16 = 0;
pub const DESCRIBE_TOPIC_PARTITIONS_MAX_VERSION: i16 = 0;

/// Value of `topic_authorized_operations` reported for every topic.
pub const TOPIC_AUTHORIZED_OPERATIONS: i32 = 0x0000_0df8;

/// Cursor byte marking "no cursor" in a DescribeTopicPartitions request or response.
pub const NULL_CURSOR: i8 = -1;

/// Empty tagged-field section.
pub const EMPTY_TAG_BUFFER: u8 = 0;

/// Metadata record discriminators.
pub const TOPIC_RECORD_TYPE: u8 = 2;
pub const PARTITION_RECORD_TYPE: u8 = 3;
pub const FEATURE_LEVEL_RECORD_TYPE: u8 = 12;

/// base_offset (8) + batch_length (4)
pub const BATCH_PREFIX_SIZE: usize = 12;
