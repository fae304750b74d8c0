use async_trait::async_trait;
use tracing::{debug, warn};

use crate::adapters::protocol::constants::{API_VERSIONS_KEY, DESCRIBE_TOPIC_PARTITIONS_KEY};
use crate::adapters::protocol::dto::{
    supported_api_versions, ApiVersionsResponse, DescribeTopicPartitionsRequest,
    DescribeTopicPartitionsResponse, ErrorCode, KafkaRequest, KafkaResponse, RequestPayload,
    ResponsePayload, TopicResponse,
};
use crate::application::error::ApplicationError;
use crate::ports::incoming::message_handler::MessageHandler;
use crate::ports::outgoing::metadata_store::MetadataStore;
use crate::Result;

pub struct KafkaBroker {
    metadata_store: Box<dyn MetadataStore>,
}

impl KafkaBroker {
    pub fn new(metadata_store: Box<dyn MetadataStore>) -> Self {
        Self { metadata_store }
    }

    fn handle_api_versions(&self, request: &KafkaRequest) -> KafkaResponse {
        let version = request.header.api_version;
        let error_code = if request.header.is_supported_api_versions() {
            ErrorCode::None
        } else {
            debug!(version, "unsupported ApiVersions version");
            ErrorCode::UnsupportedVersion
        };

        KafkaResponse::new(
            request.header.correlation_id,
            ResponsePayload::ApiVersions(ApiVersionsResponse::new(
                version,
                i16::from(error_code),
                supported_api_versions(),
            )),
        )
    }

    async fn handle_describe_topic_partitions(
        &self,
        request: &KafkaRequest,
    ) -> Result<KafkaResponse> {
        let empty = DescribeTopicPartitionsRequest::new(vec![]);
        let body = match &request.payload {
            RequestPayload::DescribeTopicPartitions(body) => body,
            RequestPayload::Empty => &empty,
        };

        let mut names = body.topics.clone();
        names.sort();

        let mut topics = Vec::with_capacity(names.len());
        for name in names {
            let topic = match self.metadata_store.get_partitions_by_name(&name).await? {
                Some(partitions) if !partitions.is_empty() => {
                    debug!(topic = %name, partitions = partitions.len(), "topic found");
                    TopicResponse::known(name, &partitions)
                }
                _ => {
                    debug!(topic = %name, "unknown topic");
                    TopicResponse::unknown(name)
                }
            };
            topics.push(topic);
        }

        Ok(KafkaResponse::new(
            request.header.correlation_id,
            ResponsePayload::DescribeTopicPartitions(DescribeTopicPartitionsResponse::new(topics)),
        ))
    }
}

#[async_trait]
impl MessageHandler for KafkaBroker {
    async fn handle_request(&self, request: KafkaRequest) -> Result<KafkaResponse> {
        match request.header.api_key {
            API_VERSIONS_KEY => Ok(self.handle_api_versions(&request)),
            DESCRIBE_TOPIC_PARTITIONS_KEY => self.handle_describe_topic_partitions(&request).await,
            api_key => {
                warn!(
                    api_key,
                    correlation_id = request.header.correlation_id,
                    "unrecognized api key"
                );
                Err(ApplicationError::UnrecognizedApiKey(api_key))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::protocol::constants::TOPIC_AUTHORIZED_OPERATIONS;
    use crate::adapters::protocol::dto::RequestHeader;
    use crate::domain::PartitionData;
    use uuid::Uuid;

    struct MockMetadataStore {
        topics: Vec<(String, Vec<PartitionData>)>,
    }

    impl MockMetadataStore {
        fn new(topics: Vec<(String, Vec<PartitionData>)>) -> Self {
            Self { topics }
        }
    }

    #[async_trait]
    impl MetadataStore for MockMetadataStore {
        async fn get_partitions_by_name(
            &self,
            topic_name: &str,
        ) -> Result<Option<Vec<PartitionData>>> {
            Ok(self
                .topics
                .iter()
                .find(|(name, _)| name == topic_name)
                .map(|(_, partitions)| partitions.clone()))
        }

        async fn get_partitions_by_topic_id(
            &self,
            topic_id: &Uuid,
        ) -> Result<Option<Vec<PartitionData>>> {
            Ok(self
                .topics
                .iter()
                .find(|(_, partitions)| partitions.iter().any(|p| p.topic_id == *topic_id))
                .map(|(_, partitions)| partitions.clone()))
        }
    }

    fn alpha_id() -> Uuid {
        Uuid::from_u64_pair(0x0000_0000_0000_4000, 0x8000_0000_0000_0011)
    }

    fn broker() -> KafkaBroker {
        let alpha = vec![PartitionData::new(0, alpha_id(), vec![1], vec![1], 1, 0, 0)];
        KafkaBroker::new(Box::new(MockMetadataStore::new(vec![
            ("alpha".to_string(), alpha),
            ("empty".to_string(), vec![]),
        ])))
    }

    fn request(api_key: i16, api_version: i16, payload: RequestPayload) -> KafkaRequest {
        KafkaRequest::new(
            0,
            RequestHeader {
                api_key,
                api_version,
                correlation_id: 42,
                client_id: "test".to_string(),
            },
            payload,
        )
    }

    async fn api_versions(version: i16) -> ApiVersionsResponse {
        let response = broker()
            .handle_request(request(API_VERSIONS_KEY, version, RequestPayload::Empty))
            .await
            .unwrap();
        assert_eq!(response.correlation_id, 42);
        match response.payload {
            ResponsePayload::ApiVersions(body) => body,
            other => panic!("Expected ApiVersions response, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_api_versions_supported() {
        let body = api_versions(4).await;
        assert_eq!(body.error_code, 0);
        assert_eq!(body.version, 4);
        assert_eq!(body.api_versions, supported_api_versions());
    }

    #[tokio::test]
    async fn test_api_versions_unsupported() {
        let body = api_versions(10).await;
        assert_eq!(body.error_code, i16::from(ErrorCode::UnsupportedVersion));
        assert_eq!(body.error_code, 0x0023);
    }

    #[tokio::test]
    async fn test_describe_topic_partitions_sorted_with_unknown() {
        let payload = RequestPayload::DescribeTopicPartitions(DescribeTopicPartitionsRequest::new(
            vec!["zeta".to_string(), "alpha".to_string()],
        ));
        let response = broker()
            .handle_request(request(DESCRIBE_TOPIC_PARTITIONS_KEY, 0, payload))
            .await
            .unwrap();

        let body = match response.payload {
            ResponsePayload::DescribeTopicPartitions(body) => body,
            other => panic!("Expected DescribeTopicPartitions response, got {:?}", other),
        };
        let names: Vec<&str> = body.topics.iter().map(|t| t.topic_name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);

        let alpha = &body.topics[0];
        assert_eq!(alpha.error_code, 0);
        assert_eq!(alpha.topic_id, alpha_id());
        assert_eq!(alpha.partitions.len(), 1);
        assert_eq!(alpha.partitions[0].leader_id, 1);
        assert_eq!(alpha.partitions[0].leader_epoch, 0);
        assert_eq!(alpha.topic_authorized_operations, TOPIC_AUTHORIZED_OPERATIONS);

        let zeta = &body.topics[1];
        assert_eq!(zeta.error_code, i16::from(ErrorCode::UnknownTopicOrPartition));
        assert!(zeta.topic_id.is_nil());
        assert!(zeta.partitions.is_empty());
    }

    #[tokio::test]
    async fn test_topic_without_partitions_is_unknown() {
        let payload = RequestPayload::DescribeTopicPartitions(DescribeTopicPartitionsRequest::new(
            vec!["empty".to_string()],
        ));
        let response = broker()
            .handle_request(request(DESCRIBE_TOPIC_PARTITIONS_KEY, 0, payload))
            .await
            .unwrap();

        match response.payload {
            ResponsePayload::DescribeTopicPartitions(body) => {
                assert_eq!(
                    body.topics[0].error_code,
                    i16::from(ErrorCode::UnknownTopicOrPartition)
                );
            }
            other => panic!("Expected DescribeTopicPartitions response, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_describe_without_body_has_no_topics() {
        let response = broker()
            .handle_request(request(DESCRIBE_TOPIC_PARTITIONS_KEY, 0, RequestPayload::Empty))
            .await
            .unwrap();
        assert_eq!(
            response.payload,
            ResponsePayload::DescribeTopicPartitions(DescribeTopicPartitionsResponse::new(vec![]))
        );
    }

    #[tokio::test]
    async fn test_unrecognized_api_key() {
        let result = broker()
            .handle_request(request(1, 0, RequestPayload::Empty))
            .await;
        assert!(matches!(result, Err(ApplicationError::UnrecognizedApiKey(1))));
    }
}
