use std::io::ErrorKind;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::adapters::protocol::constants::MAX_REQUEST_SIZE;
use crate::adapters::protocol::dto::{KafkaRequest, KafkaResponse};
use crate::application::error::ApplicationError;

use super::request_parser::{RequestParser, SIZE_PREFIX};
use super::response_encoder::ResponseEncoder;

/// Wire side of a connection: frames requests off a stream and encodes
/// responses back into bytes.
#[derive(Debug, Default, Clone)]
pub struct KafkaProtocolParser {
    request_parser: RequestParser,
    response_encoder: ResponseEncoder,
}

impl KafkaProtocolParser {
    pub fn new() -> Self {
        Self {
            request_parser: RequestParser::new(),
            response_encoder: ResponseEncoder::new(),
        }
    }

    /// Reads one size-prefixed frame. `Ok(None)` means the peer closed the
    /// stream between frames; closing inside a frame is a `TruncatedFrame`.
    pub async fn read_frame<R>(&self, reader: &mut R) -> Result<Option<Bytes>, ApplicationError>
    where
        R: AsyncRead + Unpin,
    {
        let mut size_buf = [0u8; SIZE_PREFIX];
        let mut filled = 0;
        while filled < SIZE_PREFIX {
            let n = reader.read(&mut size_buf[filled..]).await?;
            if n == 0 {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(ApplicationError::TruncatedFrame {
                    needed: SIZE_PREFIX,
                    available: filled,
                });
            }
            filled += n;
        }

        let message_size = i32::from_be_bytes(size_buf);
        if message_size < 0 {
            return Err(ApplicationError::Protocol(format!(
                "negative message size: {}",
                message_size
            )));
        }
        if message_size > MAX_REQUEST_SIZE {
            return Err(ApplicationError::Protocol(format!(
                "message size {} exceeds limit {}",
                message_size, MAX_REQUEST_SIZE
            )));
        }

        let message_size = message_size as usize;
        let mut frame = BytesMut::zeroed(message_size);
        if let Err(e) = reader.read_exact(&mut frame).await {
            return Err(match e.kind() {
                // read_exact 는 읽은 바이트 수를 알려주지 않는다
                ErrorKind::UnexpectedEof => ApplicationError::TruncatedFrame {
                    needed: message_size,
                    available: 0,
                },
                _ => ApplicationError::Io(e),
            });
        }

        trace!(message_size, "read request frame");
        Ok(Some(frame.freeze()))
    }

    pub fn parse_request(&self, frame: Bytes) -> Result<KafkaRequest, ApplicationError> {
        self.request_parser.parse(frame)
    }

    pub fn encode_response(&self, response: &KafkaResponse) -> Result<Bytes, ApplicationError> {
        self.response_encoder.encode(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::protocol::constants::{API_VERSIONS_KEY, API_VERSIONS_MAX_VERSION};
    use crate::adapters::protocol::dto::{
        supported_api_versions, ApiVersionsResponse, RequestPayload, ResponsePayload,
    };

    fn api_versions_frame(correlation_id: i32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&10i32.to_be_bytes()); // message size
        data.extend_from_slice(&API_VERSIONS_KEY.to_be_bytes()); // API Key
        data.extend_from_slice(&API_VERSIONS_MAX_VERSION.to_be_bytes()); // API Version
        data.extend_from_slice(&correlation_id.to_be_bytes()); // Correlation ID
        data.extend_from_slice(&0i16.to_be_bytes()); // Client ID length
        data
    }

    #[tokio::test]
    async fn test_read_consecutive_frames() {
        let mut data = api_versions_frame(1);
        data.extend(api_versions_frame(2));
        let mut reader = &data[..];

        let parser = KafkaProtocolParser::new();
        for expected in [1, 2] {
            let frame = parser.read_frame(&mut reader).await.unwrap().unwrap();
            assert_eq!(frame.len(), 10);
            let request = parser.parse_request(frame).unwrap();
            assert_eq!(request.header.correlation_id, expected);
            assert_eq!(request.payload, RequestPayload::Empty);
        }
        assert!(parser.read_frame(&mut reader).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_eof_inside_frame_is_truncated() {
        let data = api_versions_frame(1);
        let parser = KafkaProtocolParser::new();

        let mut short_body = &data[..8];
        assert!(matches!(
            parser.read_frame(&mut short_body).await,
            Err(ApplicationError::TruncatedFrame { needed: 10, .. })
        ));

        let mut short_size = &data[..2];
        assert!(matches!(
            parser.read_frame(&mut short_size).await,
            Err(ApplicationError::TruncatedFrame { needed: 4, available: 2 })
        ));
    }

    #[tokio::test]
    async fn test_negative_size_is_rejected() {
        let data = (-5i32).to_be_bytes();
        let parser = KafkaProtocolParser::new();
        assert!(matches!(
            parser.read_frame(&mut &data[..]).await,
            Err(ApplicationError::Protocol(_))
        ));
    }

    #[tokio::test]
    async fn test_oversized_frame_is_rejected() {
        let data = i32::MAX.to_be_bytes();
        let parser = KafkaProtocolParser::new();
        match parser.read_frame(&mut &data[..]).await {
            Err(ApplicationError::Protocol(msg)) => assert!(msg.contains("exceeds limit")),
            other => panic!("Expected Protocol error, got {:?}", other),
        }

        // 한도 바로 위도 본문을 읽기 전에 거부된다
        let data = (MAX_REQUEST_SIZE + 1).to_be_bytes();
        assert!(matches!(
            parser.read_frame(&mut &data[..]).await,
            Err(ApplicationError::Protocol(_))
        ));
    }

    #[test]
    fn test_encode_response() {
        let parser = KafkaProtocolParser::new();
        let response = KafkaResponse::new(
            123,
            ResponsePayload::ApiVersions(ApiVersionsResponse::new(4, 0, supported_api_versions())),
        );
        let bytes = parser.encode_response(&response).unwrap();
        assert_eq!(&bytes[..4], &26i32.to_be_bytes());
        assert_eq!(&bytes[4..8], &123i32.to_be_bytes());
    }
}
