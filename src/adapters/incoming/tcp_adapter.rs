use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

use crate::adapters::protocol::KafkaProtocolParser;
use crate::application::ApplicationError;
use crate::ports::incoming::message_handler::MessageHandler;
use crate::Result;

pub struct TcpAdapter {
    listener: TcpListener,
    message_handler: Arc<dyn MessageHandler>,
    protocol_parser: KafkaProtocolParser,
}

impl TcpAdapter {
    pub async fn new(
        addr: &str,
        message_handler: Arc<dyn MessageHandler>,
        protocol_parser: KafkaProtocolParser,
    ) -> Result<Self> {
        let listener = TcpListener::bind(addr).await.map_err(ApplicationError::Io)?;
        Ok(Self {
            listener,
            message_handler,
            protocol_parser,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().map_err(ApplicationError::Io)
    }

    /// Accepts connections until the task is dropped; each one gets its own task.
    pub async fn run(&self) -> Result<()> {
        info!(addr = %self.local_addr()?, "broker listening");

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let message_handler = Arc::clone(&self.message_handler);
                    let protocol_parser = self.protocol_parser.clone();

                    tokio::spawn(async move {
                        debug!(%peer, "accepted connection");
                        match handle_connection(stream, message_handler, protocol_parser).await {
                            Ok(()) => debug!(%peer, "client closed connection"),
                            Err(e) if e.is_connection_fatal() => {
                                warn!(%peer, error = %e, "closing connection")
                            }
                            Err(e) => error!(%peer, error = %e, "connection error"),
                        }
                    });
                }
                Err(e) => error!(error = %e, "accept error"),
            }
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    message_handler: Arc<dyn MessageHandler>,
    protocol_parser: KafkaProtocolParser,
) -> Result<()> {
    loop {
        // 1. 요청 프레임 읽기
        let Some(frame) = protocol_parser.read_frame(&mut stream).await? else {
            return Ok(());
        };

        // 2. 프로토콜 파싱
        let request = protocol_parser.parse_request(frame)?;
        let correlation_id = request.header.correlation_id;
        debug!(
            api_key = request.header.api_key,
            api_version = request.header.api_version,
            correlation_id,
            "request"
        );

        // 3. 비즈니스 로직 처리
        let response = message_handler.handle_request(request).await?;

        // 4. 응답 인코딩 및 전송
        let encoded = protocol_parser.encode_response(&response)?;
        stream.write_all(&encoded).await.map_err(ApplicationError::Io)?;
        debug!(correlation_id, bytes = encoded.len(), "response sent");
    }
}
