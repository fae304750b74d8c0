use clap::Parser;
use kraft_broker::adapters::incoming::tcp_adapter::TcpAdapter;
use kraft_broker::adapters::protocol::KafkaProtocolParser;
use kraft_broker::config::{AppConfig, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kraft_broker=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.server_properties.as_deref());

    let broker = config.build_broker().await;
    let adapter = TcpAdapter::new(&config.listen_addr, broker, KafkaProtocolParser::new()).await?;

    adapter.run().await?;

    Ok(())
}
