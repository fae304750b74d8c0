use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapters::outgoing::kraft_metadata_store::KraftMetadataStore;
use crate::application::broker::KafkaBroker;
use crate::ports::incoming::message_handler::MessageHandler;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:9092";
pub const DEFAULT_LOG_DIR: &str = "/tmp/kraft-combined-logs";

pub const ADDR_ENV: &str = "KRAFT_BROKER_ADDR";
pub const METADATA_LOG_ENV: &str = "KRAFT_METADATA_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub listen_addr: String,
    pub metadata_log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            metadata_log_path: Self::metadata_log_path_for(Path::new(DEFAULT_LOG_DIR)),
        }
    }
}

impl AppConfig {
    /// Defaults, then `server.properties` (if given and readable), then the environment.
    pub fn load(server_properties: Option<&Path>) -> Self {
        let mut config = Self::default();

        if let Some(path) = server_properties {
            match std::fs::read_to_string(path) {
                Ok(contents) => config.apply_properties(&contents),
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "cannot read server.properties, using defaults"
                ),
            }
        }

        config.apply_overrides(env::var(ADDR_ENV).ok(), env::var(METADATA_LOG_ENV).ok());
        config
    }

    /// `<log_dir>/__cluster_metadata-0/00000000000000000000.log`
    pub fn metadata_log_path_for(log_dir: &Path) -> PathBuf {
        log_dir
            .join("__cluster_metadata-0")
            .join("00000000000000000000.log")
    }

    fn apply_properties(&mut self, contents: &str) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            match key.trim() {
                "log.dirs" => {
                    if let Some(dir) = value.split(',').map(str::trim).find(|d| !d.is_empty()) {
                        self.metadata_log_path = Self::metadata_log_path_for(Path::new(dir));
                    }
                }
                "listeners" => {
                    let plaintext = value
                        .split(',')
                        .find_map(|l| l.trim().strip_prefix("PLAINTEXT://"));
                    if let Some(addr) = plaintext {
                        // 호스트가 비어 있으면 모든 인터페이스
                        self.listen_addr = if addr.starts_with(':') {
                            format!("0.0.0.0{}", addr)
                        } else {
                            addr.to_string()
                        };
                    }
                }
                _ => {}
            }
        }
        debug!(
            listen_addr = %self.listen_addr,
            metadata_log = %self.metadata_log_path.display(),
            "applied server.properties"
        );
    }

    fn apply_overrides(&mut self, listen_addr: Option<String>, metadata_log: Option<String>) {
        if let Some(addr) = listen_addr.filter(|a| !a.is_empty()) {
            self.listen_addr = addr;
        }
        if let Some(path) = metadata_log.filter(|p| !p.is_empty()) {
            self.metadata_log_path = PathBuf::from(path);
        }
    }

    /// Loads the metadata log, falling back to empty metadata when it cannot
    /// be read, and wires the broker around it.
    pub async fn build_broker(&self) -> Arc<dyn MessageHandler> {
        let metadata_store = KraftMetadataStore::open(&self.metadata_log_path).await;
        Arc::new(KafkaBroker::new(Box::new(metadata_store)))
    }
}
