pub mod app_config;
pub mod cli;

pub use app_config::AppConfig;
pub use cli::Cli;
