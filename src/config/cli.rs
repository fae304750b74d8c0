use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to server.properties
    pub server_properties: Option<PathBuf>,
}
