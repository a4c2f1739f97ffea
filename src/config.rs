use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::logging;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[clap(
    version = "0.1.0",
    about = "fibseq",
    long_about = r#"fibseq serves named, durable Fibonacci-style sequences"#
)]
pub struct Config {
    #[clap(
        long,
        env = "LOG_FORMAT",
        help = "Log format (plain, json)",
        default_value = "plain"
    )]
    pub log_format: logging::Format,

    #[clap(
        long,
        env = "API_PORT",
        help = "Port number for the API server (e.g., 9433)",
        default_value = "9433"
    )]
    pub api_port: u16,

    #[clap(
        long,
        env = "DATA_DIR",
        help = "Directory path for fibseq data, certs, database, etc"
    )]
    pub data_dir: PathBuf,

    #[clap(
        long,
        env = "QUEUE_DEPTH",
        help = "Capacity of each sequence's request queue",
        default_value = "32"
    )]
    pub queue_depth: usize,
}

impl Config {
    pub fn new_na() -> Self {
        Self {
            log_format: logging::Format::Plain,
            api_port: 0,
            data_dir: "will be set".into(),
            queue_depth: 32,
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("sequences.db")
    }

    pub fn should_use_tls(&self) -> bool {
        let cert_path = self.data_dir.join("cert.pem");
        let key_path = self.data_dir.join("key.pem");
        cert_path.exists() && key_path.exists()
    }
}
