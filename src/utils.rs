use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    sequence::Registry,
    store::{Reader, Writer},
};

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System clock before UNIX epoch")
        .as_millis() as i64
}

pub async fn new_test_store() -> Result<(Reader, Writer, TempDir)> {
    let temp_dir = TempDir::new()?;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)?
        .as_nanos()
        .to_string();
    let db_name = format!("test_store_{}.db", timestamp);
    let db_path = temp_dir.path().join(db_name);
    let writer = Writer::new(&db_path).await?;
    let reader = Reader::new(&db_path).await?;
    Ok((reader, writer, temp_dir))
}

pub fn new_test_registry(cancel_token: CancellationToken) -> Result<(Registry, TempDir)> {
    let temp_dir = TempDir::new()?;
    let mut config = Config::new_na();
    config.data_dir = temp_dir.path().to_path_buf();
    Ok((Registry::new(config, cancel_token), temp_dir))
}
