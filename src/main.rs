use std::fs;

use anyhow::Result;
use clap::Parser;
use fibseq::{api, config::Config, logging, sequence::Registry, stopper, store};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::try_parse()?;
    logging::setup(config.log_format);
    info!("fibseq");
    info!("{:#?}", config);
    fs::create_dir_all(&config.data_dir)?;
    let cancel_token = CancellationToken::new();
    let mut handles = vec![];
    handles.push(stopper::run(cancel_token.clone()));
    let reader = store::Reader::new(&config.database_path()).await?;
    let registry = Registry::new(config.clone(), cancel_token.clone());
    handles.push(
        api::run(api::Env {
            config,
            cancel_token: cancel_token.clone(),
            reader,
            registry: registry.clone(),
        })
        .await?,
    );
    for handle in handles {
        let _ = handle.await;
    }
    registry.join().await;
    info!("Goodbye.");
    Ok(())
}
