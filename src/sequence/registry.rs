use std::{collections::HashMap, sync::Arc};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::{
    sync::{Mutex, mpsc, oneshot},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{config::Config, store};

use super::{
    actor::{self, Advance},
    types::Advanced,
};

#[derive(Clone)]
pub struct Handle {
    tx: mpsc::Sender<Advance>,
}

impl Handle {
    pub async fn advance(&self, location: Value) -> Result<Advanced> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Advance {
                location,
                reply: reply_tx,
            })
            .await
            .context("Sequence worker is gone")?;
        Ok(reply_rx
            .await
            .context("Sequence worker dropped the reply")??)
    }
}

// Explicit map from sequence name to its worker. Each name gets one task
// and one write connection; the task serializes every advance on that name.
#[derive(Clone)]
pub struct Registry {
    config: Config,
    cancel_token: CancellationToken,
    sequences: Arc<Mutex<HashMap<String, Handle>>>,
    workers: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl Registry {
    pub fn new(config: Config, cancel_token: CancellationToken) -> Self {
        Self {
            config,
            cancel_token,
            sequences: Arc::new(Mutex::new(HashMap::new())),
            workers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn handle(&self, name: &str) -> Result<Handle> {
        let mut sequences = self.sequences.lock().await;
        if let Some(handle) = sequences.get(name) {
            return Ok(handle.clone());
        }
        let writer = store::Writer::new(&self.config.database_path()).await?;
        let (tx, rx) = mpsc::channel(self.config.queue_depth);
        let worker = actor::run(
            name.to_string(),
            writer.connection(),
            self.cancel_token.clone(),
            rx,
        );
        self.workers.lock().await.push(worker);
        let handle = Handle { tx };
        sequences.insert(name.to_string(), handle.clone());
        info!("Sequence {} created", name);
        Ok(handle)
    }

    pub async fn join(&self) {
        let workers: Vec<_> = self.workers.lock().await.drain(..).collect();
        for worker in workers {
            let _ = worker.await;
        }
    }
}
