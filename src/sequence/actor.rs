use libsql::Connection;
use serde_json::Value;
use tokio::{
    select,
    sync::{mpsc::Receiver, oneshot},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    store::{
        queries::{self, Error},
        types::{RecordRow, Slot},
    },
    utils::now_ms,
};

use super::types::{Advanced, SequenceRecord};

pub struct Advance {
    pub location: Value,
    pub reply: oneshot::Sender<Result<Advanced, Error>>,
}

pub fn run(
    name: String,
    conn: Connection,
    cancel_token: CancellationToken,
    mut rx: Receiver<Advance>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            select! {
                _ = cancel_token.cancelled() => {
                    info!("Sequence {} cancelled", name);
                    break;
                }
                option_request = rx.recv() => {
                    match option_request {
                        Some(request) => {
                            let result = advance(&conn, &name, request.location).await;
                            if request.reply.send(result).is_err() {
                                warn!("Sequence {} reply receiver dropped", name);
                            }
                        }
                        None => {
                            info!("Sequence {} channel closed, exiting", name);
                            break;
                        }
                    }
                }
            }
        }

        rx.close();
        while rx.recv().await.is_some() {}

        info!("Sequence {} exited", name);
    })
}

pub async fn advance(conn: &Connection, sequence: &str, location: Value) -> Result<Advanced, Error> {
    let current = queries::get_record(conn, sequence, Slot::Current)
        .await?
        .map(SequenceRecord::try_from)
        .transpose()?;
    let previous = queries::get_record(conn, sequence, Slot::Previous)
        .await?
        .map(SequenceRecord::try_from)
        .transpose()?;

    let counter = match (&current, &previous) {
        // Bootstrap: the conceptual prior value is 1, so the first record
        // is 2 and the sequence runs 1, 2, 3, 5, 8, ...
        (None, _) => 2,
        // Only one record has ever existed: the missing previous counts as 1.
        (Some(c), None) => c.counter + 1,
        (Some(c), Some(p)) => c.counter + p.counter,
    };

    // Wall clock, clamped so successive records never move backwards.
    let timestamp = now_ms().max(current.as_ref().map(|c| c.timestamp).unwrap_or(0));

    let record = SequenceRecord {
        counter,
        location,
        timestamp,
    };

    // The shift is a single transaction: the old current becomes the
    // previous slot and the new record lands in current, or neither does.
    conn.execute("BEGIN TRANSACTION", ())
        .await
        .map_err(Error::Write)?;
    let written = async {
        if let Some(c) = &current {
            queries::put_record(conn, sequence, Slot::Previous, &RecordRow::try_from(c)?).await?;
        }
        queries::put_record(conn, sequence, Slot::Current, &RecordRow::try_from(&record)?).await?;
        Ok::<(), Error>(())
    }
    .await;
    match written {
        Ok(()) => {
            conn.execute("COMMIT", ()).await.map_err(Error::Write)?;
        }
        Err(e) => {
            let _ = conn.execute("ROLLBACK", ()).await;
            return Err(e);
        }
    }

    Ok(Advanced {
        current: record,
        previous: current,
    })
}
