use libsql::{Connection, de::from_row, params};
use thiserror::Error as ThisError;

use super::types::{RecordRow, Slot};

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Storage read failed: {0}")]
    Read(#[source] libsql::Error),
    #[error("Storage write failed: {0}")]
    Write(#[source] libsql::Error),
    #[error("Row deserialization error: {0}")]
    RowDeserialization(#[from] serde::de::value::Error),
    #[error("Context codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

pub async fn get_record(
    conn: &Connection,
    sequence: &str,
    slot: Slot,
) -> Result<Option<RecordRow>, Error> {
    let mut rows = conn
        .query(
            "SELECT counter, location, timestamp FROM records WHERE sequence = ? AND slot = ?",
            params![sequence, slot.as_str()],
        )
        .await
        .map_err(Error::Read)?;
    Ok(rows
        .next()
        .await
        .map_err(Error::Read)?
        .map(|r| from_row::<RecordRow>(&r))
        .transpose()?)
}

pub async fn put_record(
    conn: &Connection,
    sequence: &str,
    slot: Slot,
    record: &RecordRow,
) -> Result<(), Error> {
    conn.execute(
        "INSERT OR REPLACE INTO records (sequence, slot, counter, location, timestamp)
         VALUES (?, ?, ?, ?, ?)",
        params![
            sequence,
            slot.as_str(),
            record.counter,
            record.location.clone(),
            record.timestamp
        ],
    )
    .await
    .map_err(Error::Write)?;
    Ok(())
}

pub async fn select_sequence_names(conn: &Connection) -> Result<Vec<String>, Error> {
    let mut rows = conn
        .query(
            "SELECT DISTINCT sequence FROM records ORDER BY sequence",
            params![],
        )
        .await
        .map_err(Error::Read)?;
    let mut names = Vec::new();
    while let Some(row) = rows.next().await.map_err(Error::Read)? {
        names.push(row.get::<String>(0).map_err(Error::Read)?);
    }
    Ok(names)
}
