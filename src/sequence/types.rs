use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::types::RecordRow;

// One persisted snapshot. The location bag is caller-supplied and stored
// verbatim; nothing here ever looks inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub counter: i64,
    pub location: Value,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceState {
    pub current: Option<SequenceRecord>,
    pub previous: Option<SequenceRecord>,
}

// Result of one advance. previous is the record that was current when the
// call started, not the stored previous slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advanced {
    pub current: SequenceRecord,
    pub previous: Option<SequenceRecord>,
}

impl TryFrom<RecordRow> for SequenceRecord {
    type Error = serde_json::Error;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        Ok(Self {
            counter: row.counter,
            location: serde_json::from_str(&row.location)?,
            timestamp: row.timestamp,
        })
    }
}

impl TryFrom<&SequenceRecord> for RecordRow {
    type Error = serde_json::Error;

    fn try_from(record: &SequenceRecord) -> Result<Self, Self::Error> {
        Ok(RecordRow::builder()
            .counter(record.counter)
            .location(serde_json::to_string(&record.location)?)
            .timestamp(record.timestamp)
            .build())
    }
}
