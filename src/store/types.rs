use bon::Builder;
use serde::Deserialize;

// Storage keys are (sequence, slot). The two slots form the shift register:
// current is the latest record, previous is the one it displaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Current,
    Previous,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Current => "current",
            Slot::Previous => "previous",
        }
    }
}

#[derive(Builder, Debug, Clone, Deserialize)]
pub struct RecordRow {
    pub counter: i64,
    pub location: String,
    pub timestamp: i64,
}
