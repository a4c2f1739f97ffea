use axum::{
    extract::{Path, State},
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};

use crate::{
    sequence::types::{Advanced, SequenceRecord, SequenceState},
    store::{
        queries::{get_record, select_sequence_names},
        types::Slot,
    },
};

use super::{Env, error::HttpError, location::Location, result::Result};

const MAX_NAME_LENGTH: usize = 128;

#[derive(Debug, Serialize, Deserialize)]
pub struct Info {
    pub version: String,
    pub sequences: usize,
}

fn validate_name(name: &str) -> std::result::Result<(), HttpError> {
    let valid_chars = name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.');
    if name.is_empty() || name.len() > MAX_NAME_LENGTH || !valid_chars {
        return Err(HttpError::BadRequest(format!(
            "invalid sequence name: {}",
            name
        )));
    }
    Ok(())
}

pub async fn get_index(State(env): State<Env>) -> Result<Info> {
    let conn = env.reader.connection().await?;
    let names = select_sequence_names(&conn).await?;
    Ok(Info {
        version: env!("CARGO_PKG_VERSION").to_string(),
        sequences: names.len(),
    }
    .into())
}

pub async fn get_sequences(State(env): State<Env>) -> Result<Vec<String>> {
    let conn = env.reader.connection().await?;
    Ok(select_sequence_names(&conn).await?.into())
}

pub async fn get_sequence(
    State(env): State<Env>,
    Path(name): Path<String>,
) -> Result<SequenceState> {
    validate_name(&name)?;
    let conn = env.reader.connection().await?;
    let current = get_record(&conn, &name, Slot::Current).await?;
    let previous = get_record(&conn, &name, Slot::Previous).await?;
    if current.is_none() && previous.is_none() {
        return Err(HttpError::NotFound(format!("sequence: {}", name)).into());
    }
    Ok(SequenceState {
        current: current.map(SequenceRecord::try_from).transpose()?,
        previous: previous.map(SequenceRecord::try_from).transpose()?,
    }
    .into())
}

pub async fn post_advance(
    State(env): State<Env>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Advanced> {
    validate_name(&name)?;
    let location = Location::from_headers(&headers);
    let handle = env.registry.handle(&name).await?;
    let advanced = handle.advance(serde_json::to_value(location)?).await?;
    Ok(advanced.into())
}
