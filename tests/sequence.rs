use anyhow::Result;
use fibseq::{
    sequence::actor::advance,
    store::{Writer, queries::get_record, types::Slot},
    utils::{new_test_registry, new_test_store},
};
use serde_json::json;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_bootstrap_and_recurrence() -> Result<()> {
    let (_reader, writer, _temp_dir) = new_test_store().await?;
    let conn = writer.connection();

    let first = advance(&conn, "hits", json!({})).await?;
    assert_eq!(first.current.counter, 2);
    assert!(first.previous.is_none());

    let second = advance(&conn, "hits", json!({})).await?;
    assert_eq!(second.current.counter, 3);
    assert_eq!(second.previous.as_ref().unwrap().counter, 2);

    let third = advance(&conn, "hits", json!({})).await?;
    assert_eq!(third.current.counter, 5);
    assert_eq!(third.previous.as_ref().unwrap().counter, 3);

    // 1, 2, 3, 5, 8, ... from here on out.
    let mut last_two = (3, 5);
    for _ in 0..20 {
        let advanced = advance(&conn, "hits", json!({})).await?;
        assert_eq!(advanced.current.counter, last_two.0 + last_two.1);
        last_two = (last_two.1, advanced.current.counter);
    }

    Ok(())
}

#[tokio::test]
async fn test_advance_is_not_idempotent() -> Result<()> {
    let (_reader, writer, _temp_dir) = new_test_store().await?;
    let conn = writer.connection();

    let context = json!({"city": "Berlin"});
    let first = advance(&conn, "hits", context.clone()).await?;
    let second = advance(&conn, "hits", context).await?;
    assert_ne!(first.current.counter, second.current.counter);

    Ok(())
}

#[tokio::test]
async fn test_context_is_stored_verbatim() -> Result<()> {
    let (_reader, writer, _temp_dir) = new_test_store().await?;
    let conn = writer.connection();

    let context_one = json!({"city": "Berlin", "colo": "TXL", "latitude": "52.52"});
    let first = advance(&conn, "hits", context_one.clone()).await?;
    assert_eq!(first.current.location, context_one);

    let context_two = json!({"city": "Oslo"});
    let second = advance(&conn, "hits", context_two.clone()).await?;
    assert_eq!(second.current.location, context_two);
    assert_eq!(second.previous.as_ref().unwrap().location, context_one);

    Ok(())
}

#[tokio::test]
async fn test_slots_shift_in_storage() -> Result<()> {
    let (_reader, writer, _temp_dir) = new_test_store().await?;
    let conn = writer.connection();

    advance(&conn, "hits", json!({})).await?;
    assert!(get_record(&conn, "hits", Slot::Previous).await?.is_none());

    advance(&conn, "hits", json!({})).await?;
    let current = get_record(&conn, "hits", Slot::Current).await?.unwrap();
    let previous = get_record(&conn, "hits", Slot::Previous).await?.unwrap();
    assert_eq!(current.counter, 3);
    assert_eq!(previous.counter, 2);

    Ok(())
}

#[tokio::test]
async fn test_timestamps_never_move_backwards() -> Result<()> {
    let (_reader, writer, _temp_dir) = new_test_store().await?;
    let conn = writer.connection();

    let mut last_timestamp = 0;
    for _ in 0..5 {
        let advanced = advance(&conn, "hits", json!({})).await?;
        assert!(advanced.current.timestamp >= last_timestamp);
        last_timestamp = advanced.current.timestamp;
    }

    Ok(())
}

#[tokio::test]
async fn test_sequence_names_do_not_share_state() -> Result<()> {
    let (_reader, writer, _temp_dir) = new_test_store().await?;
    let conn = writer.connection();

    advance(&conn, "a", json!({})).await?;
    advance(&conn, "a", json!({})).await?;
    let b = advance(&conn, "b", json!({})).await?;

    assert_eq!(b.current.counter, 2);
    assert!(b.previous.is_none());
    assert_eq!(get_record(&conn, "a", Slot::Current).await?.unwrap().counter, 3);

    Ok(())
}

#[tokio::test]
async fn test_sequence_survives_reopen() -> Result<()> {
    let (_reader, writer, temp_dir) = new_test_store().await?;
    let conn = writer.connection();

    advance(&conn, "hits", json!({})).await?;
    advance(&conn, "hits", json!({})).await?;
    drop(conn);
    drop(writer);

    let db_path = std::fs::read_dir(temp_dir.path())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|path| path.extension().is_some_and(|ext| ext == "db"))
        .expect("test store database file");
    let reopened = Writer::new(&db_path).await?;
    let advanced = advance(&reopened.connection(), "hits", json!({})).await?;
    assert_eq!(advanced.current.counter, 5);
    assert_eq!(advanced.previous.as_ref().unwrap().counter, 3);

    Ok(())
}

#[tokio::test]
async fn test_worker_serializes_concurrent_advances() -> Result<()> {
    let cancel_token = CancellationToken::new();
    let (registry, _temp_dir) = new_test_registry(cancel_token.clone())?;
    let handle = registry.handle("hits").await?;

    let mut tasks = vec![];
    for _ in 0..10 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(
            async move { handle.advance(json!({})).await },
        ));
    }
    let mut counters = vec![];
    for task in tasks {
        counters.push(task.await??.current.counter);
    }
    counters.sort();

    // Exactly the first ten values, no duplicates, no gaps.
    assert_eq!(counters, vec![2, 3, 5, 8, 13, 21, 34, 55, 89, 144]);

    cancel_token.cancel();
    registry.join().await;

    Ok(())
}

#[tokio::test]
async fn test_registry_reuses_and_isolates_workers() -> Result<()> {
    let cancel_token = CancellationToken::new();
    let (registry, _temp_dir) = new_test_registry(cancel_token.clone())?;

    let a = registry.handle("a").await?;
    a.advance(json!({})).await?;
    let a_again = registry.handle("a").await?;
    let advanced = a_again.advance(json!({})).await?;
    assert_eq!(advanced.current.counter, 3);

    let b = registry.handle("b").await?;
    let advanced = b.advance(json!({})).await?;
    assert_eq!(advanced.current.counter, 2);

    cancel_token.cancel();
    registry.join().await;

    Ok(())
}
