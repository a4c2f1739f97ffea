use anyhow::Result;
use fibseq::{
    store::{
        queries::{get_record, put_record, select_sequence_names},
        types::{RecordRow, Slot},
    },
    utils::new_test_store,
};

#[tokio::test]
async fn test_get_absent_record() -> Result<()> {
    let (_reader, writer, _temp_dir) = new_test_store().await?;
    let conn = writer.connection();

    assert!(get_record(&conn, "hits", Slot::Current).await?.is_none());
    assert!(get_record(&conn, "hits", Slot::Previous).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_put_then_get_record() -> Result<()> {
    let (reader, writer, _temp_dir) = new_test_store().await?;
    let conn = writer.connection();

    let record = RecordRow::builder()
        .counter(2)
        .location(r#"{"city":"Berlin"}"#.to_string())
        .timestamp(1700000000000)
        .build();
    put_record(&conn, "hits", Slot::Current, &record).await?;

    let stored = get_record(&conn, "hits", Slot::Current).await?.unwrap();
    assert_eq!(stored.counter, 2);
    assert_eq!(stored.location, r#"{"city":"Berlin"}"#);
    assert_eq!(stored.timestamp, 1700000000000);

    // A reader connection observes the committed write.
    let reader_conn = reader.connection().await?;
    let seen = get_record(&reader_conn, "hits", Slot::Current)
        .await?
        .unwrap();
    assert_eq!(seen.counter, 2);

    Ok(())
}

#[tokio::test]
async fn test_put_overwrites_slot() -> Result<()> {
    let (_reader, writer, _temp_dir) = new_test_store().await?;
    let conn = writer.connection();

    let first = RecordRow::builder()
        .counter(2)
        .location("{}".to_string())
        .timestamp(1000)
        .build();
    let second = RecordRow::builder()
        .counter(3)
        .location("{}".to_string())
        .timestamp(2000)
        .build();
    put_record(&conn, "hits", Slot::Current, &first).await?;
    put_record(&conn, "hits", Slot::Current, &second).await?;

    let stored = get_record(&conn, "hits", Slot::Current).await?.unwrap();
    assert_eq!(stored.counter, 3);
    assert_eq!(stored.timestamp, 2000);

    Ok(())
}

#[tokio::test]
async fn test_sequences_are_isolated() -> Result<()> {
    let (_reader, writer, _temp_dir) = new_test_store().await?;
    let conn = writer.connection();

    let record_a = RecordRow::builder()
        .counter(2)
        .location("{}".to_string())
        .timestamp(1000)
        .build();
    let record_b = RecordRow::builder()
        .counter(8)
        .location("{}".to_string())
        .timestamp(2000)
        .build();
    put_record(&conn, "a", Slot::Current, &record_a).await?;
    put_record(&conn, "b", Slot::Current, &record_b).await?;

    assert_eq!(get_record(&conn, "a", Slot::Current).await?.unwrap().counter, 2);
    assert_eq!(get_record(&conn, "b", Slot::Current).await?.unwrap().counter, 8);
    assert!(get_record(&conn, "a", Slot::Previous).await?.is_none());

    let names = select_sequence_names(&conn).await?;
    assert_eq!(names, vec!["a".to_string(), "b".to_string()]);

    Ok(())
}
