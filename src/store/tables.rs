pub const CREATE_RECORDS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS records (
        sequence TEXT NOT NULL,
        slot TEXT NOT NULL,
        counter INTEGER NOT NULL,
        location TEXT NOT NULL,
        timestamp INTEGER NOT NULL,
        PRIMARY KEY (sequence, slot)
    )";

pub async fn initialize_database(conn: &libsql::Connection) -> Result<(), libsql::Error> {
    conn.execute(CREATE_RECORDS_TABLE, ()).await?;
    conn.query("PRAGMA journal_mode = WAL;", ()).await?;
    conn.query("PRAGMA synchronous = NORMAL;", ()).await?;
    conn.query("PRAGMA busy_timeout = 5000;", ()).await?;
    Ok(())
}
