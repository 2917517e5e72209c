use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS messages (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            content     TEXT NOT NULL DEFAULT '',
            timestamp   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
            file_name   TEXT,
            file_data   BLOB,
            CHECK ((file_name IS NULL) = (file_data IS NULL))
        );

        CREATE INDEX IF NOT EXISTS idx_messages_timestamp
            ON messages(timestamp);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
