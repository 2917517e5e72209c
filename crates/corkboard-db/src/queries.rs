use crate::Database;
use crate::models::{AttachmentRow, MessageRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Messages --

    /// All messages, newest first. Equal timestamps fall back to the higher id first.
    pub fn list_messages(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(query_messages)
    }

    /// Insert one message and return its id. `file` is the attachment's name and bytes.
    pub fn insert_message(&self, content: &str, file: Option<(&str, &[u8])>) -> Result<i64> {
        let (file_name, file_data) = file.unzip();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (content, file_name, file_data) VALUES (?1, ?2, ?3)",
                rusqlite::params![content, file_name, file_data],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// `None` when no message has this id.
    pub fn get_attachment(&self, id: i64) -> Result<Option<AttachmentRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT file_name, file_data FROM messages WHERE id = ?1",
                    [id],
                    |row| {
                        Ok(AttachmentRow {
                            file_name: row.get(0)?,
                            file_data: row.get(1)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Returns the number of rows removed; zero for an unknown id.
    pub fn delete_message(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            Ok(removed)
        })
    }
}

fn query_messages(conn: &Connection) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, content, timestamp, file_name
         FROM messages
         ORDER BY timestamp DESC, id DESC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                content: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                timestamp: row.get(2)?,
                file_name: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_list() {
        let db = db();
        let id = db.insert_message("first post", None).unwrap();

        let rows = db.list_messages().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].content, "first post");
        assert!(rows[0].file_name.is_none());
        assert!(!rows[0].timestamp.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let db = db();
        let a = db.insert_message("a", None).unwrap();
        let b = db.insert_message("b", None).unwrap();
        let c = db.insert_message("c", None).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_list_orders_by_timestamp_desc() {
        let db = db();
        db.with_conn(|conn| {
            conn.execute_batch(
                "
                INSERT INTO messages (content, timestamp) VALUES ('t2', '2026-01-01 00:00:02.000');
                INSERT INTO messages (content, timestamp) VALUES ('t3', '2026-01-01 00:00:03.000');
                INSERT INTO messages (content, timestamp) VALUES ('t1', '2026-01-01 00:00:01.000');
                ",
            )?;
            Ok(())
        })
        .unwrap();

        let contents: Vec<String> = db.list_messages().unwrap().into_iter().map(|r| r.content).collect();
        assert_eq!(contents, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_same_timestamp_newest_id_first() {
        let db = db();
        db.with_conn(|conn| {
            conn.execute_batch(
                "
                INSERT INTO messages (content, timestamp) VALUES ('older', '2026-01-01 00:00:00.000');
                INSERT INTO messages (content, timestamp) VALUES ('newer', '2026-01-01 00:00:00.000');
                ",
            )?;
            Ok(())
        })
        .unwrap();

        let rows = db.list_messages().unwrap();
        assert_eq!(rows[0].content, "newer");
        assert_eq!(rows[1].content, "older");
    }

    #[test]
    fn test_attachment_round_trip() {
        let db = db();
        let id = db.insert_message("hello", Some(("a.txt", &[0x68u8, 0x69][..]))).unwrap();

        let row = db.get_attachment(id).unwrap().unwrap();
        assert_eq!(row.file_name.as_deref(), Some("a.txt"));
        assert_eq!(row.file_data.as_deref(), Some(&[0x68u8, 0x69][..]));

        let listed = db.list_messages().unwrap();
        assert_eq!(listed[0].file_name.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_empty_file_is_still_an_attachment() {
        let db = db();
        let id = db.insert_message("", Some(("empty.bin", &[][..]))).unwrap();

        let row = db.get_attachment(id).unwrap().unwrap();
        assert_eq!(row.file_name.as_deref(), Some("empty.bin"));
        assert_eq!(row.file_data, Some(vec![]));
    }

    #[test]
    fn test_attachment_missing_row() {
        let db = db();
        assert!(db.get_attachment(42).unwrap().is_none());
    }

    #[test]
    fn test_attachment_columns_absent_without_file() {
        let db = db();
        let id = db.insert_message("plain", None).unwrap();

        let row = db.get_attachment(id).unwrap().unwrap();
        assert!(row.file_name.is_none());
        assert!(row.file_data.is_none());
    }

    #[test]
    fn test_name_without_data_is_rejected() {
        let db = db();
        let result = db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (content, file_name) VALUES ('x', 'orphan.txt')",
                [],
            )?;
            Ok(())
        });
        assert!(result.is_err());
        assert!(db.list_messages().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let db = db();
        let keep = db.insert_message("keep", None).unwrap();
        let gone = db.insert_message("gone", None).unwrap();

        assert_eq!(db.delete_message(gone).unwrap(), 1);
        assert_eq!(db.delete_message(gone).unwrap(), 0); // already gone
        assert_eq!(db.delete_message(9999).unwrap(), 0);

        let rows = db.list_messages().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, keep);
    }

    #[test]
    fn test_schema_survives_reopen() {
        let path = std::env::temp_dir().join(format!(
            "corkboard-reopen-{}-{}.db",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let db = Database::open(&path).unwrap();
        db.insert_message("persisted", Some(("p.txt", b"data".as_slice()))).unwrap();
        db.close().unwrap();

        let db = Database::open(&path).unwrap();
        let rows = db.list_messages().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content, "persisted");
        db.close().unwrap();

        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }

    #[test]
    fn test_open_fails_on_unusable_path() {
        // A directory is not a database file
        assert!(Database::open(&std::env::temp_dir()).is_err());

        let missing_parent = std::env::temp_dir()
            .join(format!("corkboard-no-such-dir-{}", std::process::id()))
            .join("nested")
            .join("messages.db");
        assert!(Database::open(&missing_parent).is_err());
    }
}
