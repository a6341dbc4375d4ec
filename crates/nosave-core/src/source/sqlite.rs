use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use super::{Cell, CallHistoryStore, RowCursor, RowSet};
use crate::constants::columns;
use crate::error::CallLogError;

/// Call history kept in a SQLite database with a platform-style `calls` table.
///
/// The database is opened read-only for every query and closed before the
/// rows are handed out, so no connection outlives a fetch.
#[derive(Debug, Clone)]
pub struct SqliteCallHistory {
    path: PathBuf,
}

impl SqliteCallHistory {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection, CallLogError> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            CallLogError::data_access(format!(
                "cannot open call history at {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

fn table_columns(conn: &Connection) -> Result<HashSet<String>, CallLogError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{}\")", columns::TABLE))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<HashSet<_>, _>>()?;

    if names.is_empty() {
        return Err(CallLogError::data_access(format!(
            "call history table `{}` not found",
            columns::TABLE
        )));
    }
    Ok(names)
}

/// Build `ORDER BY` from "<column> [ASC|DESC]", skipped when the column is absent.
fn order_clause(sort_order: &str, available: &HashSet<String>) -> String {
    let mut parts = sort_order.split_whitespace();
    let Some(column) = parts.next() else {
        return String::new();
    };
    if !available.contains(column) {
        return String::new();
    }
    let direction = match parts.next() {
        Some(d) if d.eq_ignore_ascii_case("asc") => "ASC",
        _ => "DESC",
    };
    format!(" ORDER BY \"{}\" {}", column, direction)
}

fn to_cell(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Cell::Null,
        ValueRef::Integer(v) => Cell::Integer(v),
        ValueRef::Real(v) => Cell::Integer(v as i64),
        ValueRef::Text(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
    }
}

impl CallHistoryStore for SqliteCallHistory {
    fn query(
        &self,
        projection: &[&str],
        sort_order: &str,
    ) -> Result<Box<dyn RowCursor>, CallLogError> {
        let conn = self.open()?;
        let available = table_columns(&conn)?;

        let selected: Vec<&str> = projection
            .iter()
            .copied()
            .filter(|column| available.contains(*column))
            .collect();
        let select_list = if selected.is_empty() {
            "NULL".to_string()
        } else {
            selected
                .iter()
                .map(|column| format!("\"{}\"", column))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let sql = format!(
            "SELECT {} FROM \"{}\"{}",
            select_list,
            columns::TABLE,
            order_clause(sort_order, &available)
        );
        debug!(%sql, path = %self.path.display(), "querying call history");

        let mut stmt = conn.prepare(&sql)?;
        let width = stmt.column_count();
        let mut rows = stmt.query([])?;
        let mut result = RowSet::new(selected.iter().copied());
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for index in 0..width {
                cells.push(to_cell(row.get_ref(index)?));
            }
            result.push_row(cells);
        }

        Ok(Box::new(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CallType, TimeZoneMode, TimestampFormatter};
    use crate::source::{CallLogSource, StoreCallLogSource};
    use tempfile::tempdir;

    fn seed(path: &Path, schema: &str, inserts: &[&str]) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(schema).unwrap();
        for insert in inserts {
            conn.execute(insert, []).unwrap();
        }
    }

    fn source(path: &Path) -> StoreCallLogSource<SqliteCallHistory> {
        StoreCallLogSource::new(
            SqliteCallHistory::new(path),
            TimestampFormatter::default().with_zone(TimeZoneMode::Utc),
        )
    }

    #[test]
    fn test_reads_calls_newest_first() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("calls.db");
        seed(
            &path,
            r#"
            CREATE TABLE calls (
                _id INTEGER PRIMARY KEY,
                number TEXT,
                name TEXT,
                date INTEGER,
                duration INTEGER,
                type INTEGER
            );
            "#,
            &[
                "INSERT INTO calls VALUES (1, '+15550001111', 'Alice', 1000, 75, 1)",
                "INSERT INTO calls VALUES (2, '5552223333', NULL, 5000, 0, 3)",
                "INSERT INTO calls VALUES (3, '5554445555', 'Bob', 3000, 12, 2)",
            ],
        );

        let records = source(&path).fetch_recent().unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
        assert_eq!(records[0].name(), None);
        assert_eq!(records[0].call_type(), CallType::Missed);
        assert_eq!(records[2].duration_seconds(), 75);
        assert_eq!(records[2].name(), Some("Alice"));
    }

    #[test]
    fn test_table_without_name_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("calls.db");
        seed(
            &path,
            "CREATE TABLE calls (_id INTEGER PRIMARY KEY, number TEXT, date INTEGER, type INTEGER);",
            &["INSERT INTO calls VALUES (1, '555', 10, 9)"],
        );

        let records = source(&path).fetch_recent().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), None);
        assert_eq!(records[0].duration_seconds(), 0);
        assert_eq!(records[0].call_type(), CallType::Unknown);
    }

    #[test]
    fn test_missing_database_is_data_access_error() {
        let dir = tempdir().unwrap();
        let err = source(&dir.path().join("absent.db")).fetch_recent().unwrap_err();
        assert!(matches!(err, CallLogError::DataAccess { .. }));
    }

    #[test]
    fn test_missing_table_is_data_access_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("calls.db");
        seed(&path, "CREATE TABLE other (id INTEGER);", &[]);

        let err = source(&path).fetch_recent().unwrap_err();
        assert_eq!(
            err,
            CallLogError::data_access("call history table `calls` not found")
        );
    }

    #[test]
    fn test_order_clause() {
        let available: HashSet<String> = ["date".to_string()].into_iter().collect();
        assert_eq!(order_clause("date DESC", &available), " ORDER BY \"date\" DESC");
        assert_eq!(order_clause("date asc", &available), " ORDER BY \"date\" ASC");
        assert_eq!(order_clause("duration DESC", &available), "");
        assert_eq!(order_clause("", &available), "");
    }
}
