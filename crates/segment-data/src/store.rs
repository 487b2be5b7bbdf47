//! Read access to the imported session database.
//!
//! Sessions and laps are written by the activity import side; this module
//! only ever reads them. The database is opened read-only so a wrong path
//! can never leave an empty database file behind.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags, Row};
use segment_core::error::{AnalyzerError, Result};
use segment_core::models::{Lap, Session};
use tracing::debug;

// ── RecordStore ───────────────────────────────────────────────────────────────

/// Queryable source of sessions and their laps.
pub trait RecordStore {
    /// Sessions whose total distance is strictly greater than
    /// `min_distance_m`, ordered by start time ascending.
    fn sessions_longer_than(&self, min_distance_m: f64) -> Result<Vec<Session>>;

    /// Laps of one session, ordered by lap number ascending.
    fn laps_for_session(&self, session_id: i64) -> Result<Vec<Lap>>;
}

// ── SqliteStore ───────────────────────────────────────────────────────────────

/// [`RecordStore`] backed by the SQLite database produced by the importer.
///
/// Expected tables:
/// * `sessions(id, start_time, total_distance)`
/// * `laps(session_id, lap_number, distance, time, strokes)`
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing database read-only.
    ///
    /// Fails with [`AnalyzerError::StoreNotFound`] when `path` does not exist
    /// and [`AnalyzerError::StoreUnavailable`] when it cannot be opened or is
    /// not a SQLite database.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AnalyzerError::StoreNotFound(path.to_path_buf()));
        }

        let unavailable = |source: rusqlite::Error| AnalyzerError::StoreUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(unavailable)?;

        // SQLite opens lazily; touch the schema so a corrupt or foreign file
        // is reported here rather than on the first query.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(unavailable)?;

        debug!("Opened session database {}", path.display());
        Ok(Self { conn })
    }

    /// Wrap an already-open connection (used for in-memory databases).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl RecordStore for SqliteStore {
    fn sessions_longer_than(&self, min_distance_m: f64) -> Result<Vec<Session>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, start_time, total_distance
            FROM sessions
            WHERE total_distance > ?1
            ORDER BY start_time
            "#,
        )?;

        let sessions = stmt
            .query_map(params![min_distance_m], |row| {
                Ok(Session {
                    id: row.get(0)?,
                    start_time: row.get(1)?,
                    total_distance: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(
            "{} sessions longer than {} m",
            sessions.len(),
            min_distance_m
        );
        Ok(sessions)
    }

    fn laps_for_session(&self, session_id: i64) -> Result<Vec<Lap>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT lap_number, distance, time, strokes
            FROM laps
            WHERE session_id = ?1
            ORDER BY lap_number
            "#,
        )?;

        let laps = stmt
            .query_map(params![session_id], |row| {
                Ok(Lap {
                    lap_number: row.get(0)?,
                    distance: row.get(1)?,
                    time: row.get(2)?,
                    strokes: stroke_count(row, 3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(laps)
    }
}

/// Read a stroke count that the importer may have stored as INTEGER or REAL.
fn stroke_count(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<i64>> {
    match row.get_ref(idx)? {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(n) => Ok(Some(n)),
        ValueRef::Real(f) => Ok(Some(f.round() as i64)),
        other => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "strokes".to_string(),
            other.data_type(),
        )),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SCHEMA: &str = r#"
        CREATE TABLE sessions (
            id INTEGER PRIMARY KEY,
            start_time TEXT,
            total_distance REAL
        );
        CREATE TABLE laps (
            id INTEGER PRIMARY KEY,
            session_id INTEGER NOT NULL,
            lap_number INTEGER NOT NULL,
            distance REAL,
            time REAL,
            strokes INTEGER
        );
    "#;

    fn memory_store() -> SqliteStore {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute_batch(
            r#"
            INSERT INTO sessions (id, start_time, total_distance) VALUES
                (1, '2024-06-03 07:00:00', 6200.0),
                (2, '2024-06-01 07:00:00', 5100.0),
                (3, '2024-06-02 07:00:00', 4900.0),
                (4, '2024-06-04 07:00:00', 3000.0);
            INSERT INTO laps (session_id, lap_number, distance, time, strokes) VALUES
                (1, 3, 500.0, 50.0, 45),
                (1, 1, 500.0, 50.0, 45),
                (1, 2, NULL, 50.0, 45),
                (2, 1, 400.0, 120.0, 40.0);
            "#,
        )
        .unwrap();
        SqliteStore::from_connection(conn)
    }

    // ── sessions_longer_than ──────────────────────────────────────────────────

    #[test]
    fn test_sessions_filtered_and_ordered_by_start_time() {
        let store = memory_store();
        let sessions = store.sessions_longer_than(4_900.0).unwrap();

        let ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(sessions[0].start_time.as_deref(), Some("2024-06-01 07:00:00"));
    }

    #[test]
    fn test_session_at_threshold_excluded() {
        let store = memory_store();
        let sessions = store.sessions_longer_than(4_900.0).unwrap();
        assert!(sessions.iter().all(|s| s.id != 3));
    }

    // ── laps_for_session ──────────────────────────────────────────────────────

    #[test]
    fn test_laps_ordered_by_number_with_missing_values() {
        let store = memory_store();
        let laps = store.laps_for_session(1).unwrap();

        let numbers: Vec<i64> = laps.iter().map(|l| l.lap_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(laps[1].distance, None);
        assert_eq!(laps[1].strokes, Some(45));
    }

    #[test]
    fn test_real_stroke_count_accepted() {
        let store = memory_store();
        let laps = store.laps_for_session(2).unwrap();
        assert_eq!(laps[0].strokes, Some(40));
    }

    #[test]
    fn test_unknown_session_has_no_laps() {
        let store = memory_store();
        assert!(store.laps_for_session(99).unwrap().is_empty());
    }

    // ── open ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_open_missing_file_is_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("absent.db");

        let err = SqliteStore::open(&path).err().expect("must fail");
        assert!(matches!(err, AnalyzerError::StoreNotFound(_)));
        assert!(!path.exists(), "opening must not create the database");
    }

    #[test]
    fn test_open_non_database_is_unavailable() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("garbage.db");
        std::fs::write(&path, b"this is definitely not a sqlite database file").unwrap();

        let err = SqliteStore::open(&path).err().expect("must fail");
        assert!(matches!(err, AnalyzerError::StoreUnavailable { .. }));
    }

    #[test]
    fn test_open_existing_database() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("sup_analysis.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(SCHEMA).unwrap();
            conn.execute(
                "INSERT INTO sessions (id, start_time, total_distance) VALUES (1, NULL, 7000.0)",
                [],
            )
            .unwrap();
        }

        let store = SqliteStore::open(&path).expect("open");
        let sessions = store.sessions_longer_than(4_900.0).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].start_time, None);
    }

    #[test]
    fn test_missing_table_is_query_error() {
        let store = SqliteStore::from_connection(Connection::open_in_memory().unwrap());
        let err = store.sessions_longer_than(0.0).unwrap_err();
        assert!(matches!(err, AnalyzerError::Query(_)));
    }
}
