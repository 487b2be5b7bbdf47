//! Session analysis pipeline.
//!
//! Selects every session longer than the minimum session distance, runs the
//! qualifying-segment search over its laps and returns one
//! [`SessionResult`] per session, in start-time order.

use std::path::Path;

use segment_core::criteria::Criteria;
use segment_core::error::Result;
use segment_core::models::SessionResult;
use segment_core::segment::SegmentFinder;
use tracing::{debug, info};

use crate::store::{RecordStore, SqliteStore};

// ── SessionAnalyzer ───────────────────────────────────────────────────────────

/// Runs the segment search over every eligible session of a store.
pub struct SessionAnalyzer {
    criteria: Criteria,
    finder: SegmentFinder,
}

impl SessionAnalyzer {
    pub fn new(criteria: Criteria) -> Self {
        Self {
            criteria,
            finder: SegmentFinder::new(criteria),
        }
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Analyse all sessions of `store` longer than the session threshold.
    ///
    /// Results keep the store's start-time order. Sessions at or below the
    /// threshold never appear, even if the store hands them back.
    pub fn analyze<S: RecordStore>(&self, store: &S) -> Result<Vec<SessionResult>> {
        let min_distance_m = self.criteria.min_session_distance_m();
        let sessions = store.sessions_longer_than(min_distance_m)?;

        let mut results = Vec::with_capacity(sessions.len());
        for session in sessions {
            if session.total_distance <= min_distance_m {
                debug!(
                    "session {} skipped: {:.0} m is not above {:.0} m",
                    session.id, session.total_distance, min_distance_m
                );
                continue;
            }

            let laps = store.laps_for_session(session.id)?;
            let qualifying_segment = self.finder.find(&laps);

            match &qualifying_segment {
                Some(seg) => debug!(
                    "session {}: laps {}-{} qualify at {:.1} spm",
                    session.id, seg.start_lap, seg.end_lap, seg.weighted_stroke_rate
                ),
                None => debug!(
                    "session {}: no qualifying segment in {} laps",
                    session.id,
                    laps.len()
                ),
            }

            results.push(SessionResult {
                session_id: session.id,
                date: session.display_date(),
                total_distance_km: session.total_distance_km(),
                qualifying_segment,
            });
        }

        Ok(results)
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Open the database at `db_path`, analyse it and release the connection.
///
/// The connection lives only for the duration of this call; it is dropped on
/// every return path, including errors.
pub fn analyze_sessions(db_path: &Path, criteria: &Criteria) -> Result<Vec<SessionResult>> {
    let started = std::time::Instant::now();
    let store = SqliteStore::open(db_path)?;

    let results = SessionAnalyzer::new(*criteria).analyze(&store)?;

    info!(
        "Analysed {} sessions ({} qualifying) from {} in {:.3}s",
        results.len(),
        results.iter().filter(|r| r.is_qualifying()).count(),
        db_path.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(results)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use segment_core::error::AnalyzerError;
    use segment_core::models::{Lap, Session, UNKNOWN_DATE};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory store that records which sessions had their laps fetched.
    #[derive(Default)]
    struct FakeStore {
        sessions: Vec<Session>,
        laps: HashMap<i64, Vec<Lap>>,
        ignore_filter: bool,
        lap_requests: RefCell<Vec<i64>>,
    }

    impl FakeStore {
        fn with_session(mut self, id: i64, start: Option<&str>, meters: f64, laps: Vec<Lap>) -> Self {
            self.sessions.push(Session {
                id,
                start_time: start.map(str::to_string),
                total_distance: meters,
            });
            self.laps.insert(id, laps);
            self
        }
    }

    impl RecordStore for FakeStore {
        fn sessions_longer_than(&self, min_distance_m: f64) -> Result<Vec<Session>> {
            Ok(self
                .sessions
                .iter()
                .filter(|s| self.ignore_filter || s.total_distance > min_distance_m)
                .cloned()
                .collect())
        }

        fn laps_for_session(&self, session_id: i64) -> Result<Vec<Lap>> {
            self.lap_requests.borrow_mut().push(session_id);
            Ok(self.laps.get(&session_id).cloned().unwrap_or_default())
        }
    }

    fn qualifying_laps() -> Vec<Lap> {
        vec![Lap::new(1, 500.0, 50.0, 45), Lap::new(2, 500.0, 50.0, 45)]
    }

    fn slow_laps() -> Vec<Lap> {
        vec![
            Lap::new(1, 400.0, 120.0, 40),
            Lap::new(2, 400.0, 120.0, 42),
            Lap::new(3, 400.0, 120.0, 45),
        ]
    }

    fn analyzer() -> SessionAnalyzer {
        SessionAnalyzer::new(Criteria::default())
    }

    // ── analyze ───────────────────────────────────────────────────────────────

    #[test]
    fn test_analyze_builds_results_in_store_order() {
        let store = FakeStore::default()
            .with_session(10, Some("2024-05-01 06:30:00"), 5_500.0, qualifying_laps())
            .with_session(11, Some("2024-05-03 06:30:00"), 7_250.0, slow_laps());

        let results = analyzer().analyze(&store).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].session_id, 10);
        assert_eq!(results[0].date, "2024-05-01");
        assert!((results[0].total_distance_km - 5.5).abs() < 1e-9);
        let seg = results[0].qualifying_segment.as_ref().expect("segment");
        assert_eq!((seg.start_lap, seg.end_lap), (1, 2));

        assert_eq!(results[1].session_id, 11);
        assert!(results[1].qualifying_segment.is_none());
    }

    #[test]
    fn test_analyze_excludes_short_sessions() {
        let store = FakeStore::default()
            .with_session(1, Some("2024-05-01 06:30:00"), 4_900.0, qualifying_laps())
            .with_session(2, Some("2024-05-02 06:30:00"), 4_899.0, qualifying_laps())
            .with_session(3, Some("2024-05-03 06:30:00"), 4_901.0, qualifying_laps());

        let results = analyzer().analyze(&store).unwrap();
        let ids: Vec<i64> = results.iter().map(|r| r.session_id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_analyze_enforces_threshold_even_if_store_does_not() {
        let store = FakeStore {
            ignore_filter: true,
            ..Default::default()
        }
        .with_session(1, None, 4_900.0, qualifying_laps())
        .with_session(2, None, 6_000.0, qualifying_laps());

        let results = analyzer().analyze(&store).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].session_id, 2);
        // Laps of the excluded session are never fetched.
        assert_eq!(*store.lap_requests.borrow(), vec![2]);
    }

    #[test]
    fn test_analyze_missing_start_time_is_unknown() {
        let store = FakeStore::default().with_session(5, None, 6_000.0, slow_laps());
        let results = analyzer().analyze(&store).unwrap();
        assert_eq!(results[0].date, UNKNOWN_DATE);
    }

    #[test]
    fn test_analyze_session_without_laps() {
        let store = FakeStore::default().with_session(5, None, 6_000.0, Vec::new());
        let results = analyzer().analyze(&store).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].qualifying_segment.is_none());
    }

    #[test]
    fn test_analyze_empty_store() {
        let results = analyzer().analyze(&FakeStore::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_analyze_is_repeatable() {
        let store = FakeStore::default()
            .with_session(1, Some("2024-05-01 06:30:00"), 5_500.0, qualifying_laps())
            .with_session(2, Some("2024-05-02 06:30:00"), 6_500.0, slow_laps());

        let first = analyzer().analyze(&store).unwrap();
        let second = analyzer().analyze(&store).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_analyze_uses_custom_criteria() {
        let store = FakeStore::default().with_session(1, None, 5_500.0, qualifying_laps());
        let strict = SessionAnalyzer::new(Criteria::new(4.9, 1.0, 60.0).unwrap());
        let results = strict.analyze(&store).unwrap();
        assert!(results[0].qualifying_segment.is_none());
        assert_eq!(strict.criteria().min_stroke_rate, 60.0);
    }

    // ── analyze_sessions ──────────────────────────────────────────────────────

    #[test]
    fn test_analyze_sessions_missing_database() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let err = analyze_sessions(&tmp.path().join("nope.db"), &Criteria::default())
            .expect_err("missing database must fail");
        assert!(err.is_store_unavailable());
        assert!(matches!(err, AnalyzerError::StoreNotFound(_)));
    }
}
