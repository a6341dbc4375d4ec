//! Call-history retrieval.
//!
//! A [`CallHistoryStore`] answers a projected, sorted query with a
//! [`RowCursor`]; [`StoreCallLogSource`] walks that cursor and maps each row
//! into a [`CallRecord`]. Columns are looked up by name so a store that lacks
//! one (older schemas, restricted providers) still yields records with
//! default values instead of failing the whole fetch.

mod row_set;
mod sqlite;

pub use row_set::{Cell, RowSet};
pub use sqlite::SqliteCallHistory;

use tracing::{debug, warn};

use crate::constants::columns;
use crate::error::CallLogError;
use crate::models::{CallRecord, CallType, TimestampFormatter};

/// Forward-only view over a query result.
///
/// The cursor is released when it is dropped, so every exit path out of a
/// fetch (completion, empty result, error mid-iteration) closes it.
pub trait RowCursor {
    fn column_index(&self, name: &str) -> Option<usize>;
    /// Move to the next row. `Ok(false)` once the rows are exhausted.
    fn advance(&mut self) -> Result<bool, CallLogError>;
    fn get_string(&self, index: usize) -> Option<String>;
    fn get_i64(&self, index: usize) -> Option<i64>;
}

/// Read-only access to the platform call-history store.
pub trait CallHistoryStore: Send + Sync {
    fn query(
        &self,
        projection: &[&str],
        sort_order: &str,
    ) -> Result<Box<dyn RowCursor>, CallLogError>;
}

/// Produces the most recent calls, newest first. May block on I/O.
pub trait CallLogSource: Send + Sync {
    fn fetch_recent(&self) -> Result<Vec<CallRecord>, CallLogError>;
}

/// Positions of the projected columns within one result set.
struct ColumnIndexes {
    id: Option<usize>,
    number: Option<usize>,
    name: Option<usize>,
    date: Option<usize>,
    duration: Option<usize>,
    call_type: Option<usize>,
}

impl ColumnIndexes {
    fn resolve(cursor: &dyn RowCursor) -> Self {
        let indexes = Self {
            id: cursor.column_index(columns::ID),
            number: cursor.column_index(columns::NUMBER),
            name: cursor.column_index(columns::CACHED_NAME),
            date: cursor.column_index(columns::DATE),
            duration: cursor.column_index(columns::DURATION),
            call_type: cursor.column_index(columns::TYPE),
        };
        let missing: Vec<&str> = [
            (indexes.id, columns::ID),
            (indexes.number, columns::NUMBER),
            (indexes.name, columns::CACHED_NAME),
            (indexes.date, columns::DATE),
            (indexes.duration, columns::DURATION),
            (indexes.call_type, columns::TYPE),
        ]
        .iter()
        .filter(|(index, _)| index.is_none())
        .map(|(_, column)| *column)
        .collect();
        if !missing.is_empty() {
            debug!(?missing, "call history result is missing columns, using defaults");
        }
        indexes
    }

    fn read_record(&self, cursor: &dyn RowCursor, formatter: &TimestampFormatter) -> CallRecord {
        let string = |index: Option<usize>| index.and_then(|i| cursor.get_string(i));
        let integer = |index: Option<usize>| index.and_then(|i| cursor.get_i64(i)).unwrap_or(0);

        CallRecord::new(
            string(self.id).unwrap_or_default(),
            string(self.number).unwrap_or_default(),
            string(self.name),
            integer(self.date),
            u64::try_from(integer(self.duration)).unwrap_or(0),
            CallType::from_code(integer(self.call_type)),
            formatter,
        )
    }
}

/// [`CallLogSource`] backed by any [`CallHistoryStore`].
pub struct StoreCallLogSource<S> {
    store: S,
    formatter: TimestampFormatter,
}

impl<S: CallHistoryStore> StoreCallLogSource<S> {
    pub fn new(store: S, formatter: TimestampFormatter) -> Self {
        Self { store, formatter }
    }
}

impl<S: CallHistoryStore> CallLogSource for StoreCallLogSource<S> {
    fn fetch_recent(&self) -> Result<Vec<CallRecord>, CallLogError> {
        let mut cursor = self
            .store
            .query(&columns::PROJECTION, columns::SORT_ORDER)
            .inspect_err(|e| warn!(error = %e, "call history query failed"))?;

        let indexes = ColumnIndexes::resolve(cursor.as_ref());
        let mut records = Vec::new();
        while cursor.advance()? {
            records.push(indexes.read_record(cursor.as_ref(), &self.formatter));
        }
        drop(cursor);

        // Stable, so equal timestamps keep the store's order
        records.sort_by(|a, b| b.timestamp_millis().cmp(&a.timestamp_millis()));
        debug!(count = records.len(), "fetched call history");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeZoneMode;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    fn formatter() -> TimestampFormatter {
        TimestampFormatter::default().with_zone(TimeZoneMode::Utc)
    }

    /// Store that hands out clones of a fixed row set.
    struct FixedStore(RowSet);

    impl CallHistoryStore for FixedStore {
        fn query(&self, _: &[&str], _: &str) -> Result<Box<dyn RowCursor>, CallLogError> {
            Ok(Box::new(self.0.clone()))
        }
    }

    struct UnreadableStore;

    impl CallHistoryStore for UnreadableStore {
        fn query(&self, _: &[&str], _: &str) -> Result<Box<dyn RowCursor>, CallLogError> {
            Err(CallLogError::data_access("provider crashed"))
        }
    }

    /// Cursor that fails after `fail_after` rows and records when it is dropped.
    struct TrackedCursor {
        rows: RowSet,
        advanced: usize,
        fail_after: Option<usize>,
        released: Arc<AtomicBool>,
    }

    impl RowCursor for TrackedCursor {
        fn column_index(&self, name: &str) -> Option<usize> {
            self.rows.column_index(name)
        }

        fn advance(&mut self) -> Result<bool, CallLogError> {
            if self.fail_after == Some(self.advanced) {
                return Err(CallLogError::data_access("cursor window failed"));
            }
            self.advanced += 1;
            self.rows.advance()
        }

        fn get_string(&self, index: usize) -> Option<String> {
            self.rows.get_string(index)
        }

        fn get_i64(&self, index: usize) -> Option<i64> {
            self.rows.get_i64(index)
        }
    }

    impl Drop for TrackedCursor {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    struct TrackedStore {
        rows: RowSet,
        fail_after: Option<usize>,
        released: Arc<AtomicBool>,
        queries: AtomicUsize,
    }

    impl CallHistoryStore for TrackedStore {
        fn query(
            &self,
            projection: &[&str],
            sort_order: &str,
        ) -> Result<Box<dyn RowCursor>, CallLogError> {
            assert_eq!(projection, &columns::PROJECTION);
            assert_eq!(sort_order, "date DESC");
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(TrackedCursor {
                rows: self.rows.clone(),
                advanced: 0,
                fail_after: self.fail_after,
                released: self.released.clone(),
            }))
        }
    }

    fn full_rows() -> RowSet {
        RowSet::new(columns::PROJECTION)
            .with_row(vec![
                Cell::from("11"),
                Cell::from("+15550001111"),
                Cell::from("Alice"),
                Cell::Integer(3_000),
                Cell::Integer(75),
                Cell::Integer(1),
            ])
            .with_row(vec![
                Cell::from("12"),
                Cell::from("(555) 123-4567"),
                Cell::Null,
                Cell::Integer(2_000),
                Cell::Integer(0),
                Cell::Integer(3),
            ])
    }

    #[test]
    fn test_maps_all_columns() {
        let source = StoreCallLogSource::new(FixedStore(full_rows()), formatter());
        let records = source.fetch_recent().unwrap();

        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.id(), "11");
        assert_eq!(first.number(), "+15550001111");
        assert_eq!(first.name(), Some("Alice"));
        assert_eq!(first.timestamp_millis(), 3_000);
        assert_eq!(first.duration_seconds(), 75);
        assert_eq!(first.call_type(), CallType::Incoming);
        assert_eq!(first.formatted_timestamp(), "Jan 01, 1970 12:00 AM");

        assert_eq!(records[1].name(), None);
        assert_eq!(records[1].call_type(), CallType::Missed);
    }

    #[test]
    fn test_missing_columns_take_defaults() {
        let rows = RowSet::new(["_id", "date"]).with_row(vec![Cell::from("7"), Cell::Integer(99)]);
        let source = StoreCallLogSource::new(FixedStore(rows), formatter());
        let records = source.fetch_recent().unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id(), "7");
        assert_eq!(record.number(), "");
        assert_eq!(record.name(), None);
        assert_eq!(record.timestamp_millis(), 99);
        assert_eq!(record.duration_seconds(), 0);
        assert_eq!(record.call_type(), CallType::Unknown);
    }

    #[test]
    fn test_negative_duration_clamps_to_zero() {
        let rows = RowSet::new(["duration"]).with_row(vec![Cell::Integer(-5)]);
        let source = StoreCallLogSource::new(FixedStore(rows), formatter());
        assert_eq!(source.fetch_recent().unwrap()[0].duration_seconds(), 0);
    }

    #[test]
    fn test_output_sorted_newest_first_even_if_store_is_not() {
        let mut rows = RowSet::new(["_id", "date"]);
        for (id, date) in [("a", 5), ("b", 40), ("c", 5), ("d", 12), ("e", 0)] {
            rows.push_row(vec![Cell::from(id), Cell::Integer(date)]);
        }
        let input_len = rows.len();
        let source = StoreCallLogSource::new(FixedStore(rows), formatter());
        let records = source.fetch_recent().unwrap();

        assert!(records.len() <= input_len);
        assert!(records
            .windows(2)
            .all(|pair| pair[0].timestamp_millis() >= pair[1].timestamp_millis()));
        let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_empty_result() {
        let source = StoreCallLogSource::new(FixedStore(RowSet::new(columns::PROJECTION)), formatter());
        assert!(source.fetch_recent().unwrap().is_empty());
    }

    #[test]
    fn test_store_failure_is_data_access_error() {
        let source = StoreCallLogSource::new(UnreadableStore, formatter());
        let err = source.fetch_recent().unwrap_err();
        assert_eq!(err, CallLogError::data_access("provider crashed"));
    }

    #[test]
    fn test_cursor_released_after_completion() {
        let released = Arc::new(AtomicBool::new(false));
        let store = TrackedStore {
            rows: full_rows(),
            fail_after: None,
            released: released.clone(),
            queries: AtomicUsize::new(0),
        };
        let source = StoreCallLogSource::new(store, formatter());

        assert_eq!(source.fetch_recent().unwrap().len(), 2);
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_cursor_released_when_iteration_fails() {
        let released = Arc::new(AtomicBool::new(false));
        let store = TrackedStore {
            rows: full_rows(),
            fail_after: Some(1),
            released: released.clone(),
            queries: AtomicUsize::new(0),
        };
        let source = StoreCallLogSource::new(store, formatter());

        assert!(matches!(
            source.fetch_recent(),
            Err(CallLogError::DataAccess { .. })
        ));
        assert!(released.load(Ordering::SeqCst));
    }
}
