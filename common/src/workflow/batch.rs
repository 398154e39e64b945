use log::{debug, warn};

use crate::error::FormError;
use crate::model::record::Record;
use crate::store::RecordStore;

/// Outcome of one save pass over the edit buffer.
///
/// There is no transactional envelope: rows listed in `inserted` stay in the
/// table even when `failure` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Buffer positions that were inserted, in order.
    pub inserted: Vec<usize>,
    pub failure: Option<BatchFailure>,
}

/// Where and why a save pass stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub index: usize,
    pub error: FormError,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Checks and inserts `records` one after the other.
///
/// For each record the `cin` lookup completes before the insert starts, and
/// the insert completes before the next record is looked at. The pass stops
/// at the first lookup error, existing `cin`, or insert error.
pub async fn save_batch<S: RecordStore + ?Sized>(store: &S, records: &[Record]) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, record) in records.iter().enumerate() {
        let existing = match store.lookup(&record.cin).await {
            Ok(existing) => existing,
            Err(cause) => {
                warn!("lookup of cin {:?} failed: {}", record.cin, cause);
                report.failure = Some(BatchFailure {
                    index,
                    error: FormError::Store(cause),
                });
                return report;
            }
        };

        if !existing.is_empty() {
            warn!(
                "cin {:?} already stored ({} row(s)), stopping at record {}",
                record.cin,
                existing.len(),
                index
            );
            report.failure = Some(BatchFailure {
                index,
                error: FormError::DuplicateKey {
                    cin: record.cin.clone(),
                },
            });
            return report;
        }

        if let Err(cause) = store.insert(record).await {
            warn!("insert of cin {:?} failed: {}", record.cin, cause);
            report.failure = Some(BatchFailure {
                index,
                error: FormError::Store(cause),
            });
            return report;
        }

        debug!("stored record {} (cin {:?})", index, record.cin);
        report.inserted.push(index);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::MemoryStore;

    fn record(cin: &str, nom: &str) -> Record {
        Record::from_pairs([("cin", cin), ("nom", nom)])
    }

    #[tokio::test]
    async fn inserts_every_new_record() {
        let store = MemoryStore::new();
        let batch = vec![record("101", "A"), record("102", "B")];

        let report = save_batch(&store, &batch).await;

        assert!(report.is_complete());
        assert_eq!(report.inserted, vec![0, 1]);
        assert_eq!(store.rows(), batch);
    }

    #[tokio::test]
    async fn duplicate_stops_the_pass_without_rollback() {
        let store = MemoryStore::with_rows(vec![record("103", "existing")]);
        let batch = vec![
            record("101", "A"),
            record("102", "B"),
            record("103", "C"),
            record("104", "D"),
        ];

        let report = save_batch(&store, &batch).await;

        assert_eq!(report.inserted, vec![0, 1]);
        let failure = report.failure.expect("duplicate must stop the batch");
        assert_eq!(failure.index, 2);
        assert_eq!(
            failure.error,
            FormError::DuplicateKey {
                cin: "103".to_string()
            }
        );
        let cins: Vec<String> = store.rows().into_iter().map(|r| r.cin).collect();
        assert_eq!(cins, ["103", "101", "102"]);
    }

    #[tokio::test]
    async fn duplicate_inside_the_batch_is_caught() {
        let store = MemoryStore::new();
        let batch = vec![record("101", "A"), record("101", "A bis")];

        let report = save_batch(&store, &batch).await;

        assert_eq!(report.inserted, vec![0]);
        assert_eq!(report.failure.unwrap().index, 1);
        assert_eq!(store.rows().len(), 1);
    }

    #[tokio::test]
    async fn lookup_failure_aborts_before_any_insert_of_that_record() {
        let store = MemoryStore::new();
        store.fail_lookup_of("102");
        let batch = vec![record("101", "A"), record("102", "B"), record("103", "C")];

        let report = save_batch(&store, &batch).await;

        assert_eq!(report.inserted, vec![0]);
        let failure = report.failure.unwrap();
        assert_eq!(failure.index, 1);
        assert_eq!(failure.error.kind(), ErrorKind::Store);
        // lookup 101, insert 101, lookup 102; 103 never reached
        assert_eq!(store.calls(), 3);
    }

    #[tokio::test]
    async fn insert_failure_reports_store_error() {
        let store = MemoryStore::new();
        store.fail_insert_of("101");

        let report = save_batch(&store, &[record("101", "A"), record("102", "B")]).await;

        assert!(report.inserted.is_empty());
        let failure = report.failure.unwrap();
        assert_eq!(failure.index, 0);
        assert_eq!(failure.error, FormError::Store("insert of 101 failed".into()));
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn empty_batch_is_trivially_complete() {
        let store = MemoryStore::new();
        let report = save_batch(&store, &[]).await;
        assert!(report.is_complete());
        assert_eq!(store.calls(), 0);
    }
}
