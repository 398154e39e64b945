use std::cell::{Cell, RefCell};

use super::RecordStore;
use crate::model::record::Record;

/// In-process table, single-threaded like the form that drives it.
///
/// Failures can be scripted per `cin` to exercise the save loop's abort paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RefCell<Vec<Record>>,
    failing_lookups: RefCell<Vec<String>>,
    failing_inserts: RefCell<Vec<String>>,
    calls: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Record>) -> Self {
        Self {
            rows: RefCell::new(rows),
            ..Self::default()
        }
    }

    /// Makes every lookup of `cin` fail.
    pub fn fail_lookup_of(&self, cin: &str) {
        self.failing_lookups.borrow_mut().push(cin.to_string());
    }

    /// Makes every insert of a record with this `cin` fail.
    pub fn fail_insert_of(&self, cin: &str) {
        self.failing_inserts.borrow_mut().push(cin.to_string());
    }

    pub fn rows(&self) -> Vec<Record> {
        self.rows.borrow().clone()
    }

    /// Number of lookups and inserts served so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl RecordStore for MemoryStore {
    async fn lookup(&self, cin: &str) -> Result<Vec<String>, String> {
        self.calls.set(self.calls.get() + 1);
        if self.failing_lookups.borrow().iter().any(|c| c == cin) {
            return Err(format!("lookup of {cin} failed"));
        }
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|row| row.cin == cin)
            .map(|row| row.cin.clone())
            .collect())
    }

    async fn insert(&self, record: &Record) -> Result<(), String> {
        self.calls.set(self.calls.get() + 1);
        if self.failing_inserts.borrow().iter().any(|c| *c == record.cin) {
            return Err(format!("insert of {} failed", record.cin));
        }
        self.rows.borrow_mut().push(record.clone());
        Ok(())
    }
}
