//! Contract with the table that receives corrected records.

mod memory;
pub mod postgrest;

pub use memory::MemoryStore;

use crate::model::record::Record;

/// Point lookup and single-row insert on the `correction` table.
///
/// Errors are the collaborator's own message; the save loop wraps them into
/// `FormError::Store`. No uniqueness is assumed from the table itself.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Returns the `cin` of every existing row whose `cin` equals `cin`.
    async fn lookup(&self, cin: &str) -> Result<Vec<String>, String>;

    async fn insert(&self, record: &Record) -> Result<(), String>;
}
