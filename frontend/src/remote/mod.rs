//! Browser-side collaborators of the form: the extraction webhook and the
//! table that receives corrected records.

mod local;
mod supabase;
mod webhook;

pub use local::LocalStore;
pub use supabase::SupabaseStore;
pub use webhook::WebhookExtractor;

use common::model::client_config::StoreBackend;
use common::model::record::Record;
use common::store::RecordStore;

/// The store selected by `ClientConfig::store`.
pub enum RemoteStore {
    Supabase(SupabaseStore),
    Local(LocalStore),
}

impl From<&StoreBackend> for RemoteStore {
    fn from(backend: &StoreBackend) -> Self {
        match backend {
            StoreBackend::Supabase {
                url,
                anon_key,
                table,
            } => RemoteStore::Supabase(SupabaseStore::new(url, anon_key, table)),
            StoreBackend::Local { base_path } => RemoteStore::Local(LocalStore::new(base_path)),
        }
    }
}

impl RecordStore for RemoteStore {
    async fn lookup(&self, cin: &str) -> Result<Vec<String>, String> {
        match self {
            RemoteStore::Supabase(store) => store.lookup(cin).await,
            RemoteStore::Local(store) => store.lookup(cin).await,
        }
    }

    async fn insert(&self, record: &Record) -> Result<(), String> {
        match self {
            RemoteStore::Supabase(store) => store.insert(record).await,
            RemoteStore::Local(store) => store.insert(record).await,
        }
    }
}

/// Turns a non-success response into the message surfaced to the user.
async fn describe_failure(resp: gloo_net::http::Response) -> String {
    let body = resp.text().await.unwrap_or_default();
    if body.trim().is_empty() {
        format!("{} {}", resp.status(), resp.status_text())
    } else {
        format!("{} {}", resp.status(), body.trim())
    }
}
