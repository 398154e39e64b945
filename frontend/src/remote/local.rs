use common::model::record::Record;
use common::store::RecordStore;
use gloo_net::http::Request;

use super::describe_failure;

/// The backend's own `correction` table (`STORE_BACKEND=local`).
pub struct LocalStore {
    base_path: String,
}

impl LocalStore {
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: base_path.to_string(),
        }
    }
}

impl RecordStore for LocalStore {
    async fn lookup(&self, cin: &str) -> Result<Vec<String>, String> {
        let resp = Request::get(&self.base_path)
            .query([("cin", cin)])
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(describe_failure(resp).await);
        }
        resp.json::<Vec<String>>().await.map_err(|e| e.to_string())
    }

    async fn insert(&self, record: &Record) -> Result<(), String> {
        let resp = Request::post(&self.base_path)
            .json(record)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(describe_failure(resp).await);
        }
        Ok(())
    }
}
