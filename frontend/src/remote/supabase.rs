use common::model::record::Record;
use common::store::postgrest::{self, PREFER_MINIMAL};
use common::store::RecordStore;
use gloo_net::http::{Request, RequestBuilder};

use super::describe_failure;

/// A Supabase table reached through its PostgREST endpoint.
pub struct SupabaseStore {
    endpoint: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(url: &str, anon_key: &str, table: &str) -> Self {
        Self {
            endpoint: postgrest::endpoint(url, table),
            anon_key: anon_key.to_string(),
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        postgrest::auth_headers(&self.anon_key)
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value))
    }
}

impl RecordStore for SupabaseStore {
    async fn lookup(&self, cin: &str) -> Result<Vec<String>, String> {
        let resp = self
            .authorized(Request::get(&self.endpoint))
            .query(postgrest::lookup_query(cin))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(describe_failure(resp).await);
        }
        let body = resp.text().await.map_err(|e| e.to_string())?;
        postgrest::parse_cins(&body)
    }

    async fn insert(&self, record: &Record) -> Result<(), String> {
        let (prefer, minimal) = PREFER_MINIMAL;
        let resp = self
            .authorized(Request::post(&self.endpoint))
            .header(prefer, minimal)
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
