use serde::{Deserialize, Serialize};

/// Webhook that receives the uploaded document.
pub const DEFAULT_EXTRACTION_URL: &str = "https://n8n.ksyni.net/webhook/envoi";

/// Table holding corrected records.
pub const DEFAULT_TABLE: &str = "correction";

/// Runtime settings the form needs to reach its collaborators.
///
/// Served by the backend at `GET /api/config` and loaded by the frontend on
/// first render. The frontend falls back to values compiled in from the
/// environment when the endpoint is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub extraction_url: String,
    pub store: StoreBackend,
}

/// Where corrected records are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreBackend {
    /// Hosted PostgREST table (`{url}/rest/v1/{table}`).
    Supabase {
        url: String,
        anon_key: String,
        table: String,
    },
    /// The companion backend's SQLite table, under `base_path`.
    Local { base_path: String },
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            extraction_url: DEFAULT_EXTRACTION_URL.to_string(),
            store: StoreBackend::Local {
                base_path: "/api/corrections".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_is_tagged_by_kind() {
        let config = ClientConfig {
            extraction_url: "http://hook".into(),
            store: StoreBackend::Supabase {
                url: "https://x.supabase.co".into(),
                anon_key: "key".into(),
                table: DEFAULT_TABLE.into(),
            },
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["store"]["kind"], "supabase");
        assert_eq!(json["store"]["table"], "correction");

        let back: ClientConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn default_targets_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.extraction_url, DEFAULT_EXTRACTION_URL);
        assert!(matches!(config.store, StoreBackend::Local { .. }));
    }
}
