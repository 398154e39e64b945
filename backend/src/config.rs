//! Server settings read from the environment.
//!
//! A `.env` file in the working directory (or a parent) is loaded first;
//! variables already set in the process take precedence over it.
//!
//! | variable            | default                         |
//! |---------------------|---------------------------------|
//! | `HOST`              | `127.0.0.1`                     |
//! | `PORT`              | `8080`                          |
//! | `OPEN_BROWSER`      | `true`                          |
//! | `DATABASE_PATH`     | `corrections.sqlite`            |
//! | `EXTRACTION_URL`    | the n8n `envoi` webhook         |
//! | `STORE_BACKEND`     | `supabase` if `SUPABASE_URL` is set, else `local` |
//! | `SUPABASE_URL`      | required for `supabase`         |
//! | `SUPABASE_ANON_KEY` | required for `supabase`         |
//! | `SUPABASE_TABLE`    | `correction`                    |

use common::model::client_config::{
    ClientConfig, StoreBackend, DEFAULT_EXTRACTION_URL, DEFAULT_TABLE,
};

use log::info;

use crate::services::corrections::API_PATH as CORRECTIONS_PATH;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
    /// SQLite file backing the local `correction` table.
    pub database_path: String,
    /// Published to the browser at `GET /api/config`.
    pub client: ClientConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        match dotenvy::dotenv() {
            Ok(path) => info!("loaded {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(format!(".env illisible: {e}")),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the settings from any key/value source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let var = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| format!("PORT invalide ({raw}): {e}"))?,
            None => 8080,
        };

        let open_browser = match var("OPEN_BROWSER").as_deref().map(str::trim) {
            None | Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => return Err(format!("OPEN_BROWSER invalide: {other}")),
        };

        let supabase_url = var("SUPABASE_URL");
        let backend = var("STORE_BACKEND").unwrap_or_else(|| {
            if supabase_url.is_some() {
                "supabase".to_string()
            } else {
                "local".to_string()
            }
        });

        let store = match backend.trim() {
            "local" => StoreBackend::Local {
                base_path: CORRECTIONS_PATH.to_string(),
            },
            "supabase" => StoreBackend::Supabase {
                url: supabase_url
                    .ok_or("SUPABASE_URL est requis pour STORE_BACKEND=supabase")?
                    .trim_end_matches('/')
                    .to_string(),
                anon_key: var("SUPABASE_ANON_KEY")
                    .ok_or("SUPABASE_ANON_KEY est requis pour STORE_BACKEND=supabase")?,
                table: var("SUPABASE_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            },
            other => return Err(format!("STORE_BACKEND inconnu: {other}")),
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            open_browser,
            database_path: var("DATABASE_PATH").unwrap_or_else(|| "corrections.sqlite".to_string()),
            client: ClientConfig {
                extraction_url: var("EXTRACTION_URL")
                    .unwrap_or_else(|| DEFAULT_EXTRACTION_URL.to_string()),
                store,
            },
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, String> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_to_local_store() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert!(config.open_browser);
        assert_eq!(config.database_path, "corrections.sqlite");
        assert_eq!(config.client.extraction_url, DEFAULT_EXTRACTION_URL);
        assert_eq!(
            config.client.store,
            StoreBackend::Local {
                base_path: "/api/corrections".into()
            }
        );
    }

    #[test]
    fn supabase_url_selects_supabase() {
        let config = config_from(&[
            ("SUPABASE_URL", "https://abc.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
        ])
        .unwrap();
        assert_eq!(
            config.client.store,
            StoreBackend::Supabase {
                url: "https://abc.supabase.co".into(),
                anon_key: "anon".into(),
                table: "correction".into(),
            }
        );
    }

    #[test]
    fn supabase_without_key_is_refused() {
        let err = config_from(&[
            ("STORE_BACKEND", "supabase"),
            ("SUPABASE_URL", "https://abc.supabase.co"),
        ])
        .unwrap_err();
        assert!(err.contains("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(config_from(&[("PORT", "http")]).unwrap_err().contains("PORT"));
        assert!(config_from(&[("OPEN_BROWSER", "maybe")]).is_err());
        assert!(config_from(&[("STORE_BACKEND", "mongo")]).is_err());
    }

    #[test]
    fn supabase_settings_can_come_from_a_dotenv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "# hosted table\n\
             CIN_TEST_SUPABASE_URL=https://abc.supabase.co\n\
             CIN_TEST_SUPABASE_ANON_KEY=\"anon key\"\n",
        )
        .unwrap();

        dotenvy::from_path(&path).unwrap();
        let config = ServerConfig::from_lookup(|key| {
            std::env::var(format!("CIN_TEST_{key}")).ok()
        })
        .unwrap();

        assert_eq!(
            config.client.store,
            StoreBackend::Supabase {
                url: "https://abc.supabase.co".into(),
                anon_key: "anon key".into(),
                table: "correction".into(),
            }
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("PORT", " "), ("OPEN_BROWSER", "0")]).unwrap();
        assert_eq!(config.port, 8080);
        assert!(!config.open_browser);
    }
}
