//! # Corrections Service Module
//!
//! Local stand-in for the hosted `correction` table, used when the server is
//! started with `STORE_BACKEND=local`. It offers exactly what the form's save
//! loop needs and nothing more:
//!
//! *   **`GET /api/corrections?cin=<cin>`**: `lookup::process`, answers a JSON
//!     array with the `cin` of every stored row matching `cin` (empty when the
//!     number is free).
//! *   **`POST /api/corrections`**: `insert::process`, stores one `Record`
//!     sent as JSON.
//!
//! Rows live in the SQLite file named by `DATABASE_PATH`.

pub mod db;
mod insert;
mod lookup;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for the correction table endpoints.
pub const API_PATH: &str = "/api/corrections";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(lookup::process))
        .route("", post().to(insert::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::record::Record;

    fn config_for(dir: &tempfile::TempDir) -> ServerConfig {
        let db = dir.path().join("corrections.sqlite");
        let db = db.to_str().unwrap().to_string();
        ServerConfig::from_lookup(|key| match key {
            "DATABASE_PATH" => Some(db.clone()),
            _ => None,
        })
        .unwrap()
    }

    #[actix_web::test]
    async fn insert_then_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(&dir)))
                .service(configure_routes()),
        )
        .await;

        let free: Vec<String> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/corrections?cin=101").to_request(),
        )
        .await;
        assert!(free.is_empty());

        let record = Record::from_pairs([("cin", "101"), ("nom", "Rasoa")]);
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/corrections")
                .set_json(&record)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let taken: Vec<String> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/corrections?cin=101").to_request(),
        )
        .await;
        assert_eq!(taken, ["101"]);
    }

    #[actix_web::test]
    async fn lookup_requires_a_cin() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(&dir)))
                .service(configure_routes()),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/corrections").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unreachable_database_is_service_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(&dir);
        config.database_path = dir
            .path()
            .join("missing/dir/c.sqlite")
            .to_str()
            .unwrap()
            .to_string();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .service(configure_routes()),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/corrections")
                .set_json(Record::from_pairs([("cin", "1")]))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
