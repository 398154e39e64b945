use actix_web::{web, HttpResponse, Responder};
use log::info;
use serde::Deserialize;

use super::db;
use crate::config::ServerConfig;

#[derive(Deserialize)]
/// Query string of the lookup endpoint.
pub struct CinQuery {
    pub cin: String,
}

/// `GET /api/corrections?cin=<cin>`
///
/// - `200 OK` with a JSON array of matching `cin` values.
/// - `503 Service Unavailable` when the database cannot be read.
pub async fn process(config: web::Data<ServerConfig>, query: web::Query<CinQuery>) -> impl Responder {
    match find_existing(&config.database_path, &query.cin) {
        Ok(cins) => {
            info!("lookup cin {:?}: {} match(es)", query.cin, cins.len());
            HttpResponse::Ok().json(cins)
        }
        Err(e) => HttpResponse::ServiceUnavailable()
            .body(format!("Erreur de lecture de la table correction: {}", e)),
    }
}

fn find_existing(database_path: &str, cin: &str) -> Result<Vec<String>, String> {
    let conn = db::open(database_path)?;
    db::find_cins(&conn, cin)
}
