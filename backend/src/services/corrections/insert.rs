use actix_web::{web, HttpResponse, Responder};
use common::model::record::Record;
use log::{error, info};

use super::db;
use crate::config::ServerConfig;

/// `POST /api/corrections`
///
/// Stores the record as-is. No duplicate check happens here; the form looks
/// the `cin` up first.
pub async fn process(config: web::Data<ServerConfig>, payload: web::Json<Record>) -> impl Responder {
    match save_record(&config.database_path, &payload) {
        Ok(()) => {
            info!("stored cin {:?}", payload.cin);
            HttpResponse::Ok().body("Fiche enregistrée")
        }
        Err(e) => {
            error!("insert of cin {:?} failed: {}", payload.cin, e);
            HttpResponse::ServiceUnavailable().body(format!("Erreur d'enregistrement: {}", e))
        }
    }
}

fn save_record(database_path: &str, record: &Record) -> Result<(), String> {
    let conn = db::open(database_path)?;
    db::insert(&conn, record)
}
