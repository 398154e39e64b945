//! `GET /api/config`: the settings the browser form needs to reach the
//! extraction webhook and the correction table.

use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Responder, Scope};

use crate::config::ServerConfig;

const API_PATH: &str = "/api/config";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

async fn process(config: web::Data<ServerConfig>) -> impl Responder {
    HttpResponse::Ok().json(&config.client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use common::model::client_config::ClientConfig;

    #[actix_web::test]
    async fn publishes_the_client_section() {
        let config = ServerConfig::from_lookup(|key| match key {
            "EXTRACTION_URL" => Some("http://localhost:5678/webhook/envoi".to_string()),
            _ => None,
        })
        .unwrap();
        let expected = config.client.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .service(configure_routes()),
        )
        .await;

        let served: ClientConfig = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/config").to_request(),
        )
        .await;
        assert_eq!(served, expected);
    }
}
