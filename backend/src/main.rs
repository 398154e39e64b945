mod config;
mod services;

use crate::config::ServerConfig;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use common::model::client_config::StoreBackend;
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;
use std::io;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(|e| {
        error!("Configuration invalide: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;
    let url = config.url();

    match &config.client.store {
        StoreBackend::Local { .. } => {
            // Fail at startup rather than on the first save.
            services::corrections::db::open(&config.database_path)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            info!("Local correction table at {}", config.database_path);
        }
        StoreBackend::Supabase { url, table, .. } => {
            info!("Records go to Supabase table '{}' at {}", table, url);
        }
    }
    info!("Extraction webhook: {}", config.client.extraction_url);

    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    info!("Server running at {}", url);

    let bind = (config.host.clone(), config.port);
    let data = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(1024 * 1024))
            .app_data(data.clone())
            .service(services::client_config::configure_routes())
            .service(services::corrections::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
        .bind(bind)?
        .run()
        .await
}
