mod api;
mod config;
mod database;
mod middleware;
mod models;
mod seeds;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::{Compress, Logger}, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::{JsonFileStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();

    log::info!("🚀 Starting Users API...");
    log::info!("🔢 Id strategy: {:?}", config.id_strategy);
    log::info!("🚦 Write failure status policy: {:?}", config.write_failure_status);

    // 🌱 Make sure there is a collection to read from
    seeds::users_file_seed::seed_users_file(&config.users_file).await?;

    let file_store = JsonFileStore::new(config.users_file.clone(), config.id_strategy);
    log::info!("📁 Users file: {}", file_store.path().display());

    let store: Arc<dyn UserStore> = Arc::new(file_store);
    let store_data: web::Data<dyn UserStore> = web::Data::from(store);
    let policy_data = web::Data::new(config.write_failure_status);
    let cors_origins = config.cors_allowed_origins.clone();

    log::info!("🌐 Server starting on http://{}", config.bind_address());
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", config.bind_address());

    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .app_data(policy_data.clone())
            .wrap(cors)
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .wrap(Compress::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Metrics
            .route("/metrics", web::get().to(api::metrics::get_metrics))
            // Users: POST/GET /api/users, GET /api/users/{id}
            .configure(api::users::routes)
    })
    .bind(config.bind_address())?
    .run()
    .await
}
