mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod images;
mod mail;
mod middleware;
mod models;
mod ordering;
mod popup;
mod redisdb;
mod routes;
mod storage;
mod tracing_config;
mod utils;

use axum::http::{
    HeaderValue, Method,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use config::Config;
use db::{DBClient, SectionExt};
use dotenv::dotenv;
use redisdb::RedisClient;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use storage::StorageClient;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub env: Arc<Config>,
    pub db_client: db::DBClient,
    pub redis_client: redisdb::RedisClient,
    pub storage_client: storage::StorageClient,
}

#[tokio::main]
async fn main() {
    let _guard = tracing_config::init_tracing();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!("Connection to the database is successful");
            pool
        }
        Err(err) => {
            tracing::error!("Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .frontend_url
                .parse::<HeaderValue>()
                .expect("FRONTEND_URL must be a valid origin"),
        )
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    let db_client = DBClient::new(pool);

    // The section rows must exist before the first layout read.
    if let Err(e) = db_client.seed_sections().await {
        tracing::error!("Failed to seed sections: {:?}", e);
        std::process::exit(1);
    }

    //scheduler
    db_client.start_stats_retention_task().await;

    //redis
    let manager = match redis::Client::open(config.redis_url.clone()) {
        Ok(client) => match client.get_connection_manager().await {
            Ok(manager) => manager,
            Err(err) => {
                tracing::error!("Failed to connect to redis: {:?}", err);
                std::process::exit(1);
            }
        },
        Err(err) => {
            tracing::error!("Invalid redis url: {:?}", err);
            std::process::exit(1);
        }
    };

    let redis_client = RedisClient::new(manager);

    let storage_client = StorageClient::new(
        reqwest::Client::new(),
        config.storage_url.clone(),
        config.storage_bucket.clone(),
        config.storage_service_key.clone(),
    );

    let app_state = AppState {
        env: Arc::new(config.clone()),
        db_client,
        redis_client,
        storage_client,
    };

    let app = routes::create_router(app_state).layer(cors);

    tracing::info!("Server is running on http://localhost:{}", config.port);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("Failed to bind port {}: {:?}", config.port, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("Server error: {:?}", err);
        std::process::exit(1);
    }
}
