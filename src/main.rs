use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use taskdesk::auth::{AuthMiddleware, TokenIssuer};
use taskdesk::config::{Config, StorageBackend};
use taskdesk::routes;
use taskdesk::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl_secs);

    let state = match config.storage {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .clone()
                .expect("DATABASE_URL must be set");
            let pool = PgPool::connect(&database_url)
                .await
                .expect("Failed to connect to database");
            AppState::postgres(pool, tokens)
        }
        StorageBackend::Memory => {
            log::warn!("Using the in-memory storage backend; data will not survive a restart");
            AppState::in_memory(tokens)
        }
    };

    log::info!("Starting TaskDesk server at {}", config.server_url());
    let bind_address = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
