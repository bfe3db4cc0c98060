use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use taskdeck::{
    config::Config,
    routes,
    state::AppState,
    store::{self, PgTaskStore, PgUserStore},
};

fn to_io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        to_io_error(e)
    })?;

    let state = match &config.database_url {
        Some(database_url) => {
            let pool = store::postgres::connect(database_url).await.map_err(|e| {
                log::error!("Failed to connect to database: {}", e);
                to_io_error(e)
            })?;
            log::info!("Using PostgreSQL task store");
            AppState::new(
                Arc::new(PgTaskStore::new(pool.clone())),
                Arc::new(PgUserStore::new(pool)),
                config.auth.clone(),
            )
        }
        None => {
            log::warn!("DATABASE_URL not set; tasks and users are kept in memory only");
            AppState::in_memory(config.auth.clone())
        }
    };
    let state = web::Data::new(state);

    log::info!("Starting taskdeck server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config(state.clone()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
