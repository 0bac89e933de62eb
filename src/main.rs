use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use team_registration::auth::rate_limit::RateLimiter;
use team_registration::config::Config;
use team_registration::handlers;
use team_registration::sheets::{GoogleSheetsClient, SheetCache};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load .env: {e}");
        }
    }
    env_logger::init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let token_provider = GoogleSheetsClient::token_provider(config.service_account_json.as_deref())
        .await
        .map_err(|e| {
            log::error!("Failed to initialize Google credentials: {e}");
            std::io::Error::other(e)
        })?;
    let client = GoogleSheetsClient::new(&config.api_base, &config.spreadsheet_id, token_provider)
        .map_err(|e| {
            log::error!("Failed to create Sheets client: {e}");
            std::io::Error::other(e)
        })?;

    let cache = web::Data::new(SheetCache::new(Arc::new(client), config.cache_ttl));
    let limiter = web::Data::new(RateLimiter::new());

    // Session encryption key — load from SESSION_KEY for sessions that survive restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+) — generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    log::info!(
        "Starting server at http://{} (sheet cache {}s)",
        config.bind_addr,
        config.cache_ttl.as_secs()
    );

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(cache.clone())
            .app_data(limiter.clone())
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
