use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use invoicer::auth::rate_limit::LoginThrottle;
use invoicer::cache::InvoiceListCache;
use invoicer::config::AppConfig;
use invoicer::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Configuration error: {e}");
        std::io::Error::other(e)
    })?;

    // Initialize database
    let pool = db::init_pool(&config.database_url, config.max_connections)
        .await
        .map_err(std::io::Error::other)?;
    db::run_migrations(&pool).await.map_err(std::io::Error::other)?;

    if config.seed_demo_data {
        db::seed_demo_data(&pool).await.map_err(std::io::Error::other)?;
    }

    // Session encryption key from SESSION_KEY so sessions survive restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let cache = InvoiceListCache::new();
    let throttle = LoginThrottle::new();
    let bind_addr = config.bind_addr.clone();

    log::info!("Starting server at http://{bind_addr}");

    let server_pool = pool.clone();
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
            .app_data(web::Data::new(server_pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(cache.clone()))
            .app_data(web::Data::new(throttle.clone()))
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    pool.close().await;
    log::info!("Database pool closed");
    Ok(())
}
