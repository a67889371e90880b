use actix_cors::Cors;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use cadastra::auth::rate_limit::RateLimiter;
use cadastra::config::Config;
use cadastra::{db, fields, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Config::from_env();

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let admin_username =
        std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let admin_password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    db::seed_admin(&pool, &admin_username, &admin_password)
        .await
        .expect("Failed to seed admin account");

    std::fs::create_dir_all(&config.upload_dir).expect("Failed to create upload directory");

    // Session encryption key from SESSION_KEY for sessions that survive restarts
    let secret_key = match &config.session_key {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+), generating random key",
                val.len()
            );
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    log::info!(
        "Starting server at http://{} with {} catalog field(s)",
        config.bind_addr,
        fields::CATALOG.len()
    );

    let bind_addr = config.bind_addr.clone();
    let limiter = RateLimiter::default();

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);
        for origin in &config.cors_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(session_mw)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(limiter.clone()))
            // Uploaded logos
            .service(actix_files::Files::new("/uploads", &config.upload_dir))
            .configure(handlers::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
