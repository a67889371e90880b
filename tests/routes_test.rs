use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::http::StatusCode;
use actix_web::{App, cookie::Key, test, web};
use sqlx::postgres::PgPoolOptions;

use cadastra::auth::rate_limit::RateLimiter;
use cadastra::config::Config;
use cadastra::handlers;

fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/cadastra".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        session_key: None,
        public_base_url: "http://localhost:8080".to_string(),
        upload_dir: "uploads".to_string(),
        cors_origins: Vec::new(),
        max_upload_bytes: 2 * 1024 * 1024,
    }
}

// The route table with a lazy pool: nothing here touches the database, the
// requests are answered by routing and the session checks alone.
macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new(
                    PgPoolOptions::new()
                        .connect_lazy("postgres://localhost/cadastra")
                        .unwrap(),
                ))
                .app_data(web::Data::new(test_config()))
                .app_data(web::Data::new(RateLimiter::default()))
                .configure(handlers::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn unknown_api_route_answers_json_404() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/api/nao-existe").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Rota não encontrada.");
}

#[actix_web::test]
async fn unknown_root_path_answers_404_not_401() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/qualquer-coisa").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn user_listing_requires_a_session() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/api/users").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Não autenticado.");
}

#[actix_web::test]
async fn logo_upload_requires_a_session() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/uploads/logo")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn report_requires_a_session() {
    let app = test_app!();
    let req = test::TestRequest::get()
        .uri("/api/submissions/report")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
