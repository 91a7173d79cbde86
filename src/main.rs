use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use dashmap::DashMap;
use dotenvy::dotenv;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

mod handlers {
    pub mod admin_handlers;
    pub mod auth_dtos;
    pub mod auth_handlers;
    pub mod auth_middleware;
    pub mod chat_handlers;
    pub mod content_handlers;
}
mod api {
    pub mod gemini;
}
mod models {
    pub mod site_models;
}
mod utils {
    pub mod store_links;
}
mod editor;
mod store;

use api::gemini::GeminiClient;
use editor::EditorSession;
use handlers::{admin_handlers, auth_handlers, chat_handlers, content_handlers};
use store::{ContentStore, FileBackend};

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    pub store: Arc<ContentStore>,
    pub gemini: GeminiClient,
    pub editor_sessions: DashMap<String, EditorSession>,
    pub jwt_secret: String,
}

pub fn validate_env() {
    // GEMINI_API_KEY is deliberately not required: a missing key is a
    // reportable state surfaced through the admin diagnostics.
    let required_vars = ["JWT_SECRET_KEY"];
    for var in required_vars.iter() {
        std::env::var(var).expect(&format!("{} must be set", var));
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fareapp_backend=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    validate_env();

    let data_dir =
        std::env::var("CONTENT_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let content_store = Arc::new(ContentStore::new(Box::new(FileBackend::new(&data_dir))));

    // Credential resolved exactly once; handlers only see the client.
    let mut gemini = GeminiClient::new(std::env::var("GEMINI_API_KEY").ok());
    if let Ok(model) = std::env::var("GEMINI_MODEL") {
        gemini = gemini.with_model(&model);
    }
    let key_status = gemini.key_status();
    tracing::info!(
        present = key_status.present,
        length = key_status.length,
        "gemini credential status"
    );

    let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");

    let state = Arc::new(AppState {
        store: content_store,
        gemini,
        editor_sessions: DashMap::new(),
        jwt_secret,
    });

    // Public routes: site content and the visitor chat
    let public_routes = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/content/branding", get(content_handlers::get_branding))
        .route("/api/content/mockups", get(content_handlers::get_mockups))
        .route("/api/content/modules", get(content_handlers::get_modules))
        .route("/api/content/events", get(content_handlers::events))
        .route("/api/chat", post(chat_handlers::send_message))
        .route("/api/admin/login", post(auth_handlers::login));

    // Admin routes: every handler requires a live editor session token
    let admin_routes = Router::new()
        .route("/api/admin/session", get(admin_handlers::get_session))
        .route("/api/admin/session/mockups", post(admin_handlers::add_mockup))
        .route(
            "/api/admin/session/mockups/{id}",
            delete(admin_handlers::remove_mockup),
        )
        .route(
            "/api/admin/session/mockups/{id}/field",
            put(admin_handlers::edit_mockup_field),
        )
        .route(
            "/api/admin/session/settings",
            put(admin_handlers::update_settings),
        )
        .route("/api/admin/save", post(admin_handlers::save))
        .route("/api/admin/close", post(admin_handlers::close))
        .route("/api/admin/clear", post(admin_handlers::clear_all))
        .route("/api/admin/key-status", get(admin_handlers::key_status))
        .route(
            "/api/admin/test-connection",
            post(admin_handlers::test_connection),
        );

    let app = Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        // Built frontend assets (hero, galleries, chat widget markup)
        .fallback_service(ServeDir::new("public"))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(AllowOrigin::exact(
                    std::env::var("FRONTEND_URL")
                        .unwrap_or_else(|_| "http://localhost:8080".to_string())
                        .parse()
                        .expect("Invalid FRONTEND_URL"),
                ))
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::ACCEPT,
                ]),
        )
        .with_state(state);

    use tokio::net::TcpListener;
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Starting server on port {}", port);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
