// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, notification, profile, quiz},
    state::AppState,
    utils::guard::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, me, quizzes, notifications, admin).
/// * Applies global middleware (Trace, CORS).
/// * Falls back to the static page directory for everything else.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = ["localhost", "127.0.0.1"]
        .iter()
        .filter_map(|host| format!("http://{}:{}", host, state.config.port).parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout));

    let me_routes = Router::new()
        .route("/", get(profile::get_me))
        .route("/performance", get(profile::get_my_performance))
        .route("/export", get(profile::export_me))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let quiz_routes = Router::new()
        .route("/{level}", get(quiz::list_quizzes))
        .route("/{level}/{id}", get(quiz::get_quiz))
        // Protected quiz routes
        .merge(
            Router::new()
                .route("/{level}/{id}/submit", post(quiz::submit_quiz))
                .layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        );

    let notification_routes = Router::new()
        .route("/{audience}", get(notification::list_notifications))
        .route("/{audience}/{id}/read", post(notification::mark_read));

    let admin_routes = Router::new()
        .route("/session", get(admin::get_session))
        .route("/notifications", post(admin::create_notification))
        .route("/users", get(admin::list_users))
        .route("/users/{email}/export", get(admin::export_user))
        .route("/analytics", get(admin::get_analytics))
        .route("/audit", get(admin::get_audit_log))
        .layer(middleware::from_fn_with_state(state.clone(), admin_middleware))
        // Login sits outside the session check
        .route("/login", post(admin::login));

    let static_pages = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/me", me_routes)
        .nest("/api/quizzes", quiz_routes)
        .route("/api/leaderboard/{level}", get(quiz::get_leaderboard))
        .nest("/api/notifications", notification_routes)
        .nest("/api/admin", admin_routes)
        .fallback_service(static_pages)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
