// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use ecoquiz::{
    config::Config,
    db::Db,
    error::AppError,
    models::user::{RegisterRequest, Role},
    routes,
    services::session,
    state::AppState,
    store::{FileStore, keys},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Open the persistent store
    let store = FileStore::open(&config.store_path).unwrap_or_else(|e| {
        panic!(
            "Failed to open store at {}: {}",
            config.store_path.display(),
            e
        )
    });
    tracing::info!("Store opened at {}", store.path().display());

    let db = Db::new(Arc::new(store));

    // Seed default collections on first run
    match db.initialize() {
        Ok(true) => tracing::info!("First run: default quizzes seeded."),
        Ok(false) => tracing::info!("Existing data found, skipping seeding."),
        Err(e) => panic!("Failed to initialize storage: {}", e),
    }

    // Seed Admin User
    if let Err(e) = seed_admin_user(&db, &config) {
        tracing::error!("Failed to seed admin user: {:?}", e);
    }

    let state = AppState::new(db, config.clone());

    // Create the Axum application router
    let app = routes::create_router(state);

    // Local only
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}

fn seed_admin_user(db: &Db, config: &Config) -> Result<(), AppError> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };

    let users: Vec<ecoquiz::models::user::User> = db.read(keys::USERS)?;
    if users.iter().any(|u| &u.email == email) {
        return Ok(());
    }

    tracing::info!("Seeding admin user: {}", email);
    session::register_user(
        db,
        RegisterRequest {
            email: email.clone(),
            name: "Administrator".to_string(),
            password: password.clone(),
            role: Role::Admin,
            level: None,
        },
    )?;
    tracing::info!("Admin user created successfully.");
    Ok(())
}
