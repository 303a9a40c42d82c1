use std::sync::Arc;

use fritter_backend::domain::auth::AuthService;
use fritter_backend::domain::channel::{ChannelService, ChannelStore};
use fritter_backend::domain::feed::{FeedService, FeedServiceApi, FeedStore};
use fritter_backend::domain::freet::{FreetService, FreetStore};
use fritter_backend::domain::user::{UserService, UserStore};
use fritter_backend::infrastructure::config::{Config, LogFormat};
use fritter_backend::infrastructure::db::{check_connection, create_pool};
use fritter_backend::infrastructure::http::start_http_server;
use fritter_backend::infrastructure::repositories::{
    ChannelRepository, FeedRepository, FreetRepository, UserRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Fritter Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    tracing::info!("Instantiating repositories...");
    let user_store: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.clone()));
    let freet_store: Arc<dyn FreetStore> = Arc::new(FreetRepository::new(pool.clone()));
    let feed_store: Arc<dyn FeedStore> = Arc::new(FeedRepository::new(pool.clone()));
    let channel_store: Arc<dyn ChannelStore> = Arc::new(ChannelRepository::new(pool.clone()));

    // 2. Instantiate services (inject stores)
    tracing::info!("Instantiating services...");
    let auth_service = Arc::new(AuthService::new(
        user_store.clone(),
        config.jwt_secret.clone(),
        config.jwt_expiration_hours,
    ));
    let feed_service = Arc::new(FeedService::new(
        feed_store.clone(),
        freet_store.clone(),
        user_store.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        user_store.clone(),
        feed_service.clone() as Arc<dyn FeedServiceApi>,
    ));
    let freet_service = Arc::new(FreetService::new(
        freet_store.clone(),
        user_store.clone(),
    ));
    let channel_service = Arc::new(ChannelService::new(channel_store.clone()));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let auth_controller = Arc::new(fritter_backend::controllers::auth::AuthController::new(
        auth_service,
    ));
    let user_controller = Arc::new(fritter_backend::controllers::user::UserController::new(
        user_service,
    ));
    let freet_controller = Arc::new(fritter_backend::controllers::freet::FreetController::new(
        freet_service,
    ));
    let feed_controller = Arc::new(fritter_backend::controllers::feed::FeedController::new(
        feed_service,
    ));
    let channel_controller = Arc::new(
        fritter_backend::controllers::channel::ChannelController::new(channel_service),
    );

    // Start HTTP server with all routes
    start_http_server(
        pool,
        config,
        user_store,
        auth_controller,
        user_controller,
        freet_controller,
        feed_controller,
        channel_controller,
    )
    .await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "fritter_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "fritter_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
