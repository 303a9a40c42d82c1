use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::{
    controllers::{
        auth::AuthController, channel::ChannelController, feed::FeedController,
        freet::FreetController, health, user::UserController,
    },
    domain::user::UserStore,
    infrastructure::auth::{auth_middleware, request_id_middleware},
};

/// Build the application router. Kept separate from the server startup so
/// tests can drive the same routes against in-memory stores.
pub fn build_router(
    config: Arc<Config>,
    user_store: Arc<dyn UserStore>,
    auth_controller: Arc<AuthController>,
    user_controller: Arc<UserController>,
    freet_controller: Arc<FreetController>,
    feed_controller: Arc<FeedController>,
    channel_controller: Arc<ChannelController>,
) -> Router {
    let auth_layer = middleware::from_fn_with_state(
        (user_store.clone(), config.clone()),
        auth_middleware,
    );

    // Public routes: registration, login, reading freets
    let public_routes = Router::new()
        .route("/api/users", axum::routing::post(UserController::register))
        .with_state(user_controller.clone())
        .merge(
            Router::new()
                .route("/api/auth/login", axum::routing::post(AuthController::login))
                .with_state(auth_controller.clone()),
        )
        .merge(
            Router::new()
                .route("/api/freets", get(FreetController::list_freets))
                .with_state(freet_controller.clone()),
        );

    // User routes (require authentication)
    let user_routes = Router::new()
        .route(
            "/api/users/me",
            get(UserController::get_me).delete(UserController::delete_me),
        )
        .route(
            "/api/users/me/following",
            get(UserController::list_following),
        )
        .route(
            "/api/users/me/following/:username",
            axum::routing::post(UserController::follow).delete(UserController::unfollow),
        )
        .with_state(user_controller.clone())
        .layer(auth_layer.clone());

    // Freet routes (require authentication)
    let freet_routes = Router::new()
        .route("/api/freets", axum::routing::post(FreetController::create_freet))
        .route(
            "/api/freets/:freetId",
            axum::routing::delete(FreetController::delete_freet),
        )
        .with_state(freet_controller.clone())
        .layer(auth_layer.clone());

    // Feed routes (require authentication)
    let feed_routes = Router::new()
        .route(
            "/api/feeds",
            get(FeedController::get_feed).put(FeedController::reset_active_filter),
        )
        .route(
            "/api/feeds/:activeFilter",
            axum::routing::put(FeedController::set_active_filter),
        )
        .with_state(feed_controller.clone())
        .layer(auth_layer.clone());

    // Channel routes (require authentication)
    let channel_routes = Router::new()
        .route(
            "/api/channels",
            get(ChannelController::list_channels).post(ChannelController::create_channel),
        )
        .route(
            "/api/channels/:channelId",
            axum::routing::delete(ChannelController::delete_channel),
        )
        .route(
            "/api/channels/:channelId/members",
            get(ChannelController::list_members),
        )
        .route(
            "/api/channels/:channelId/members/me",
            axum::routing::post(ChannelController::join_channel)
                .delete(ChannelController::leave_channel),
        )
        .with_state(channel_controller.clone())
        .layer(auth_layer);

    Router::new()
        .route("/health", get(health::health))
        .merge(public_routes)
        .merge(user_routes)
        .merge(freet_routes)
        .merge(feed_routes)
        .merge(channel_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
#[allow(clippy::too_many_arguments)]
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    user_store: Arc<dyn UserStore>,
    auth_controller: Arc<AuthController>,
    user_controller: Arc<UserController>,
    freet_controller: Arc<FreetController>,
    feed_controller: Arc<FeedController>,
    channel_controller: Arc<ChannelController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(
        config.clone(),
        user_store,
        auth_controller,
        user_controller,
        freet_controller,
        feed_controller,
        channel_controller,
    )
    .merge(
        Router::new()
            .route("/health/ready", get(health::health_ready))
            .with_state(pool.clone()),
    );

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
