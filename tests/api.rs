//! Router-level tests: the full axum application driven through
//! `tower::ServiceExt::oneshot`, with in-memory store implementations
//! standing in for Postgres.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

use fritter_backend::controllers::auth::AuthController;
use fritter_backend::controllers::channel::ChannelController;
use fritter_backend::controllers::feed::FeedController;
use fritter_backend::controllers::freet::FreetController;
use fritter_backend::controllers::user::UserController;
use fritter_backend::domain::auth::AuthService;
use fritter_backend::domain::channel::{Channel, ChannelService, ChannelStore};
use fritter_backend::domain::feed::{Feed, FeedFilter, FeedService, FeedServiceApi, FeedStore};
use fritter_backend::domain::freet::{Freet, FreetService, FreetStore};
use fritter_backend::domain::user::{User, UserService, UserStore};
use fritter_backend::error::{AppError, AppResult};
use fritter_backend::infrastructure::config::{Config, Environment, LogFormat};
use fritter_backend::infrastructure::http::build_router;

// === In-memory stores ===

#[derive(Default)]
struct MemUserStore {
    users: Mutex<Vec<User>>,
    follows: Mutex<Vec<(Uuid, Uuid)>>,
}

#[async_trait]
impl UserStore for MemUserStore {
    async fn create(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == username) {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> AppResult<()> {
        let mut follows = self.follows.lock().unwrap();
        if !follows.contains(&(follower_id, followee_id)) {
            follows.push((follower_id, followee_id));
        }
        Ok(())
    }

    async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> AppResult<bool> {
        let mut follows = self.follows.lock().unwrap();
        let before = follows.len();
        follows.retain(|pair| *pair != (follower_id, followee_id));
        Ok(follows.len() < before)
    }

    async fn following(&self, follower_id: Uuid) -> AppResult<Vec<User>> {
        let ids = self.following_ids(follower_id).await?;
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn following_ids(&self, follower_id: Uuid) -> AppResult<Vec<Uuid>> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|(follower, _)| *follower == follower_id)
            .map(|(_, followee)| *followee)
            .collect())
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != user_id);
        Ok(users.len() < before)
    }
}

#[derive(Default)]
struct MemFreetStore {
    freets: Mutex<Vec<Freet>>,
}

#[async_trait]
impl FreetStore for MemFreetStore {
    async fn create(&self, author_id: Uuid, content: &str, tags: &[String]) -> AppResult<Freet> {
        let freet = Freet {
            id: Uuid::new_v4(),
            author_id,
            content: content.to_string(),
            tags: tags.to_vec(),
            created_at: Utc::now(),
        };
        self.freets.lock().unwrap().push(freet.clone());
        Ok(freet)
    }

    async fn find_by_id(&self, freet_id: Uuid) -> AppResult<Option<Freet>> {
        Ok(self
            .freets
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == freet_id)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Freet>> {
        Ok(self.freets.lock().unwrap().clone())
    }

    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Freet>> {
        Ok(self
            .freets
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.has_tag(tag))
            .cloned()
            .collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> AppResult<Vec<Freet>> {
        Ok(self
            .freets
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, freet_id: Uuid) -> AppResult<bool> {
        let mut freets = self.freets.lock().unwrap();
        let before = freets.len();
        freets.retain(|f| f.id != freet_id);
        Ok(freets.len() < before)
    }
}

#[derive(Default)]
struct MemFeedStore {
    feeds: Mutex<Vec<Feed>>,
}

#[async_trait]
impl FeedStore for MemFeedStore {
    async fn create(&self, owner_id: Uuid) -> AppResult<Feed> {
        let mut feeds = self.feeds.lock().unwrap();
        if feeds.iter().any(|f| f.owner_id == owner_id) {
            return Err(AppError::Conflict(
                "Feed already exists for this user".to_string(),
            ));
        }
        let feed = Feed {
            id: Uuid::new_v4(),
            owner_id,
            active_filter: FeedFilter::Latest,
            posts: Vec::new(),
            last_refresh: Utc::now(),
        };
        feeds.push(feed.clone());
        Ok(feed)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Feed>> {
        Ok(self
            .feeds
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.owner_id == owner_id)
            .cloned())
    }

    async fn find_by_id(&self, feed_id: Uuid) -> AppResult<Option<Feed>> {
        Ok(self
            .feeds
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == feed_id)
            .cloned())
    }

    async fn save(&self, feed: &Feed) -> AppResult<()> {
        let mut feeds = self.feeds.lock().unwrap();
        match feeds.iter_mut().find(|f| f.id == feed.id) {
            Some(existing) => {
                *existing = feed.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("Feed not found".to_string())),
        }
    }

    async fn delete(&self, feed_id: Uuid) -> AppResult<bool> {
        let mut feeds = self.feeds.lock().unwrap();
        let before = feeds.len();
        feeds.retain(|f| f.id != feed_id);
        Ok(feeds.len() < before)
    }

    async fn delete_by_owner(&self, owner_id: Uuid) -> AppResult<bool> {
        let mut feeds = self.feeds.lock().unwrap();
        let before = feeds.len();
        feeds.retain(|f| f.owner_id != owner_id);
        Ok(feeds.len() < before)
    }
}

struct MemChannelStore {
    channels: Mutex<Vec<Channel>>,
    members: Mutex<Vec<(Uuid, Uuid)>>,
    users: Arc<MemUserStore>,
}

#[async_trait]
impl ChannelStore for MemChannelStore {
    async fn create(&self, owner_id: Uuid, name: &str) -> AppResult<Channel> {
        let mut channels = self.channels.lock().unwrap();
        if channels.iter().any(|c| c.name == name) {
            return Err(AppError::Conflict("Channel name already taken".to_string()));
        }
        let channel = Channel {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner_id,
            created_at: Utc::now(),
        };
        channels.push(channel.clone());
        Ok(channel)
    }

    async fn find_by_id(&self, channel_id: Uuid) -> AppResult<Option<Channel>> {
        Ok(self
            .channels
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == channel_id)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Channel>> {
        Ok(self.channels.lock().unwrap().clone())
    }

    async fn add_member(&self, channel_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut members = self.members.lock().unwrap();
        if !members.contains(&(channel_id, user_id)) {
            members.push((channel_id, user_id));
        }
        Ok(())
    }

    async fn remove_member(&self, channel_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|pair| *pair != (channel_id, user_id));
        Ok(members.len() < before)
    }

    async fn members(&self, channel_id: Uuid) -> AppResult<Vec<User>> {
        let member_ids: Vec<Uuid> = self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|(channel, _)| *channel == channel_id)
            .map(|(_, user)| *user)
            .collect();
        let users = self.users.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| member_ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn delete(&self, channel_id: Uuid) -> AppResult<bool> {
        let mut channels = self.channels.lock().unwrap();
        let before = channels.len();
        channels.retain(|c| c.id != channel_id);
        self.members
            .lock()
            .unwrap()
            .retain(|(channel, _)| *channel != channel_id);
        Ok(channels.len() < before)
    }
}

// === Test harness ===

fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "test-secret".to_string(),
        jwt_expiration_hours: 1,
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
    }
}

fn test_app() -> Router {
    let config = Arc::new(test_config());
    let freet_store: Arc<dyn FreetStore> = Arc::new(MemFreetStore::default());
    let feed_store: Arc<dyn FeedStore> = Arc::new(MemFeedStore::default());

    // channel members are projected against the same user directory the
    // rest of the app uses, so share one MemUserStore
    let mem_users = Arc::new(MemUserStore::default());
    let user_store: Arc<dyn UserStore> = mem_users.clone();
    let channel_store: Arc<dyn ChannelStore> = Arc::new(MemChannelStore {
        channels: Mutex::new(Vec::new()),
        members: Mutex::new(Vec::new()),
        users: mem_users,
    });

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
    let freet_service = Arc::new(FreetService::new(freet_store, user_store.clone()));
    let channel_service = Arc::new(ChannelService::new(channel_store));

    build_router(
        config,
        user_store,
        Arc::new(AuthController::new(auth_service)),
        Arc::new(UserController::new(user_service)),
        Arc::new(FreetController::new(freet_service)),
        Arc::new(FeedController::new(feed_service)),
        Arc::new(ChannelController::new(channel_service)),
    )
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn register(app: &Router, username: &str) -> Value {
    let (status, body) = request(
        app,
        "POST",
        "/api/users",
        Some(json!({"username": username, "password": "hunter22hunter22"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    body
}

async fn login(app: &Router, username: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        Some(json!({"username": username, "password": "hunter22hunter22"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

async fn post_freet(app: &Router, token: &str, content: &str, tags: &[&str]) -> Value {
    let (status, body) = request(
        app,
        "POST",
        "/api/freets",
        Some(json!({"content": content, "tags": tags})),
        Some(token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "freet creation failed: {body}");
    body
}

// === Tests ===

#[tokio::test]
async fn it_should_register_and_login() {
    let app = test_app();

    let user = register(&app, "alice").await;
    assert_eq!(user["username"], "alice");
    assert!(user.get("password_hash").is_none());

    let token = login(&app, "alice").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn it_should_reject_duplicate_usernames() {
    let app = test_app();
    register(&app, "alice").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/users",
        Some(json!({"username": "alice", "password": "hunter22hunter22"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn it_should_reject_wrong_password() {
    let app = test_app();
    register(&app, "alice").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"username": "alice", "password": "wrong-password"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn it_should_require_authentication_for_feeds() {
    let app = test_app();

    let (status, _) = request(&app, "GET", "/api/feeds", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(&app, "PUT", "/api/feeds/latest", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn it_should_serve_a_fresh_feed_after_registration() {
    let app = test_app();
    register(&app, "alice").await;
    let token = login(&app, "alice").await;

    let (status, body) = request(&app, "GET", "/api/feeds", None, Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Feed refreshed");
    assert_eq!(body["feed"]["owner"], "alice");
    assert_eq!(body["feed"]["active_filter"], "latest");
    assert_eq!(body["feed"]["freets"], json!([]));
}

#[tokio::test]
async fn it_should_materialize_feed_per_active_filter() {
    let app = test_app();
    register(&app, "u1").await;
    register(&app, "u2").await;
    register(&app, "u3").await;
    let t1 = login(&app, "u1").await;
    let t2 = login(&app, "u2").await;
    let t3 = login(&app, "u3").await;

    let by_u2 = post_freet(&app, &t2, "game tonight", &["sports"]).await;
    let by_u3 = post_freet(&app, &t3, "pasta recipe", &["food"]).await;

    // u1 follows u2
    let (status, _) = request(
        &app,
        "POST",
        "/api/users/me/following/u2",
        None,
        Some(&t1),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // latest: everything, insertion order
    let (status, body) = request(&app, "GET", "/api/feeds", None, Some(&t1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feed"]["freets"], json!([by_u2["id"], by_u3["id"]]));

    // following: only u2's freet
    let (status, body) = request(&app, "PUT", "/api/feeds/following", None, Some(&t1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feed"]["active_filter"], "following");
    assert_eq!(body["feed"]["freets"], json!([by_u2["id"]]));

    // tag: only sports
    let (status, body) = request(&app, "PUT", "/api/feeds/sports", None, Some(&t1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feed"]["active_filter"], "sports");
    assert_eq!(body["feed"]["freets"], json!([by_u2["id"]]));

    // bare PUT resets to latest
    let (status, body) = request(&app, "PUT", "/api/feeds", None, Some(&t1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feed"]["active_filter"], "latest");
    assert_eq!(body["feed"]["freets"], json!([by_u2["id"], by_u3["id"]]));
}

#[tokio::test]
async fn it_should_invalidate_tokens_after_account_deletion() {
    let app = test_app();
    register(&app, "alice").await;
    let token = login(&app, "alice").await;

    let (status, _) = request(&app, "DELETE", "/api/users/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Token no longer resolves to a user
    let (status, _) = request(&app, "GET", "/api/feeds", None, Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn it_should_validate_freet_content() {
    let app = test_app();
    register(&app, "alice").await;
    let token = login(&app, "alice").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/freets",
        Some(json!({"content": ""})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "POST",
        "/api/freets",
        Some(json!({"content": "x".repeat(141)})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn it_should_list_freets_by_tag_and_author() {
    let app = test_app();
    register(&app, "alice").await;
    register(&app, "bob").await;
    let alice = login(&app, "alice").await;
    let bob = login(&app, "bob").await;

    post_freet(&app, &alice, "game tonight", &["sports"]).await;
    post_freet(&app, &bob, "pasta recipe", &["food"]).await;

    let (status, body) = request(&app, "GET", "/api/freets?tag=sports", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let freets = body.as_array().unwrap();
    assert_eq!(freets.len(), 1);
    assert_eq!(freets[0]["author"], "alice");

    let (status, body) = request(&app, "GET", "/api/freets?author=bob", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let freets = body.as_array().unwrap();
    assert_eq!(freets.len(), 1);
    assert_eq!(freets[0]["content"], "pasta recipe");
}

#[tokio::test]
async fn it_should_not_allow_deleting_other_users_freets() {
    let app = test_app();
    register(&app, "alice").await;
    register(&app, "bob").await;
    let alice = login(&app, "alice").await;
    let bob = login(&app, "bob").await;

    let freet = post_freet(&app, &alice, "mine", &[]).await;
    let uri = format!("/api/freets/{}", freet["id"].as_str().unwrap());

    let (status, _) = request(&app, "DELETE", &uri, None, Some(&bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(&app, "DELETE", &uri, None, Some(&alice)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn it_should_manage_channel_membership() {
    let app = test_app();
    register(&app, "alice").await;
    register(&app, "bob").await;
    let alice = login(&app, "alice").await;
    let bob = login(&app, "bob").await;

    let (status, channel) = request(
        &app,
        "POST",
        "/api/channels",
        Some(json!({"name": "rustaceans"})),
        Some(&alice),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let channel_id = channel["id"].as_str().unwrap().to_string();

    // duplicate name
    let (status, _) = request(
        &app,
        "POST",
        "/api/channels",
        Some(json!({"name": "rustaceans"})),
        Some(&bob),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // bob joins, membership shows both
    let uri = format!("/api/channels/{channel_id}/members/me");
    let (status, _) = request(&app, "POST", &uri, None, Some(&bob)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let uri = format!("/api/channels/{channel_id}/members");
    let (status, body) = request(&app, "GET", &uri, None, Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["username"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"alice") && names.contains(&"bob"));

    // only the owner can delete
    let uri = format!("/api/channels/{channel_id}");
    let (status, _) = request(&app, "DELETE", &uri, None, Some(&bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(&app, "DELETE", &uri, None, Some(&alice)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
