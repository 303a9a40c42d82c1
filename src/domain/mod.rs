pub mod auth;
pub mod channel;
pub mod feed;
pub mod freet;
pub mod user;
