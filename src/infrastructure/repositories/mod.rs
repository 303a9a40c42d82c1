pub mod channel_repository;
pub mod feed_repository;
pub mod freet_repository;
pub mod user_repository;

pub use channel_repository::ChannelRepository;
pub use feed_repository::FeedRepository;
pub use freet_repository::FreetRepository;
pub use user_repository::UserRepository;
