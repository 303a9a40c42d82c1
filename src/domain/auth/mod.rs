pub mod dto;
pub mod jwt;
pub mod password;
pub mod service;

pub use dto::{LoginRequest, TokenResponse};
pub use jwt::{Claims, JwtManager};
pub use service::AuthService;
