pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{get_bearer_token, issue_access_token, JwtValidator};
pub use middleware::{auth_middleware, AuthState};
pub use models::{AuthenticatedUser, JwtClaims};
