pub mod admin;
pub mod auth;
pub mod response;

pub use admin::require_admin;
pub use auth::{require_token, AuthUser};
pub use response::{ApiResponse, ApiResult};
