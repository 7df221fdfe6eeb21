// handlers/protected/mod.rs - Protected handlers (session token required)
//
// Every handler here receives the verified identity as `Extension<AuthUser>`.
// Writes are scoped to that identity, never to an email found in the body.
//
// Security Level: Session token
// Middleware: require_token

pub mod biodata;
pub mod favorites;
pub mod payments;
pub mod premium;
pub mod users;
