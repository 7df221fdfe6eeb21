// handlers/elevated/mod.rs - Elevated handlers (admin role required)
//
// Role management, the premium review queue, contact request approval and
// the dashboard. The role is re-read from the store on every request.
//
// Security Level: Session token + admin role
// Middleware: require_token → require_admin

pub mod contact;
pub mod premium;
pub mod stats;
pub mod users;
