// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, first sign-in, and the browsable parts of the catalog.
//
// Security Level: None
// Middleware: None

pub mod catalog;
pub mod session;
pub mod stories;
pub mod users;
