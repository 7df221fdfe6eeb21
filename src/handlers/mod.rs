// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no token) → Protected (session token) → Elevated (session token + admin role)
//
pub mod public;    // Tier 1: no authentication
pub mod protected; // Tier 2: `require_token`
pub mod elevated;  // Tier 3: `require_token` then `require_admin`
