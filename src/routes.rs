use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{delete, get, patch, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{elevated, protected, public};
use crate::middleware::{require_admin, require_token};
use crate::state::AppState;

/// Full application router. Gates are attached per route group, so a public
/// GET and a member POST can share one path.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Session token
        .merge(member_routes(&state))
        // Session token + admin role
        .merge(admin_routes(&state))
        // Global middleware
        .layer(cors_layer(&state.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(public::session::issue_token))
        .route("/users", post(public::users::register))
        .route("/biodatas", get(public::catalog::list))
        .route("/biodatas/premium", get(public::catalog::premium_preview))
        .route("/success-stories", get(public::stories::list))
}

fn member_routes(state: &AppState) -> Router<AppState> {
    use protected::{biodata, favorites, payments, premium, users};

    Router::new()
        .route("/users/:email", get(users::show))
        .route("/users/admin/:email", get(users::is_admin))
        .route("/users/premium/:email", get(users::is_premium))
        .route("/biodatas", post(biodata::create))
        .route("/biodatas/similar", get(biodata::similar))
        .route("/biodatas/owner/:email", get(biodata::by_owner))
        .route("/biodatas/:id", get(biodata::show).put(biodata::replace))
        .route("/favorites", get(favorites::list).post(favorites::add))
        .route("/favorites/:biodata_id", delete(favorites::remove))
        .route("/premium-requests", post(premium::submit))
        .route("/payments/intent", post(payments::create_intent))
        .route("/payments", post(payments::record))
        .route("/payments/:email", get(payments::list_for_user))
        .route_layer(from_fn_with_state(state.clone(), require_token))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    use elevated::{contact, premium, stats, users};

    Router::new()
        .route("/users", get(users::list))
        .route("/users/admin/:email", patch(users::make_admin))
        .route("/users/premium/:email", patch(users::make_premium))
        .route("/premium-requests", get(premium::list_pending))
        .route("/premium-requests/:email", patch(premium::decide))
        .route("/contact-requests", get(contact::list_pending))
        .route("/contact-requests/:email", patch(contact::approve))
        .route("/admin/stats", get(stats::dashboard))
        // Last added runs first: token, then role
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state.clone(), require_token))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Matrimony API",
            "version": env!("CARGO_PKG_VERSION"),
            "message": "Your partner is finding",
            "endpoints": {
                "public": "/jwt, /users (POST), /biodatas, /biodatas/premium, /success-stories",
                "member": "/users/:email, /biodatas/*, /favorites, /premium-requests (POST), /payments/*",
                "admin": "/users (GET), /users/admin/:email, /users/premium/:email (PATCH), /premium-requests, /contact-requests, /admin/stats",
            }
        }
    }))
}

async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
