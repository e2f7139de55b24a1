pub mod authz;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod registration;
pub mod routes;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ContestHub API",
        version = "1.0.0",
        description = "API for the ContestHub contest-hosting platform"
    ),
    paths(
        handlers::auth::issue_token,
        handlers::auth::logout,
        handlers::contest::create_contest,
        handlers::contest::list_contests,
        handlers::contest::get_contest,
        handlers::contest::delete_contest,
        handlers::contest::reconcile_participants,
        handlers::contest::top_contests,
        handlers::contest::top_winners,
        handlers::contest::my_created_contests,
        handlers::contest::declare_winner,
        handlers::contest::set_contest_status,
        handlers::user::upsert_user,
        handlers::user::list_users,
        handlers::user::delete_user,
        handlers::user::update_user_role,
        handlers::user::get_user_role,
        handlers::user::leaderboard,
        handlers::payment::create_payment_intent,
        handlers::registration::record_registration,
        handlers::registration::list_registrations,
        handlers::registration::contest_registrations,
    ),
    tags(
        (name = "Auth", description = "Identity assertion cookies"),
        (name = "Contests", description = "Contest lifecycle operations"),
        (name = "Users", description = "User management and roles"),
        (name = "Payments", description = "Payment intents"),
        (name = "Registrations", description = "Contest registrations"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                extractors::auth::TOKEN_COOKIE,
            ))),
        );
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    // Credentials are required for the cross-site assertion cookie, which
    // rules out wildcard origins.
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(config.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    axum::Router::new()
        .merge(routes::routes())
        .layer(cors)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
