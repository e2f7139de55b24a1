use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(contest_routes())
        .merge(user_routes())
        .merge(registration_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(handlers::auth::issue_token))
        .route("/logout", post(handlers::auth::logout))
}

fn contest_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contests",
            get(handlers::contest::list_contests).post(handlers::contest::create_contest),
        )
        .route(
            "/contests/{id}",
            get(handlers::contest::get_contest)
                .patch(handlers::contest::reconcile_participants)
                .delete(handlers::contest::delete_contest),
        )
        .route("/top-contests", get(handlers::contest::top_contests))
        .route("/top-winner", get(handlers::contest::top_winners))
        .route(
            "/my-created-contests",
            get(handlers::contest::my_created_contests),
        )
        .route(
            "/my-created-contests/{id}",
            patch(handlers::contest::declare_winner),
        )
        .route(
            "/admin-contests/{id}",
            patch(handlers::contest::set_contest_status),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::upsert_user),
        )
        .route(
            "/users/{id}",
            patch(handlers::user::update_user_role).delete(handlers::user::delete_user),
        )
        .route("/users/role/{email}", get(handlers::user::get_user_role))
        .route("/leaderboard", get(handlers::user::leaderboard))
}

fn registration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/create-payment-intent",
            post(handlers::payment::create_payment_intent),
        )
        .route(
            "/registered-contests",
            post(handlers::registration::record_registration),
        )
        .route(
            "/registered-contests/{email}",
            get(handlers::registration::list_registrations),
        )
        .route(
            "/submission/{id}",
            get(handlers::registration::contest_registrations),
        )
}
