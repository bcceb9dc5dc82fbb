use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::api::handlers::{self, AppState};
use crate::api::session::ensure_session;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>(state: AppState<S>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // List view and item mutations
        .route("/", get(handlers::list_view::<S>))
        .route("/add", post(handlers::add_item::<S>))
        .route("/edit", post(handlers::edit_item::<S>))
        .route("/delete", post(handlers::delete_item::<S>))
        // Users
        .route("/user", post(handlers::choose_user::<S>))
        .route("/user/switch", post(handlers::switch_user::<S>))
        .route("/user/update", post(handlers::rename_user::<S>))
        .route(
            "/new",
            get(handlers::new_user_form::<S>).post(handlers::create_user::<S>),
        )
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            ensure_session,
        ))
        .with_state(state)
}

/// Router plus static assets for every path no route claims
pub fn create_app<S: Store + 'static>(state: AppState<S>, static_dir: &str) -> Router {
    create_router(state).fallback_service(ServeDir::new(static_dir))
}
