pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod session;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export logic types
pub use logic::{ListView, NewUserView};

// Export all model types
pub use model::*;

// Export seed module
pub use seed::*;

// Export store types
pub use store::{MemoryStore, PostgresStore, Store};

use std::sync::Arc;

use crate::api::handlers::AppState;
use crate::config::AppConfig;
use crate::session::SessionRegistry;

/// Build the application for an already connected store
pub fn build_app<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> axum::Router {
    let sessions = Arc::new(
        SessionRegistry::new(config.session.mode, config.session.initial_user_id)
            .with_max_sessions(config.session.max_sessions),
    );
    api::routes::create_app(AppState::new(store, sessions), &config.server.static_dir)
}

/// Connect the configured store, prepare it, and serve until shutdown
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    if config.database.in_memory {
        log::warn!("Using in-memory storage; data is lost on exit");
        let store = Arc::new(MemoryStore::new());
        if config.seed {
            seed::load_seed_data(&*store).await?;
        }
        return serve_app(build_app(store, config), config).await;
    }

    let postgres_store = PostgresStore::new(
        config.connect_options()?,
        config.database.max_connections,
    )
    .await?;
    postgres_store.migrate().await?;

    let store = Arc::new(postgres_store);
    if config.seed {
        seed::load_seed_data(&*store).await?;
    }
    serve_app(build_app(store, config), config).await
}

async fn serve_app(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log::info!("To-do list server running on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
