// ============================================================================
// POSTING BOARD API
// ============================================================================

// - Posts with tags, flat comments
// - Owner-only edit/delete
// - Tag filter, free-text search, pagination
// - JWT bearer auth over a local identity provider
// - Structured logging

use postboard::{
    AppState, LocalIdentityProvider, MemoryStore, config::Config, routes::app,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let store = MemoryStore::new();
    let identity = Arc::new(LocalIdentityProvider::new(config.bcrypt_cost));
    let state = AppState::new(&config, &store, identity);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("API Endpoints:");
    info!("  GET    /health                - Health check");
    info!("  POST   /auth/signup           - Create account");
    info!("  POST   /auth/login            - Login");
    info!("  GET    /users/me              - Current user (auth)");
    info!("  GET    /posts                 - List posts (?tag=&q=&page=&limit=)");
    info!("  POST   /posts                 - Create post (auth)");
    info!("  GET    /posts/{{id}}            - Post with comments");
    info!("  PATCH  /posts/{{id}}            - Edit post (auth, owner only)");
    info!("  DELETE /posts/{{id}}            - Delete post (auth, owner only)");
    info!("  GET    /posts/{{id}}/comments   - List comments");
    info!("  POST   /posts/{{id}}/comments   - Add comment (auth)");
    info!("  DELETE /comments/{{id}}         - Delete comment (auth, author only)");

    axum::serve(listener, app(state, &config)).await?;

    Ok(())
}
