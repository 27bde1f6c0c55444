//! Application setup and router configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::common::SessionStore;
use crate::domains::catalog::CatalogService;
use crate::domains::recommend::RecommendService;
use crate::server::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub sessions: Arc<SessionStore>,
    pub catalog: CatalogService,
    pub recommend: RecommendService,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_handler))
        // auth
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        // my page
        .route(
            "/api/me",
            get(routes::me::get_me)
                .put(routes::me::update_me)
                .delete(routes::me::delete_me),
        )
        .route("/api/me/books", get(routes::me::my_books))
        // reading log
        .route(
            "/api/books",
            get(routes::books::list).post(routes::books::create),
        )
        .route("/api/books/search", get(routes::books::search))
        .route(
            "/api/books/:id",
            get(routes::books::get)
                .put(routes::books::update)
                .delete(routes::books::remove),
        )
        // external catalogs
        .route("/api/catalog/search", get(routes::catalog::search))
        .route(
            "/api/catalog/library-search",
            get(routes::catalog::library_search),
        )
        .route("/api/catalog/isbn/:isbn", get(routes::catalog::lookup_isbn))
        .route("/api/catalog/recommended", get(routes::catalog::recommended))
        .route(
            "/api/catalog/recommended/monthly",
            get(routes::catalog::monthly_recommended),
        )
        .route(
            "/api/catalog/recommended/category/:code",
            get(routes::catalog::recommended_by_category),
        )
        .route("/api/catalog/bestsellers", get(routes::catalog::bestsellers))
        .route("/api/catalog/new-titles", get(routes::catalog::new_titles))
        // AI feed
        .route(
            "/api/recommendations",
            get(routes::recommend::recommendations),
        )
        // community board
        .route(
            "/api/posts",
            get(routes::posts::list).post(routes::posts::create),
        )
        .route(
            "/api/posts/:id",
            get(routes::posts::get)
                .put(routes::posts::update)
                .delete(routes::posts::remove),
        )
        .route("/api/posts/:id/comments", post(routes::comments::create))
        .route(
            "/api/posts/:id/comments/:comment_id",
            delete(routes::comments::remove),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}
