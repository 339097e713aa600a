use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes;
pub mod service;
pub mod users;

use crate::service::SearchService;
use crate::users::UserRepo;

/// The public corpus of Grimm tales: an HTML index of .txt files.
pub const DEFAULT_BASE_URL: &str = "https://www.cs.cmu.edu/~spok/grimmtmp";

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
    pub users: Arc<UserRepo>,
}

/// Assemble the application router with fresh service state. The tale index
/// is not fetched here; it loads lazily on the first request that needs it.
pub fn build_app(base_url: String) -> Result<Router> {
    let state = AppState {
        search: Arc::new(SearchService::new(base_url)?),
        users: Arc::new(UserRepo::with_demo_users()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
