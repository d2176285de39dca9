pub mod chat;
pub mod company;
pub mod correlation;
pub mod markets;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Assemble the API router.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(company::routes())
        .merge(markets::routes())
        .merge(correlation::routes())
        .merge(chat::routes())
}
