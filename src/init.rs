use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::mw_ctx::CtxState;
use crate::routes::likes;

pub fn main_router(ctx_state: &Arc<CtxState>) -> Router {
    Router::new()
        .merge(likes::routes())
        .with_state(ctx_state.clone())
        .layer(TraceLayer::new_for_http())
}
