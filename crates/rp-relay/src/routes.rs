use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::routes::predictions::{create_prediction, get_prediction};
use crate::state::RelayState;

mod predictions;

pub fn api_routes() -> Router<Arc<RelayState>> {
    Router::new()
        .route("/api/predictions", post(create_prediction))
        .route("/api/predictions/{id}", get(get_prediction))
}
