use axum::{routing::get, Router};

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new().route("/about", get(super::about::about))
}
