use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::store::{Store, StatsSnapshot};

pub async fn get_stats(State(store): State<Arc<Store>>) -> Json<StatsSnapshot> {
    store.read(|view| Json(view.stats()))
}
