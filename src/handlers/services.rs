use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::store::Store;

pub async fn list_services(State(store): State<Arc<Store>>) -> Json<Vec<String>> {
    store.read(|view| Json(view.list_services()))
}
