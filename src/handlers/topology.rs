use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::store::Store;
use crate::topology::derive_topology;
use crate::wire::TopologyWire;

pub async fn get_topology(State(store): State<Arc<Store>>) -> Json<TopologyWire> {
    store.read(|view| {
        let topology = derive_topology(view.spans(), |id| view.span_by_id(id));
        Json(TopologyWire::from(&topology))
    })
}
