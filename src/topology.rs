//! Topology deriver: builds the service call graph from the
//! current span set by following parent-span references across services.
//! Performs exactly one lookup per span — tolerant of cycles and dangling
//! parent ids.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::models::SpanRecord;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopologyNode {
    pub service: String,
    /// Reserved for forward compatibility; the graph may contain cycles so
    /// depth is not computed.
    pub depth: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopologyEdge {
    pub source: String,
    pub target: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct Topology {
    pub nodes: Vec<TopologyNode>,
    pub edges: Vec<TopologyEdge>,
}

/// `span_by_id` resolves a parent span id to its record within the current
/// window; spans whose parent isn't resolvable there contribute no edge.
pub fn derive_topology(
    spans: &[Arc<SpanRecord>],
    span_by_id: impl Fn(&str) -> Option<Arc<SpanRecord>>,
) -> Topology {
    let mut services: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();
    let mut edge_counts: HashMap<(String, String), u64> = HashMap::new();

    for span in spans {
        services.insert(span.service_name.clone());

        let Some(parent_id) = span.parent_span_id.as_deref() else {
            continue;
        };
        if parent_id.is_empty() {
            continue;
        }
        let Some(parent) = span_by_id(parent_id) else {
            continue;
        };
        if parent.service_name == span.service_name {
            continue;
        }
        *edge_counts
            .entry((parent.service_name.clone(), span.service_name.clone()))
            .or_insert(0) += 1;
    }

    let nodes = services
        .into_iter()
        .map(|service| TopologyNode { service, depth: 0 })
        .collect();

    let mut edges: Vec<TopologyEdge> = edge_counts
        .into_iter()
        .map(|((source, target), count)| TopologyEdge { source, target, count })
        .collect();
    edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

    Topology { nodes, edges }
}
