//! JSON 文档导出

use super::SnapshotExporter;
use crate::error::Result;
use crate::graph::FlowSnapshot;
use serde_json::{json, Value};

/// 导出为结构化 JSON 文档
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl SnapshotExporter for JsonExporter {
    type Output = Value;

    fn export(&self, snapshot: &FlowSnapshot) -> Result<Value> {
        let edges: Vec<Value> = snapshot
            .edges
            .iter()
            .map(|e| {
                json!({
                    "source": e.source,
                    "target": e.target,
                    "capacity": e.capacity,
                    "flow": e.flow,
                    "saturated": e.is_saturated(),
                    "onPath": snapshot.on_path(&e.source, &e.target),
                })
            })
            .collect();

        Ok(json!({
            "iteration": snapshot.iteration,
            "path": snapshot.path,
            "bottleneck": snapshot.bottleneck,
            "totalFlow": snapshot.total_flow,
            "nodes": snapshot.nodes,
            "edges": edges,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeState, NodeId};

    #[test]
    fn test_json_document() {
        let snap = FlowSnapshot {
            iteration: 1,
            path: vec!["S".into(), "T".into()],
            bottleneck: 2.5,
            total_flow: 2.5,
            nodes: vec!["S".into(), "T".into()],
            edges: vec![EdgeState {
                source: NodeId::from("S"),
                target: NodeId::from("T"),
                capacity: 2.5,
                flow: 2.5,
            }],
        };

        let doc = JsonExporter.export(&snap).unwrap();
        assert_eq!(doc["totalFlow"], 2.5);
        assert_eq!(doc["path"][1], "T");
        assert_eq!(doc["edges"][0]["saturated"], true);
        assert_eq!(doc["edges"][0]["onPath"], true);
    }
}
