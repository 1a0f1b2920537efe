//! 输入与配置类型
//!
//! 调用方提供顶点列表、边列表 (source, target, capacity)、源点和汇点

use crate::error::{Error, Result};
use crate::graph::node::{deserialize_lenient, deserialize_lenient_opt, deserialize_lenient_vec};
use crate::graph::NodeId;
use serde::{Deserialize, Serialize};

/// 边描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    #[serde(deserialize_with = "deserialize_lenient")]
    pub source: NodeId,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub target: NodeId,
    pub capacity: f64,
}

impl EdgeSpec {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, capacity: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            capacity,
        }
    }
}

/// 最大流计算的输入
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowInput {
    #[serde(default, deserialize_with = "deserialize_lenient_vec")]
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(default, deserialize_with = "deserialize_lenient_opt")]
    pub source: Option<NodeId>,
    #[serde(default, deserialize_with = "deserialize_lenient_opt")]
    pub sink: Option<NodeId>,
}

impl FlowInput {
    pub fn new(
        nodes: Vec<NodeId>,
        edges: Vec<EdgeSpec>,
        source: impl Into<NodeId>,
        sink: impl Into<NodeId>,
    ) -> Self {
        Self {
            nodes,
            edges,
            source: Some(source.into()),
            sink: Some(sink.into()),
        }
    }

    /// 检查四项输入都存在且非空，返回 (源点, 汇点)
    pub fn validate(&self) -> Result<(&NodeId, &NodeId)> {
        if self.nodes.is_empty() {
            return Err(Error::InvalidInput("顶点列表为空".to_string()));
        }
        if self.edges.is_empty() {
            return Err(Error::InvalidInput("边列表为空".to_string()));
        }
        let source = self
            .source
            .as_ref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::InvalidInput("缺少源点".to_string()))?;
        let sink = self
            .sink
            .as_ref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::InvalidInput("缺少汇点".to_string()))?;
        Ok((source, sink))
    }
}

/// 核心算法配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// 最大增广次数，None 表示不限制
    pub max_iterations: Option<usize>,
}

impl FlowConfig {
    pub fn with_max_iterations(limit: usize) -> Self {
        Self {
            max_iterations: Some(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlowInput {
        FlowInput::new(
            vec!["A".into(), "B".into()],
            vec![EdgeSpec::new("A", "B", 1.0)],
            "A",
            "B",
        )
    }

    #[test]
    fn test_mixed_integer_and_string_ids_share_a_node() {
        let input: FlowInput = serde_json::from_str(
            r#"{"nodes": [7, "7", 8], "edges": [{"source": "7", "target": 8, "capacity": 2}], "source": 7, "sink": "8"}"#,
        )
        .unwrap();
        let graph = crate::graph::FlowGraph::build(&input.nodes, &input.edges).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.index_of(&NodeId::from(7u64)), Some(0));

        let outcome = crate::algorithm::compute_max_flow(&input, &FlowConfig::default()).unwrap();
        assert_eq!(outcome.total_flow, 2.0);
    }

    #[test]
    fn test_validate_ok() {
        let input = sample();
        let (s, t) = input.validate().unwrap();
        assert_eq!(s.as_str(), "A");
        assert_eq!(t.as_str(), "B");
    }

    #[test]
    fn test_validate_rejects_empty_parts() {
        let mut input = sample();
        input.edges.clear();
        assert!(matches!(input.validate(), Err(Error::InvalidInput(_))));

        let mut input = sample();
        input.nodes.clear();
        assert!(matches!(input.validate(), Err(Error::InvalidInput(_))));

        let mut input = sample();
        input.sink = None;
        assert!(matches!(input.validate(), Err(Error::InvalidInput(_))));

        let mut input = sample();
        input.source = Some(NodeId::from(""));
        assert!(matches!(input.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_deserialize_request_body() {
        let body = r#"{
            "nodes": [1, 2, "x"],
            "edges": [{"source": 1, "target": "x", "capacity": 4}],
            "source": 1,
            "sink": "x"
        }"#;
        let input: FlowInput = serde_json::from_str(body).unwrap();
        assert_eq!(input.nodes.len(), 3);
        assert_eq!(input.edges[0].source, NodeId::from("1"));
        assert_eq!(input.edges[0].capacity, 4.0);
        assert_eq!(input.source, Some(NodeId::from("1")));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let input: FlowInput = serde_json::from_str("{}").unwrap();
        assert!(input.nodes.is_empty());
        assert!(input.source.is_none());
        assert!(input.validate().is_err());
    }
}
