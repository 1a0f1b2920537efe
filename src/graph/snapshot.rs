//! 流量快照
//!
//! 每次增广后对整张图做一次深拷贝，之后图继续变化不影响快照

use super::edge::EdgeState;
use super::node::NodeId;
use serde::{Deserialize, Serialize};

/// 一次增广后的图状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    /// 第几次增广（从 1 开始）
    pub iteration: usize,
    /// 本次增广路径（顶点序列，源点到汇点）
    pub path: Vec<NodeId>,
    /// 本次增广的瓶颈值
    pub bottleneck: f64,
    /// 截至本次的总流量
    pub total_flow: f64,
    /// 所有顶点（插入顺序）
    pub nodes: Vec<NodeId>,
    /// 所有边的状态
    pub edges: Vec<EdgeState>,
}

impl FlowSnapshot {
    /// 查找边
    pub fn edge(&self, source: &NodeId, target: &NodeId) -> Option<&EdgeState> {
        self.edges
            .iter()
            .find(|e| &e.source == source && &e.target == target)
    }

    /// 流入某顶点的流量之和
    pub fn inflow(&self, node: &NodeId) -> f64 {
        self.edges
            .iter()
            .filter(|e| &e.target == node)
            .map(|e| e.flow)
            .sum()
    }

    /// 流出某顶点的流量之和
    pub fn outflow(&self, node: &NodeId) -> f64 {
        self.edges
            .iter()
            .filter(|e| &e.source == node)
            .map(|e| e.flow)
            .sum()
    }

    /// 边是否在本次增广路径上
    pub fn on_path(&self, source: &NodeId, target: &NodeId) -> bool {
        self.path
            .windows(2)
            .any(|w| &w[0] == source && &w[1] == target)
    }

    /// 饱和边数量
    pub fn saturated_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_saturated()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(s: &str, t: &str, capacity: f64, flow: f64) -> EdgeState {
        EdgeState {
            source: NodeId::from(s),
            target: NodeId::from(t),
            capacity,
            flow,
        }
    }

    #[test]
    fn test_flow_sums() {
        let snap = FlowSnapshot {
            iteration: 1,
            path: vec!["A".into(), "B".into(), "D".into()],
            bottleneck: 2.0,
            total_flow: 2.0,
            nodes: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            edges: vec![
                state("A", "B", 3.0, 2.0),
                state("A", "C", 2.0, 0.0),
                state("B", "D", 2.0, 2.0),
                state("C", "D", 3.0, 0.0),
            ],
        };

        let a = NodeId::from("A");
        let b = NodeId::from("B");
        let d = NodeId::from("D");
        assert_eq!(snap.outflow(&a), 2.0);
        assert_eq!(snap.inflow(&d), 2.0);
        assert!(snap.on_path(&a, &b));
        assert!(!snap.on_path(&b, &a));
        assert_eq!(snap.saturated_count(), 1);
        assert_eq!(snap.edge(&b, &d).map(|e| e.flow), Some(2.0));
    }
}
