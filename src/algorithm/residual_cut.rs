//! 残余割
//!
//! 增广结束后，从源点沿正残余容量可达的顶点构成源侧。
//! 离开源侧的边都已饱和。
//!
//! 残余视图只有正向边，没有反向边可以撤销已分配的流量，
//! 所以割容量只是总流量的上界，不一定等于总流量。

use crate::graph::{EdgeState, FlowGraph, NodeId, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// 源点在残余视图上可达部分的边界割
///
/// `capacity >= total_flow` 恒成立；需要撤销流量才能继续增广的图上两者不相等。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResidualCut {
    /// 源侧顶点（按图中顺序）
    pub source_side: Vec<NodeId>,
    /// 从源侧指向汇侧的边
    pub cut_edges: Vec<EdgeState>,
    /// 割容量
    pub capacity: f64,
}

impl ResidualCut {
    /// 在当前残余视图上计算源侧与割边
    pub fn from_residual(graph: &FlowGraph, source: NodeIndex) -> Self {
        let reachable = reachable_from(graph, source);

        let source_side = graph
            .nodes()
            .enumerate()
            .filter(|(i, _)| reachable.contains(i))
            .map(|(_, id)| id.clone())
            .collect();

        let mut cut_edges = Vec::new();
        for (s, t, edge) in graph.edges() {
            let from_inside = graph.index_of(s).is_some_and(|i| reachable.contains(&i));
            let to_inside = graph.index_of(t).is_some_and(|i| reachable.contains(&i));
            if from_inside && !to_inside {
                cut_edges.push(EdgeState::new(s.clone(), t.clone(), edge));
            }
        }
        let capacity = cut_edges.iter().map(|e| e.capacity).sum();

        Self {
            source_side,
            cut_edges,
            capacity,
        }
    }

    /// 顶点是否在源侧
    pub fn contains(&self, id: &NodeId) -> bool {
        self.source_side.contains(id)
    }
}

/// BFS 找源点沿正残余容量可达的顶点
fn reachable_from(graph: &FlowGraph, source: NodeIndex) -> HashSet<NodeIndex> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(source);
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for (v, _) in graph.residual_edges(u) {
            if visited.insert(v) {
                queue.push_back(v);
            }
        }
    }

    visited
}
