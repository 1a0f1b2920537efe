//! 增广路径搜索
//!
//! 在残余视图上（capacity - flow > 0 的边可通行）寻找源点到汇点的路径。
//! 搜索策略通过 [`PathStrategy`] 抽象，目前只有基于显式栈的深度优先实现。

use crate::graph::{FlowGraph, NodeIndex};
use smallvec::SmallVec;
use std::collections::HashMap;

/// 增广路径：边序列 + 瓶颈值
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentingPath {
    edges: SmallVec<[(NodeIndex, NodeIndex); 8]>,
    bottleneck: f64,
}

impl AugmentingPath {
    pub fn new(edges: impl IntoIterator<Item = (NodeIndex, NodeIndex)>, bottleneck: f64) -> Self {
        Self {
            edges: edges.into_iter().collect(),
            bottleneck,
        }
    }

    /// 路径上的边 (from, to)
    pub fn edges(&self) -> &[(NodeIndex, NodeIndex)] {
        &self.edges
    }

    /// 瓶颈（路径上最小残余容量）
    pub fn bottleneck(&self) -> f64 {
        self.bottleneck
    }

    /// 边数
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// 路径经过的顶点下标（源点到汇点）
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.edges
            .first()
            .map(|&(from, _)| from)
            .into_iter()
            .chain(self.edges.iter().map(|&(_, to)| to))
    }
}

/// 增广路径搜索策略
pub trait PathStrategy {
    /// 策略名称
    fn name(&self) -> &'static str;

    /// 寻找一条瓶颈严格为正的路径；不存在时返回 None
    fn find_path(&self, graph: &FlowGraph, source: NodeIndex, sink: NodeIndex)
        -> Option<AugmentingPath>;
}

/// 显式栈深度优先搜索
///
/// 每个顶点的出边按插入顺序展开，后入栈的先出栈，所以返回的是
/// DFS 最先到达汇点的那条路径，不一定最短也不一定最宽。
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl PathStrategy for DepthFirst {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn find_path(
        &self,
        graph: &FlowGraph,
        source: NodeIndex,
        sink: NodeIndex,
    ) -> Option<AugmentingPath> {
        // 已访问顶点 -> 到达它的前驱（源点没有前驱）
        let mut parent: HashMap<NodeIndex, Option<NodeIndex>> = HashMap::new();
        let mut stack: Vec<(NodeIndex, f64)> = vec![(source, f64::INFINITY)];
        parent.insert(source, None);

        while let Some((node, bottleneck)) = stack.pop() {
            for (next, residual) in graph.residual_edges(node) {
                if parent.contains_key(&next) {
                    continue;
                }
                parent.insert(next, Some(node));
                let narrowed = bottleneck.min(residual);

                if next == sink {
                    return Some(AugmentingPath::new(reconstruct(&parent, sink), narrowed));
                }
                stack.push((next, narrowed));
            }
        }

        None
    }
}

/// 从前驱表重构路径上的边
fn reconstruct(
    parent: &HashMap<NodeIndex, Option<NodeIndex>>,
    sink: NodeIndex,
) -> Vec<(NodeIndex, NodeIndex)> {
    let mut edges = Vec::new();
    let mut current = sink;
    while let Some(&Some(prev)) = parent.get(&current) {
        edges.push((prev, current));
        current = prev;
    }
    edges.reverse();
    edges
}
