//! 流网络
//!
//! 有向图，每个有序顶点对最多一条边。邻接表按插入顺序保存出边，
//! 深度优先搜索的结果依赖这一顺序。

use super::edge::{EdgeState, FlowEdge};
use super::node::NodeId;
use super::snapshot::FlowSnapshot;
use crate::algorithm::AugmentingPath;
use crate::error::{Error, Result};
use crate::types::EdgeSpec;
use indexmap::{IndexMap, IndexSet};

/// 顶点在图中的下标
pub type NodeIndex = usize;

/// 流网络
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    /// 顶点（插入顺序）
    nodes: IndexSet<NodeId>,
    /// 出边表：adjacency[u] = { v -> edge }，按插入顺序
    adjacency: Vec<IndexMap<NodeIndex, FlowEdge>>,
}

impl FlowGraph {
    /// 从顶点集合和边列表构建图
    ///
    /// 边引用了未声明的顶点，或容量为负数/非有限值时返回 `InvalidEdge`，
    /// 不会返回部分构建的图。
    pub fn build<'a, I>(nodes: I, edges: &[EdgeSpec]) -> Result<Self>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let mut graph = Self::default();
        for node in nodes {
            graph.insert_node(node.clone());
        }
        for spec in edges {
            graph.insert_edge(spec)?;
        }
        Ok(graph)
    }

    // ==================== 构建 ====================

    /// 添加顶点（重复添加无副作用）
    fn insert_node(&mut self, id: NodeId) -> NodeIndex {
        let (index, inserted) = self.nodes.insert_full(id);
        if inserted {
            self.adjacency.push(IndexMap::new());
        }
        index
    }

    /// 添加边；同一有序对的第二条边覆盖第一条，位置不变
    fn insert_edge(&mut self, spec: &EdgeSpec) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidEdge {
            from: spec.source.to_string(),
            to: spec.target.to_string(),
            reason: reason.to_string(),
        };

        if !spec.capacity.is_finite() {
            return Err(invalid("容量必须是有限数值"));
        }
        if spec.capacity < 0.0 {
            return Err(invalid("容量不能为负数"));
        }
        let from = self
            .index_of(&spec.source)
            .ok_or_else(|| invalid("源顶点不存在"))?;
        let to = self
            .index_of(&spec.target)
            .ok_or_else(|| invalid("目标顶点不存在"))?;

        self.adjacency[from].insert(to, FlowEdge::new(spec.capacity));
        Ok(())
    }

    // ==================== 查询 ====================

    /// 顶点下标
    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.nodes.get_index_of(id)
    }

    /// 下标对应的顶点
    pub fn node(&self, index: NodeIndex) -> Option<&NodeId> {
        self.nodes.get_index(index)
    }

    /// 所有顶点（插入顺序）
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(IndexMap::len).sum()
    }

    /// 获取边
    pub fn edge(&self, source: &NodeId, target: &NodeId) -> Option<&FlowEdge> {
        let from = self.index_of(source)?;
        let to = self.index_of(target)?;
        self.adjacency[from].get(&to)
    }

    /// 所有边：先按源顶点顺序，再按该顶点出边的插入顺序
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId, &FlowEdge)> {
        self.adjacency.iter().enumerate().flat_map(move |(from, out)| {
            out.iter()
                .map(move |(&to, edge)| (&self.nodes[from], &self.nodes[to], edge))
        })
    }

    /// 有正残余容量的出边 (目标下标, 残余容量)，按插入顺序
    pub fn residual_edges(&self, index: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.adjacency
            .get(index)
            .into_iter()
            .flat_map(|out| out.iter())
            .map(|(&to, edge)| (to, edge.residual()))
            .filter(|&(_, residual)| residual > 0.0)
    }

    /// 通过正残余容量的出边可达的邻居
    pub fn neighbors(&self, id: &NodeId) -> Vec<NodeId> {
        match self.index_of(id) {
            Some(index) => self
                .residual_edges(index)
                .map(|(to, _)| self.nodes[to].clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// 流出顶点的流量
    pub fn outflow(&self, id: &NodeId) -> f64 {
        self.index_of(id)
            .map(|from| self.adjacency[from].values().map(FlowEdge::flow).sum())
            .unwrap_or(0.0)
    }

    /// 流入顶点的流量
    pub fn inflow(&self, id: &NodeId) -> f64 {
        self.incoming(id).map(|edge| edge.flow()).sum()
    }

    /// 出边容量之和
    pub fn out_capacity(&self, id: &NodeId) -> f64 {
        self.index_of(id)
            .map(|from| self.adjacency[from].values().map(FlowEdge::capacity).sum())
            .unwrap_or(0.0)
    }

    /// 入边容量之和
    pub fn in_capacity(&self, id: &NodeId) -> f64 {
        self.incoming(id).map(|edge| edge.capacity()).sum()
    }

    fn incoming<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a FlowEdge> + 'a {
        let target = self.index_of(id);
        self.adjacency
            .iter()
            .filter_map(move |out| target.and_then(|to| out.get(&to)))
    }

    // ==================== 增广 ====================

    /// 沿路径每条边增加瓶颈流量
    ///
    /// 调用方保证瓶颈不超过路径上任一边的残余容量，这里不再检查。
    pub fn apply_flow(&mut self, path: &AugmentingPath) {
        let amount = path.bottleneck();
        for &(from, to) in path.edges() {
            if let Some(edge) = self.adjacency.get_mut(from).and_then(|out| out.get_mut(&to)) {
                edge.push(amount);
            }
        }
    }

    /// 当前所有边状态的深拷贝
    pub fn edge_states(&self) -> Vec<EdgeState> {
        self.edges()
            .map(|(s, t, edge)| EdgeState::new(s.clone(), t.clone(), edge))
            .collect()
    }

    /// 生成快照
    pub fn snapshot(&self, iteration: usize, path: &AugmentingPath, total_flow: f64) -> FlowSnapshot {
        FlowSnapshot {
            iteration,
            path: path
                .node_indices()
                .filter_map(|i| self.node(i).cloned())
                .collect(),
            bottleneck: path.bottleneck(),
            total_flow,
            nodes: self.nodes.iter().cloned().collect(),
            edges: self.edge_states(),
        }
    }
}
