//! 边定义
//!
//! 每条有向边携带固定容量和当前流量，满足 0 <= flow <= capacity

use super::node::NodeId;
use serde::{Deserialize, Serialize};

/// 图中存储的边（端点由邻接表给出）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// 容量（构建后不变）
    capacity: f64,
    /// 当前流量
    flow: f64,
}

impl FlowEdge {
    /// 创建零流量的边
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            flow: 0.0,
        }
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn flow(&self) -> f64 {
        self.flow
    }

    /// 残余容量
    pub fn residual(&self) -> f64 {
        self.capacity - self.flow
    }

    /// 是否已饱和
    pub fn is_saturated(&self) -> bool {
        self.residual() <= 0.0
    }

    /// 增加流量，截断到容量以内
    pub(crate) fn push(&mut self, amount: f64) {
        self.flow = (self.flow + amount).min(self.capacity);
    }
}

/// 边的不可变快照：(source, target, capacity, flow)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeState {
    pub source: NodeId,
    pub target: NodeId,
    pub capacity: f64,
    pub flow: f64,
}

impl EdgeState {
    pub fn new(source: NodeId, target: NodeId, edge: &FlowEdge) -> Self {
        Self {
            source,
            target,
            capacity: edge.capacity(),
            flow: edge.flow(),
        }
    }

    pub fn residual(&self) -> f64 {
        self.capacity - self.flow
    }

    pub fn is_saturated(&self) -> bool {
        self.residual() <= 0.0
    }
}
