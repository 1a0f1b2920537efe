//! 图核心模块
//!
//! 定义顶点、边、流网络和快照的核心数据结构

mod edge;
#[allow(clippy::module_inception)]
mod graph;
pub(crate) mod node;
mod snapshot;

pub use edge::{EdgeState, FlowEdge};
pub use graph::{FlowGraph, NodeIndex};
pub use node::NodeId;
pub use snapshot::FlowSnapshot;
