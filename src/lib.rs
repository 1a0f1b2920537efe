//! FlowTrace - 最大流计算与增广过程回放
//!
//! 使用 Ford-Fulkerson 方法计算有向容量网络的最大流，支持：
//! - 每次增广后的图状态快照（JSON / Graphviz DOT）
//! - 残余割提取
//! - HTTP 接口与交互式命令行
//! - JSON / CSV 输入导入

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod export;
pub mod graph;
pub mod import;
pub mod metrics;
pub mod server;
pub mod types;

// 重导出常用类型
pub use algorithm::{compute_max_flow, AugmentingPath, DepthFirst, FlowOutcome, FordFulkerson, PathStrategy, ResidualCut};
pub use error::{Error, Result};
pub use export::{DotExporter, ExportFormat, FlowHistory, JsonExporter, SnapshotExporter};
pub use graph::{EdgeState, FlowEdge, FlowGraph, FlowSnapshot, NodeId};
pub use types::{EdgeSpec, FlowConfig, FlowInput};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
