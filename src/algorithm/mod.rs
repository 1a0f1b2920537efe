//! 图算法模块
//!
//! 包含增广路径搜索、Ford-Fulkerson 增广循环和残余割

mod max_flow;
mod residual_cut;
mod path_finder;

pub use max_flow::{compute_max_flow, FlowOutcome, FordFulkerson};
pub use residual_cut::ResidualCut;
pub use path_finder::{AugmentingPath, DepthFirst, PathStrategy};
