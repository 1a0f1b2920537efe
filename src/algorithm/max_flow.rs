//! 最大流算法
//!
//! Ford-Fulkerson 增广循环：反复搜索增广路径、沿路径增加流量、
//! 累加总流量，并在每次增广后记录一份图快照。
//!
//! 残余容量只按正向边计算（capacity - flow），不引入反向边，
//! 已发送的流量不会被撤回。需要撤回流量才能达到最优的图上，
//! 结果会低于真实最大流。

use super::residual_cut::ResidualCut;
use super::path_finder::{DepthFirst, PathStrategy};
use crate::error::{Error, Result};
use crate::graph::{FlowGraph, FlowSnapshot, NodeId};
use crate::metrics;
use crate::types::{FlowConfig, FlowInput};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

/// 最大流结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowOutcome {
    /// 最大流量值
    pub total_flow: f64,
    /// 每次增广后的快照（增广顺序）
    pub snapshots: Vec<FlowSnapshot>,
    /// 结束时残余视图上的割
    pub residual_cut: ResidualCut,
}

impl FlowOutcome {
    /// 增广次数
    pub fn iterations(&self) -> usize {
        self.snapshots.len()
    }

    pub fn last_snapshot(&self) -> Option<&FlowSnapshot> {
        self.snapshots.last()
    }
}

/// 循环状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Searching,
    Done,
}

/// Ford-Fulkerson 最大流算法
#[derive(Debug, Clone, Default)]
pub struct FordFulkerson<S = DepthFirst> {
    strategy: S,
    max_iterations: Option<usize>,
}

impl FordFulkerson<DepthFirst> {
    /// 使用深度优先搜索
    pub fn new() -> Self {
        Self::with_strategy(DepthFirst)
    }
}

impl<S: PathStrategy> FordFulkerson<S> {
    /// 指定路径搜索策略
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            strategy,
            max_iterations: None,
        }
    }

    /// 设置增广次数上限
    pub fn with_max_iterations(mut self, limit: Option<usize>) -> Self {
        self.max_iterations = limit;
        self
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// 计算从 source 到 sink 的最大流
    ///
    /// 图按值传入，计算期间由本次调用独占，结束后随快照一起丢弃。
    pub fn run(&self, mut graph: FlowGraph, source: &NodeId, sink: &NodeId) -> Result<FlowOutcome> {
        let span = info_span!(
            "max_flow",
            %source,
            %sink,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            strategy = self.strategy.name()
        );
        let _guard = span.enter();

        if source == sink {
            return Err(Error::InvalidEndpoints(format!("源点与汇点相同: {}", source)));
        }
        let s = graph
            .index_of(source)
            .ok_or_else(|| Error::InvalidEndpoints(format!("源点 {} 不在顶点集合中", source)))?;
        let t = graph
            .index_of(sink)
            .ok_or_else(|| Error::InvalidEndpoints(format!("汇点 {} 不在顶点集合中", sink)))?;

        let start = Instant::now();
        let mut total_flow = 0.0;
        let mut snapshots = Vec::new();
        let mut state = LoopState::Searching;

        while state == LoopState::Searching {
            let Some(path) = self.strategy.find_path(&graph, s, t) else {
                state = LoopState::Done;
                continue;
            };

            if let Some(limit) = self.max_iterations {
                if snapshots.len() >= limit {
                    warn!(limit, total_flow, "增广次数超过上限");
                    return Err(Error::MaxIterationsExceeded { limit });
                }
            }

            graph.apply_flow(&path);
            total_flow += path.bottleneck();

            let iteration = snapshots.len() + 1;
            debug!(
                iteration,
                bottleneck = path.bottleneck(),
                hops = path.len(),
                total_flow,
                "增广"
            );
            snapshots.push(graph.snapshot(iteration, &path, total_flow));
        }

        let residual_cut = ResidualCut::from_residual(&graph, s);
        info!(
            total_flow,
            iterations = snapshots.len(),
            cut_capacity = residual_cut.capacity,
            elapsed_us = start.elapsed().as_micros() as u64,
            "最大流计算完成"
        );

        Ok(FlowOutcome {
            total_flow,
            snapshots,
            residual_cut,
        })
    }
}

/// 校验输入、构建图并运行增广循环
pub fn compute_max_flow(input: &FlowInput, config: &FlowConfig) -> Result<FlowOutcome> {
    let metrics = metrics::global_metrics();
    let timer = metrics.record_computation_start();

    let result = validate_and_run(input, config);
    match &result {
        Ok(outcome) => metrics.record_computation_complete(timer, Some(outcome.iterations())),
        Err(e) => {
            warn!(error = %e, kind = e.kind(), "最大流请求被拒绝");
            metrics.record_computation_complete(timer, None);
        }
    }
    result
}

fn validate_and_run(input: &FlowInput, config: &FlowConfig) -> Result<FlowOutcome> {
    let (source, sink) = input.validate()?;
    let graph = FlowGraph::build(&input.nodes, &input.edges)?;
    FordFulkerson::new()
        .with_max_iterations(config.max_iterations)
        .run(graph, source, sink)
}
