//! 计算历史
//!
//! 把一次计算的结果和元数据打包，用于传输、回放和归档

use crate::algorithm::{FlowOutcome, ResidualCut};
use crate::error::Result;
use crate::graph::{FlowSnapshot, NodeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 一次最大流计算的完整历史
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowHistory {
    /// 运行 ID
    pub run_id: Uuid,
    /// 计算完成时间
    pub computed_at: DateTime<Utc>,
    /// 路径搜索策略
    pub strategy: String,
    pub source: NodeId,
    pub sink: NodeId,
    /// 最大流量值
    pub max_flow: f64,
    pub snapshots: Vec<FlowSnapshot>,
    pub residual_cut: ResidualCut,
}

impl FlowHistory {
    pub fn from_outcome(
        outcome: FlowOutcome,
        source: NodeId,
        sink: NodeId,
        strategy: &str,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            computed_at: Utc::now(),
            strategy: strategy.to_string(),
            source,
            sink,
            max_flow: outcome.total_flow,
            snapshots: outcome.snapshots,
            residual_cut: outcome.residual_cut,
        }
    }

    /// 增广次数
    pub fn iterations(&self) -> usize {
        self.snapshots.len()
    }

    /// 序列化为字节
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// 从字节反序列化
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// 序列化为格式化 JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::compute_max_flow;
    use crate::types::{EdgeSpec, FlowConfig, FlowInput};

    fn history() -> FlowHistory {
        let input = FlowInput::new(
            vec!["S".into(), "M".into(), "T".into()],
            vec![EdgeSpec::new("S", "M", 5.0), EdgeSpec::new("M", "T", 3.0)],
            "S",
            "T",
        );
        let outcome = compute_max_flow(&input, &FlowConfig::default()).unwrap();
        FlowHistory::from_outcome(outcome, "S".into(), "T".into(), "depth-first")
    }

    #[test]
    fn test_history_metadata() {
        let h = history();
        assert_eq!(h.max_flow, 3.0);
        assert_eq!(h.iterations(), 1);
        assert_eq!(h.residual_cut.capacity, 3.0);
        assert_ne!(h.run_id, Uuid::nil());
    }

    #[test]
    fn test_binary_encoding_preserves_snapshots() {
        let h = history();
        let restored = FlowHistory::from_bytes(&h.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.run_id, h.run_id);
        assert_eq!(restored.snapshots, h.snapshots);
        assert_eq!(restored.computed_at, h.computed_at);
    }

    #[test]
    fn test_json_output() {
        let json = history().to_json_pretty().unwrap();
        assert!(json.contains("\"max_flow\": 3.0"));
        assert!(json.contains("\"strategy\": \"depth-first\""));
    }
}
