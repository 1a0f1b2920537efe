//! 快照导出模块
//!
//! 把 [`FlowSnapshot`] 转换为外部可消费的产物（结构化文档或 Graphviz DOT 文本）。
//! 核心算法不依赖任何导出格式。

mod dot;
mod history;
mod json;

pub use dot::DotExporter;
pub use history::FlowHistory;
pub use json::JsonExporter;

use crate::error::Result;
use crate::graph::FlowSnapshot;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 快照导出器
pub trait SnapshotExporter {
    type Output;

    fn export(&self, snapshot: &FlowSnapshot) -> Result<Self::Output>;
}

/// 按顺序导出全部快照
pub fn export_all<E: SnapshotExporter>(exporter: &E, snapshots: &[FlowSnapshot]) -> Result<Vec<E::Output>> {
    snapshots.iter().map(|s| exporter.export(s)).collect()
}

/// 导出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Dot,
}

impl FromStr for ExportFormat {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            other => Err(crate::error::Error::ExportError(format!("不支持的导出格式: {}", other))),
        }
    }
}

/// 导出后的单个图状态
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExportedState {
    Document(serde_json::Value),
    Dot(String),
}

/// 按格式导出全部快照
pub fn export_states(format: ExportFormat, snapshots: &[FlowSnapshot]) -> Result<Vec<ExportedState>> {
    match format {
        ExportFormat::Json => Ok(export_all(&JsonExporter, snapshots)?
            .into_iter()
            .map(ExportedState::Document)
            .collect()),
        ExportFormat::Dot => Ok(export_all(&DotExporter::default(), snapshots)?
            .into_iter()
            .map(ExportedState::Dot)
            .collect()),
    }
}
