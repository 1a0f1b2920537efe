//! Graphviz DOT 导出
//!
//! 每条边标注 `flow/capacity`，饱和边标红，本次增广路径加粗

use super::SnapshotExporter;
use crate::error::Result;
use crate::graph::FlowSnapshot;
use std::fmt::Write;

/// 导出为 DOT 文本，交给外部工具布局和渲染
#[derive(Debug, Clone)]
pub struct DotExporter {
    /// 图布局方向
    pub rankdir: String,
    /// 是否高亮本次增广路径
    pub highlight_path: bool,
}

impl Default for DotExporter {
    fn default() -> Self {
        Self {
            rankdir: "LR".to_string(),
            highlight_path: true,
        }
    }
}

impl SnapshotExporter for DotExporter {
    type Output = String;

    fn export(&self, snapshot: &FlowSnapshot) -> Result<String> {
        let mut out = String::new();
        self.write_dot(&mut out, snapshot)
            .map_err(|e| crate::error::Error::ExportError(e.to_string()))?;
        Ok(out)
    }
}

impl DotExporter {
    fn write_dot(&self, out: &mut String, snapshot: &FlowSnapshot) -> std::fmt::Result {
        writeln!(out, "digraph flow_{} {{", snapshot.iteration)?;
        writeln!(out, "    rankdir={};", self.rankdir)?;
        writeln!(
            out,
            "    label=\"iteration {}, bottleneck {}, total flow {}\";",
            snapshot.iteration, snapshot.bottleneck, snapshot.total_flow
        )?;
        writeln!(out, "    node [shape=circle, style=filled, fillcolor=lightblue];")?;

        for node in &snapshot.nodes {
            writeln!(out, "    \"{}\";", escape(node.as_str()))?;
        }

        for edge in &snapshot.edges {
            let mut attrs = vec![format!("label=\"{}/{}\"", edge.flow, edge.capacity)];
            if self.highlight_path && snapshot.on_path(&edge.source, &edge.target) {
                attrs.push("color=blue".to_string());
                attrs.push("penwidth=2.5".to_string());
            } else if edge.is_saturated() {
                attrs.push("color=red".to_string());
            }
            writeln!(
                out,
                "    \"{}\" -> \"{}\" [{}];",
                escape(edge.source.as_str()),
                escape(edge.target.as_str()),
                attrs.join(", ")
            )?;
        }

        writeln!(out, "}}")
    }
}

fn escape(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}
