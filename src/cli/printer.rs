//! 结果打印器
//!
//! 以表格形式输出增广过程、单次快照和残余割

use crate::algorithm::ResidualCut;
use crate::export::FlowHistory;
use crate::graph::{FlowSnapshot, NodeId};
use crate::types::FlowInput;
use prettytable::{format, row, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table
}

fn join_path(snapshot: &FlowSnapshot) -> String {
    snapshot
        .path
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn join_ids(ids: &[&NodeId]) -> String {
    ids.iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 每次增广一行
pub fn iteration_table(snapshots: &[FlowSnapshot]) -> String {
    if snapshots.is_empty() {
        return "没有找到增广路径\n".to_string();
    }

    let mut table = new_table();
    table.set_titles(row!["#", "增广路径", "瓶颈", "总流量", "饱和边"]);
    for s in snapshots {
        table.add_row(row![
            s.iteration,
            join_path(s),
            s.bottleneck,
            s.total_flow,
            s.saturated_count()
        ]);
    }
    table.to_string()
}

/// 单次快照的边状态
pub fn snapshot_table(snapshot: &FlowSnapshot) -> String {
    let mut table = new_table();
    table.set_titles(row!["源", "目标", "流量/容量", "剩余", ""]);
    for e in &snapshot.edges {
        let marker = if snapshot.on_path(&e.source, &e.target) {
            "*"
        } else if e.is_saturated() {
            "满"
        } else {
            ""
        };
        table.add_row(row![
            e.source,
            e.target,
            format!("{}/{}", e.flow, e.capacity),
            e.residual(),
            marker
        ]);
    }
    format!(
        "第 {} 次增广: {} (瓶颈 {}, 总流量 {})\n{}",
        snapshot.iteration,
        join_path(snapshot),
        snapshot.bottleneck,
        snapshot.total_flow,
        table
    )
}

/// 残余割，`nodes` 中不在源点侧的顶点列为汇点侧
pub fn residual_cut_table(cut: &ResidualCut, nodes: &[NodeId]) -> String {
    let source_side: Vec<&NodeId> = cut.source_side.iter().collect();
    let sink_side: Vec<&NodeId> = nodes.iter().filter(|n| !cut.contains(n)).collect();

    let mut table = new_table();
    table.set_titles(row!["割边", "容量"]);
    for e in &cut.cut_edges {
        table.add_row(row![format!("{} -> {}", e.source, e.target), e.capacity]);
    }
    format!(
        "源点侧: {{{}}}  汇点侧: {{{}}}  割容量: {}\n{}",
        join_ids(&source_side),
        join_ids(&sink_side),
        cut.capacity,
        table
    )
}

/// 计算摘要
pub fn summary(history: &FlowHistory) -> String {
    let mut table = new_table();
    table.set_titles(row!["属性", "值"]);
    table.add_row(row!["运行 ID", history.run_id]);
    table.add_row(row!["策略", history.strategy]);
    table.add_row(row!["源点", history.source]);
    table.add_row(row!["汇点", history.sink]);
    table.add_row(row!["增广次数", history.iterations()]);
    table.add_row(row!["最大流", history.max_flow]);
    table.to_string()
}

/// 当前输入
pub fn input_table(input: &FlowInput) -> String {
    let endpoint = |id: &Option<NodeId>| {
        id.as_ref()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let mut table = new_table();
    table.set_titles(row!["源", "目标", "容量"]);
    for e in &input.edges {
        table.add_row(row![e.source, e.target, e.capacity]);
    }

    format!(
        "顶点 ({}): {}\n源点: {}  汇点: {}\n{}",
        input.nodes.len(),
        input
            .nodes
            .iter()
            .map(|n| n.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        endpoint(&input.source),
        endpoint(&input.sink),
        table
    )
}

/// 帮助信息
pub fn help() -> String {
    r#"
═══════════════════════════════════════════════════════════════
                   FlowTrace CLI 命令帮助
═══════════════════════════════════════════════════════════════

构建图:
  node <ID>...                 添加顶点
                               示例: node A B C D
  edge <起点> <终点> <容量>    添加边（端点不存在时自动添加）
                               示例: edge A B 3
  source <ID>                  设置源点
  sink <ID>                    设置汇点
  load <文件>                  从 JSON / CSV 文件加载
  limit <N|off>                设置增广次数上限
  show                         显示当前图
  reset                        清空当前图

计算与回放:
  run                          计算最大流并打印每次增广
  step <N>                     查看第 N 次增广后的边状态
  cut                          查看残余割
  dot <N> [文件]               导出第 N 次增广的 DOT 文本
  save <文件>                  保存计算历史（.json 或 .bin）

其他:
  help, h, ?                   显示帮助
  quit, exit, q                退出程序

═══════════════════════════════════════════════════════════════
"#
    .to_string()
}
