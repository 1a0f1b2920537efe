//! 交互命令处理
//!
//! 会话中逐步构建输入，运行计算后可以逐次回放快照

use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithm::{compute_max_flow, DepthFirst, PathStrategy};
use crate::error::{Error, Result};
use crate::export::{DotExporter, FlowHistory, SnapshotExporter};
use crate::graph::{FlowSnapshot, NodeId};
use crate::import::{self, InputFormat};
use crate::types::{EdgeSpec, FlowConfig, FlowInput};

use super::printer;

/// 命令执行结果
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 交互会话状态
#[derive(Debug, Default)]
pub struct Session {
    pub input: FlowInput,
    pub config: FlowConfig,
    /// 最近一次计算
    pub last_run: Option<FlowHistory>,
}

impl Session {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    fn add_node(&mut self, id: NodeId) -> bool {
        if self.input.nodes.contains(&id) {
            return false;
        }
        self.input.nodes.push(id);
        true
    }

    /// 图被修改后旧的计算结果失效
    fn touch(&mut self) {
        self.last_run = None;
    }

    /// 计算最大流并保存历史
    pub fn run(&mut self) -> Result<&FlowHistory> {
        let outcome = compute_max_flow(&self.input, &self.config)?;
        let (source, sink) = self.input.validate()?;
        let history = FlowHistory::from_outcome(outcome, source.clone(), sink.clone(), DepthFirst.name());
        Ok(&*self.last_run.insert(history))
    }

    fn history(&self) -> Result<&FlowHistory> {
        self.last_run
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("尚未运行计算，请先执行 run".to_string()))
    }

    fn snapshot(&self, arg: &str) -> Result<&FlowSnapshot> {
        let history = self.history()?;
        let n: usize = arg
            .parse()
            .map_err(|_| Error::InvalidInput(format!("无效的迭代序号: {}", arg)))?;
        history
            .snapshots
            .get(n.wrapping_sub(1))
            .ok_or_else(|| {
                Error::InvalidInput(format!("迭代序号超出范围 1..={}", history.iterations()))
            })
    }
}

/// 解析并执行一条命令
pub fn execute_command(input: &str, session: &mut Session) -> CommandResult {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return CommandResult::Continue;
    };
    let cmd = first.to_lowercase();
    let args = &parts[1..];

    match dispatch(&cmd, args, session) {
        Ok(result) => result,
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn dispatch(cmd: &str, args: &[&str], session: &mut Session) -> Result<CommandResult> {
    let result = match cmd {
        "help" | "h" | "?" => CommandResult::Message(printer::help()),

        "quit" | "exit" | "q" => CommandResult::Exit,

        "node" | "n" => {
            if args.is_empty() {
                return Ok(usage("node <ID>..."));
            }
            let added = args
                .iter()
                .filter(|id| session.add_node(NodeId::from(**id)))
                .count();
            session.touch();
            CommandResult::Message(format!("添加了 {} 个顶点", added))
        }

        "edge" | "e" => {
            let [from, to, capacity] = args else {
                return Ok(usage("edge <起点> <终点> <容量>"));
            };
            let capacity: f64 = capacity
                .parse()
                .map_err(|_| Error::InvalidInput(format!("无效的容量: {}", capacity)))?;
            let spec = EdgeSpec::new(*from, *to, capacity);
            session.add_node(spec.source.clone());
            session.add_node(spec.target.clone());
            session.input.edges.push(spec);
            session.touch();
            CommandResult::Message(format!("添加边 {} -> {} (容量 {})", from, to, capacity))
        }

        "source" | "sink" => {
            let [id] = args else {
                return Ok(usage(&format!("{} <ID>", cmd)));
            };
            // 只设置端点，不存在的顶点在 run 时报错
            let id = NodeId::from(*id);
            if cmd == "source" {
                session.input.source = Some(id);
            } else {
                session.input.sink = Some(id);
            }
            session.touch();
            CommandResult::Continue
        }

        "load" => {
            let [path] = args else {
                return Ok(usage("load <文件>"));
            };
            let format = InputFormat::from_path(path).unwrap_or(InputFormat::Json);
            session.input = import::load(path, format, None, None)?;
            session.touch();
            CommandResult::Message(format!(
                "已加载 {} 个顶点、{} 条边",
                session.input.nodes.len(),
                session.input.edges.len()
            ))
        }

        "limit" => {
            let [value] = args else {
                return Ok(usage("limit <N|off>"));
            };
            session.config.max_iterations = match *value {
                "off" | "none" => None,
                n => Some(
                    n.parse()
                        .map_err(|_| Error::InvalidInput(format!("无效的上限: {}", n)))?,
                ),
            };
            CommandResult::Continue
        }

        "show" => CommandResult::Message(printer::input_table(&session.input)),

        "reset" => {
            let config = session.config.clone();
            *session = Session::new(config);
            CommandResult::Message("已清空".to_string())
        }

        "run" => {
            let history = session.run()?;
            CommandResult::Message(format!(
                "{}\n最大流: {}",
                printer::iteration_table(&history.snapshots),
                history.max_flow
            ))
        }

        "step" => {
            let [n] = args else {
                return Ok(usage("step <N>"));
            };
            CommandResult::Message(printer::snapshot_table(session.snapshot(n)?))
        }

        "cut" => CommandResult::Message(printer::residual_cut_table(
            &session.history()?.residual_cut,
            &session.input.nodes,
        )),

        "dot" => {
            let (n, path) = match args {
                [n] => (*n, None),
                [n, path] => (*n, Some(*path)),
                _ => return Ok(usage("dot <N> [文件]")),
            };
            let dot = DotExporter::default().export(session.snapshot(n)?)?;
            match path {
                Some(path) => {
                    fs::write(path, dot)?;
                    CommandResult::Message(format!("已写入 {}", path))
                }
                None => CommandResult::Message(dot),
            }
        }

        "save" => {
            let [path] = args else {
                return Ok(usage("save <文件>"));
            };
            let history = session.history()?;
            if Path::new(path).extension().is_some_and(|ext| ext == "bin") {
                fs::write(path, history.to_bytes()?)?;
            } else {
                fs::write(path, history.to_json_pretty()?)?;
            }
            CommandResult::Message(format!("已保存 {}", path))
        }

        _ => CommandResult::Error(format!("未知命令: {}。输入 'help' 查看帮助。", cmd)),
    };

    Ok(result)
}

fn usage(text: &str) -> CommandResult {
    CommandResult::Error(format!("用法: {}", text))
}

/// 为每个快照写一个 DOT 文件，返回写入的路径
pub fn write_dot_files(dir: &Path, snapshots: &[FlowSnapshot]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let exporter = DotExporter::default();
    snapshots
        .iter()
        .map(|s| {
            let path = dir.join(format!("iteration_{:03}.dot", s.iteration));
            fs::write(&path, exporter.export(s)?)?;
            Ok(path)
        })
        .collect()
}
