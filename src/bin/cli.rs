//! FlowTrace CLI 工具
//!
//! 单次计算模式和交互模式

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use flowtrace::cli::{self, printer, CommandResult, FlowCompleter, Session};
use flowtrace::import::{self, InputFormat};
use flowtrace::{compute_max_flow, DepthFirst, FlowConfig, FlowHistory, NodeId, PathStrategy};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "flowtrace-cli")]
#[command(about = "FlowTrace 最大流命令行工具", version)]
struct Args {
    /// 输入文件，不指定时进入交互模式
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 输入格式 (json|csv)，默认按扩展名推断
    #[arg(short, long)]
    format: Option<String>,

    /// 源点（覆盖文件中的值）
    #[arg(short, long)]
    source: Option<String>,

    /// 汇点（覆盖文件中的值）
    #[arg(short = 't', long)]
    sink: Option<String>,

    /// 增广次数上限
    #[arg(short, long)]
    max_iterations: Option<usize>,

    /// 每次增广写一个 DOT 文件到该目录
    #[arg(short, long)]
    dot_dir: Option<PathBuf>,

    /// 以 JSON 输出计算历史
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = FlowConfig {
        max_iterations: args.max_iterations,
    };

    match args.input.clone() {
        Some(path) => run_once(&args, &path, &config),
        None => interactive(config),
    }
}

fn run_once(args: &Args, path: &Path, config: &FlowConfig) -> anyhow::Result<()> {
    let format = match &args.format {
        Some(f) => f.parse::<InputFormat>()?,
        None => InputFormat::from_path(path).unwrap_or(InputFormat::Json),
    };

    let input = import::load(
        path,
        format,
        args.source.as_deref().map(NodeId::from),
        args.sink.as_deref().map(NodeId::from),
    )
    .with_context(|| format!("无法加载 {}", path.display()))?;

    let outcome = compute_max_flow(&input, config)?;
    let (source, sink) = input.validate()?;
    let history = FlowHistory::from_outcome(outcome, source.clone(), sink.clone(), DepthFirst.name());

    if let Some(dir) = &args.dot_dir {
        let written = cli::write_dot_files(dir, &history.snapshots)?;
        eprintln!("已写入 {} 个 DOT 文件到 {}", written.len(), dir.display());
    }

    if args.json {
        println!("{}", history.to_json_pretty()?);
    } else {
        print!("{}", printer::iteration_table(&history.snapshots));
        print!("{}", printer::residual_cut_table(&history.residual_cut, &input.nodes));
        print!("{}", printer::summary(&history));
        println!("{} {}", "最大流:".bold(), history.max_flow.to_string().green());
    }

    Ok(())
}

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".flowtrace_history"))
}

fn interactive(config: FlowConfig) -> anyhow::Result<()> {
    println!("{}", "FlowTrace CLI - 最大流增广过程回放".bold());
    println!("输入 'help' 查看命令列表，'quit' 退出\n");

    let mut rl: Editor<FlowCompleter, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(FlowCompleter::new()));

    let history_file = history_path();
    if let Some(path) = &history_file {
        // 首次运行时文件不存在
        let _ = rl.load_history(path);
    }

    let mut session = Session::new(config);
    loop {
        match rl.readline("flowtrace> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                match cli::execute_command(line, &mut session) {
                    CommandResult::Exit => break,
                    CommandResult::Continue => {}
                    CommandResult::Message(msg) => println!("{}", msg),
                    CommandResult::Error(msg) => println!("{} {}", "错误:".red().bold(), msg),
                }

                if let Some(helper) = rl.helper_mut() {
                    helper.set_nodes(session.input.nodes.iter().map(|n| n.to_string()));
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history_file {
        if let Err(e) = rl.save_history(path) {
            tracing::warn!(error = %e, "无法保存命令历史");
        }
    }

    println!("再见！");
    Ok(())
}
