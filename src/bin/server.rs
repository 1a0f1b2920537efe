//! FlowTrace 服务器入口
//!
//! 启动 HTTP API 服务器

use clap::Parser;
use flowtrace::server::{start_server, ServerConfig};
use flowtrace::FlowConfig;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "flowtrace-server")]
#[command(about = "FlowTrace HTTP API 服务器", version)]
struct Args {
    /// 监听地址
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// 监听端口
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// 允许跨域的来源，可重复指定
    #[arg(short = 'o', long = "allowed-origin", default_value = "http://localhost:3000")]
    allowed_origins: Vec<String>,

    /// 单次计算超时（秒）
    #[arg(short, long, default_value = "30")]
    timeout_secs: u64,

    /// 增广次数上限
    #[arg(short, long)]
    max_iterations: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    info!(
        origins = ?args.allowed_origins,
        timeout_secs = args.timeout_secs,
        max_iterations = ?args.max_iterations,
        "FlowTrace {}",
        flowtrace::VERSION
    );

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        allowed_origins: args.allowed_origins,
        request_timeout: Duration::from_secs(args.timeout_secs),
        flow: FlowConfig {
            max_iterations: args.max_iterations,
        },
    };

    start_server(config).await?;

    Ok(())
}
