//! 命令行界面
//!
//! 交互式会话、补全和结果打印

mod commands;
mod completer;
pub mod printer;

pub use commands::{execute_command, write_dot_files, CommandResult, Session};
pub use completer::{FlowCompleter, COMMANDS};
