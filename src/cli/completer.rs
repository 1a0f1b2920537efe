//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全：第一个词补全命令，之后补全已知顶点

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 命令列表
pub const COMMANDS: &[&str] = &[
    "node", "edge", "source", "sink", "load", "limit", "show", "reset",
    "run", "step", "cut", "dot", "save", "help", "quit", "exit",
];

/// 参数是顶点 ID 的命令
const NODE_COMMANDS: &[&str] = &["edge", "source", "sink"];

/// FlowTrace CLI 补全器
#[derive(Default)]
pub struct FlowCompleter {
    nodes: Vec<String>,
}

impl FlowCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新可补全的顶点
    pub fn set_nodes<I, S>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes = nodes.into_iter().map(Into::into).collect();
    }

    fn candidates(&self, line_to_cursor: &str) -> (usize, Vec<String>) {
        let word_start = line_to_cursor
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        let current = &line_to_cursor[word_start..];

        if word_start == 0 {
            let matches = COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(&current.to_lowercase()))
                .map(|cmd| cmd.to_string())
                .collect();
            return (0, matches);
        }

        let command = line_to_cursor
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_lowercase();
        if !NODE_COMMANDS.contains(&command.as_str()) {
            return (word_start, Vec::new());
        }

        let matches = self
            .nodes
            .iter()
            .filter(|n| n.starts_with(current))
            .cloned()
            .collect();
        (word_start, matches)
    }
}

impl Completer for FlowCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|m| Pair {
                display: m.clone(),
                replacement: m,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for FlowCompleter {
    type Hint = String;
}

impl Highlighter for FlowCompleter {}

impl Validator for FlowCompleter {}

impl Helper for FlowCompleter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_completion() {
        let completer = FlowCompleter::new();
        let (start, matches) = completer.candidates("so");
        assert_eq!(start, 0);
        assert_eq!(matches, vec!["source".to_string()]);

        let (_, matches) = completer.candidates("s");
        assert_eq!(matches, vec!["source", "sink", "show", "step", "save"]);
    }

    #[test]
    fn test_node_completion() {
        let mut completer = FlowCompleter::new();
        completer.set_nodes(["alpha", "beta", "alpine"]);

        let (start, matches) = completer.candidates("edge al");
        assert_eq!(start, 5);
        assert_eq!(matches, vec!["alpha", "alpine"]);

        let (_, matches) = completer.candidates("run al");
        assert!(matches.is_empty());
    }
}
