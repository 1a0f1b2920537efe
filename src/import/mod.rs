//! 数据导入模块
//!
//! 从 JSON 文档或 CSV 边列表加载最大流输入

use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::types::{EdgeSpec, FlowInput};
use indexmap::IndexSet;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// 输入文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// 与 HTTP 请求体相同的 JSON 文档
    Json,
    /// `source,target,capacity` 边列表
    Csv,
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(InputFormat::Json),
            "csv" => Ok(InputFormat::Csv),
            other => Err(Error::ImportError(format!("不支持的格式: {}", other))),
        }
    }
}

impl InputFormat {
    /// 根据扩展名推断格式
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        ext.parse().ok()
    }
}

/// CSV 行
#[derive(Debug, Deserialize)]
struct CsvEdge {
    source: String,
    target: String,
    capacity: f64,
}

/// 从 JSON 文件加载
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<FlowInput> {
    let file = File::open(path.as_ref())?;
    read_json(BufReader::new(file))
}

/// 从任意读取器解析 JSON 文档
pub fn read_json<R: Read>(reader: R) -> Result<FlowInput> {
    serde_json::from_reader(reader).map_err(|e| Error::ImportError(format!("JSON 解析失败: {}", e)))
}

/// 从 CSV 文件加载；顶点按首次出现的顺序从边列表推出
pub fn load_csv<P: AsRef<Path>>(
    path: P,
    source: Option<NodeId>,
    sink: Option<NodeId>,
) -> Result<FlowInput> {
    let file = File::open(path.as_ref())?;
    read_csv(BufReader::new(file), source, sink)
}

/// 从任意读取器解析 CSV 边列表（需要表头 source,target,capacity）
pub fn read_csv<R: Read>(
    reader: R,
    source: Option<NodeId>,
    sink: Option<NodeId>,
) -> Result<FlowInput> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut nodes: IndexSet<NodeId> = IndexSet::new();
    let mut edges = Vec::new();

    for (line, record) in csv_reader.deserialize::<CsvEdge>().enumerate() {
        // 表头占第 1 行
        let row = record.map_err(|e| Error::ImportError(format!("第 {} 行: {}", line + 2, e)))?;
        let spec = EdgeSpec::new(row.source, row.target, row.capacity);
        nodes.insert(spec.source.clone());
        nodes.insert(spec.target.clone());
        edges.push(spec);
    }

    debug!(nodes = nodes.len(), edges = edges.len(), "CSV 导入完成");

    Ok(FlowInput {
        nodes: nodes.into_iter().collect(),
        edges,
        source,
        sink,
    })
}

/// 按格式加载，命令行指定的源点/汇点覆盖文件中的值
pub fn load<P: AsRef<Path>>(
    path: P,
    format: InputFormat,
    source: Option<NodeId>,
    sink: Option<NodeId>,
) -> Result<FlowInput> {
    match format {
        InputFormat::Json => {
            let mut input = load_json(path)?;
            if source.is_some() {
                input.source = source;
            }
            if sink.is_some() {
                input.sink = sink;
            }
            Ok(input)
        }
        InputFormat::Csv => load_csv(path, source, sink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_csv() {
        let data = "source,target,capacity\nA,B,3\nA, C ,2\nB,D,2\nC,D,3\n";
        let input = read_csv(data.as_bytes(), Some("A".into()), Some("D".into())).unwrap();
        assert_eq!(
            input.nodes,
            vec![NodeId::from("A"), "B".into(), "C".into(), "D".into()]
        );
        assert_eq!(input.edges.len(), 4);
        assert_eq!(input.edges[1].target, NodeId::from("C"));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_read_csv_bad_capacity() {
        let data = "source,target,capacity\nA,B,lots\n";
        let err = read_csv(data.as_bytes(), None, None).unwrap_err();
        match err {
            Error::ImportError(msg) => assert!(msg.contains("第 2 行")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_json_file_with_override() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"nodes": ["A", "B"], "edges": [{{"source": "A", "target": "B", "capacity": 1}}], "source": "A", "sink": "A"}}"#
        )
        .unwrap();

        let input = load(file.path(), InputFormat::Json, None, Some("B".into())).unwrap();
        assert_eq!(input.source, Some(NodeId::from("A")));
        assert_eq!(input.sink, Some(NodeId::from("B")));
    }

    #[test]
    fn test_load_csv_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "source,target,capacity").unwrap();
        writeln!(file, "1,2,5").unwrap();

        let input = load_csv(file.path(), Some(1u64.into()), Some(2u64.into())).unwrap();
        assert_eq!(input.nodes.len(), 2);
        assert_eq!(input.edges[0].capacity, 5.0);
    }

    #[test]
    fn test_invalid_json_reported() {
        let err = read_json("{ nodes: }".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::ImportError(_)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path("graph.csv"), Some(InputFormat::Csv));
        assert_eq!(InputFormat::from_path("graph.JSON"), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_path("graph"), None);
    }
}
