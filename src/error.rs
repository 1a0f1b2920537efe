//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("无效的输入数据: {0}")]
    InvalidInput(String),

    #[error("无效的边 {from} -> {to}: {reason}")]
    InvalidEdge {
        from: String,
        to: String,
        reason: String,
    },

    #[error("无效的源点/汇点: {0}")]
    InvalidEndpoints(String),

    #[error("增广次数超过上限 {limit}")]
    MaxIterationsExceeded { limit: usize },

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("导出错误: {0}")]
    ExportError(String),

    #[error("服务器错误: {0}")]
    ServerError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl Error {
    /// 是否为调用方输入导致的错误（HTTP 400）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_)
                | Error::InvalidEdge { .. }
                | Error::InvalidEndpoints(_)
                | Error::MaxIterationsExceeded { .. }
        )
    }

    /// 错误类别（用于指标和日志）
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::InvalidEdge { .. } => "invalid_edge",
            Error::InvalidEndpoints(_) => "invalid_endpoints",
            Error::MaxIterationsExceeded { .. } => "max_iterations_exceeded",
            Error::ImportError(_) => "import",
            Error::ExportError(_) => "export",
            Error::ServerError(_) => "server",
            Error::IoError(_) => "io",
            Error::SerializationError(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(Error::InvalidInput("nodes".into()).is_client_error());
        assert!(Error::InvalidEndpoints("A".into()).is_client_error());
        assert!(Error::MaxIterationsExceeded { limit: 3 }.is_client_error());
        assert!(!Error::ServerError("bind".into()).is_client_error());
    }

    #[test]
    fn test_edge_error_message() {
        let e = Error::InvalidEdge {
            from: "A".into(),
            to: "Z".into(),
            reason: "目标顶点不存在".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("A -> Z"));
        assert_eq!(e.kind(), "invalid_edge");
    }
}
