//! 顶点标识
//!
//! 顶点只有身份，没有其他属性。请求中的顶点可以是字符串或整数，
//! 统一规范化为字符串形式（整数 `7` 与字符串 `"7"` 是同一个顶点）。

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 顶点 ID
///
/// 线上的整数与字符串按文本合并：`7` 和 `"7"` 是同一个顶点，
/// 同一请求里同时出现两者时只建一个顶点。需要区分时调用方应统一使用字符串。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 空字符串视为缺失
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// 线上格式的顶点 ID（字符串或整数）
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireNodeId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<WireNodeId> for NodeId {
    fn from(raw: WireNodeId) -> Self {
        match raw {
            WireNodeId::Text(s) => NodeId(s),
            WireNodeId::Signed(n) => NodeId::from(n),
            WireNodeId::Unsigned(n) => NodeId::from(n),
        }
    }
}

/// 宽松解析单个顶点 ID
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<NodeId, D::Error>
where
    D: Deserializer<'de>,
{
    WireNodeId::deserialize(deserializer).map(NodeId::from)
}

/// 宽松解析可选顶点 ID（null 或缺失视为 None）
pub(crate) fn deserialize_lenient_opt<'de, D>(deserializer: D) -> Result<Option<NodeId>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<WireNodeId>::deserialize(deserializer).map(|raw| raw.map(NodeId::from))
}

/// 宽松解析顶点列表
pub(crate) fn deserialize_lenient_vec<'de, D>(deserializer: D) -> Result<Vec<NodeId>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<WireNodeId>::deserialize(deserializer)
        .map(|raw| raw.into_iter().map(NodeId::from).collect())
}
