//! 任务历史记录模型（derived 提示词模式）

use serde::Deserialize;

/// 一条任务运行记录
///
/// 只读查询的结果，按预期开始时间倒序返回。
#[derive(Debug, Clone, Deserialize)]
pub struct JobRun {
    /// 任务名称（kebab-case，如 "giant-lime-otter"）
    pub name: String,
    /// 创建时间（服务端格式，仅透传）
    #[serde(default)]
    pub created: Option<String>,
}
