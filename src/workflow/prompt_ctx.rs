//! 提示词处理上下文
//!
//! 封装"我正在处理第几个提示词、它写到哪个文件"这一信息。
//! 文件名主干在创建上下文时就确定，和完成顺序无关，
//! 保证成品与提示词永远一一对应。

use crate::services::artifact_writer::sanitize_file_stem;
use std::fmt::Display;

/// 提示词处理上下文
#[derive(Debug, Clone)]
pub struct PromptCtx {
    /// 提示词内容
    pub prompt: String,

    /// 提示词编号（从 1 开始，仅用于日志显示）
    pub prompt_index: usize,

    /// 净化后的文件名主干
    pub file_stem: String,
}

impl PromptCtx {
    /// 创建新的提示词上下文
    pub fn new(prompt: String, prompt_index: usize) -> Self {
        let file_stem = sanitize_file_stem(&prompt);
        Self {
            prompt,
            prompt_index,
            file_stem,
        }
    }
}

impl Display for PromptCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[提示词 {}#{}]", self.prompt_index, self.prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_fixed_at_construction() {
        let ctx = PromptCtx::new("giant lime otter".to_string(), 3);
        assert_eq!(ctx.file_stem, "giant_lime_otter");
        assert_eq!(ctx.prompt_index, 3);
    }
}
