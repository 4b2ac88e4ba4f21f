//! 批次处理结果模型

use std::path::PathBuf;

/// 单个提示词分支的状态机
///
/// `Pending → Requested → Decoded → Composed → Annotated → Saved`，
/// 任意一步出错转入 `Failed`。终态只有 `Saved` 和 `Failed`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Pending,
    Requested,
    Decoded,
    Composed,
    Annotated,
    Saved,
    Failed,
}

/// 单个提示词的最终处理结果
#[derive(Debug)]
pub struct PromptOutcome {
    /// 提示词编号（从 1 开始，仅用于日志显示）
    pub prompt_index: usize,
    /// 提示词内容
    pub prompt: String,
    /// 终态
    pub state: PromptState,
    /// 成功时的成品路径
    pub artifact_path: Option<PathBuf>,
    /// 失败时的错误描述
    pub failure: Option<String>,
}

impl PromptOutcome {
    pub fn saved(prompt_index: usize, prompt: String, path: PathBuf) -> Self {
        Self {
            prompt_index,
            prompt,
            state: PromptState::Saved,
            artifact_path: Some(path),
            failure: None,
        }
    }

    pub fn failed(prompt_index: usize, prompt: String, reason: String) -> Self {
        Self {
            prompt_index,
            prompt,
            state: PromptState::Failed,
            artifact_path: None,
            failure: Some(reason),
        }
    }

    pub fn is_saved(&self) -> bool {
        self.state == PromptState::Saved
    }
}

/// 批次处理统计
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

impl BatchStats {
    pub fn from_outcomes(outcomes: &[PromptOutcome]) -> Self {
        let success = outcomes.iter().filter(|o| o.is_saved()).count();
        Self {
            success,
            failed: outcomes.len() - success,
            total: outcomes.len(),
        }
    }
}
