//! 提示词来源服务 - 业务能力层
//!
//! 产出本次批次要处理的提示词列表。derived 模式下没有任务记录时
//! 返回空列表，直接交给调用方处理，不在这里兜底成静态提示词。

use crate::clients::JobHistoryClient;
use crate::config::{Config, PromptMode};
use crate::error::AppResult;
use tracing::{debug, info};

/// 提示词来源服务
///
/// 两种模式：
/// - Static: 固定的单个提示词
/// - Derived: 从任务历史拉取最近 N 个任务名称，转写成自然语言
pub struct PromptSource {
    mode: Mode,
}

enum Mode {
    Static(String),
    Derived {
        client: JobHistoryClient,
        limit: usize,
        name_filter: String,
    },
}

impl PromptSource {
    pub fn new(config: &Config) -> AppResult<Self> {
        let mode = match config.prompt_mode {
            PromptMode::Static => Mode::Static(config.static_prompt.clone()),
            PromptMode::Derived => Mode::Derived {
                client: JobHistoryClient::new(config)?,
                limit: config.job_name_limit,
                name_filter: config.job_name_filter.clone(),
            },
        };

        Ok(Self { mode })
    }

    /// 产出有序的提示词列表
    ///
    /// Derived 模式下列表顺序即任务历史的倒序（最新在前）。
    pub async fn prompts(&self) -> AppResult<Vec<String>> {
        match &self.mode {
            Mode::Static(prompt) => {
                debug!("使用静态提示词: {}", prompt);
                Ok(vec![prompt.clone()])
            }
            Mode::Derived {
                client,
                limit,
                name_filter,
            } => {
                let runs = client.recent_runs(*limit, name_filter).await?;

                info!("从任务历史获取到 {} 个任务名称", runs.len());

                Ok(runs.iter().map(|r| humanize_name(&r.name)).collect())
            }
        }
    }
}

/// 把 kebab-case 的任务名称转写成自然语言提示词
///
/// "giant-lime-otter" -> "giant lime otter"
pub fn humanize_name(name: &str) -> String {
    name.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_name() {
        assert_eq!(humanize_name("giant-lime-otter"), "giant lime otter");
        assert_eq!(humanize_name("chocolate-toad"), "chocolate toad");
        assert_eq!(humanize_name("plain"), "plain");
    }

    #[tokio::test]
    async fn test_static_mode_returns_single_prompt() {
        let config = Config::default();
        let source = PromptSource::new(&config).unwrap();

        let prompts = source.prompts().await.unwrap();
        assert_eq!(prompts, vec!["chocolate toad".to_string()]);
    }
}
