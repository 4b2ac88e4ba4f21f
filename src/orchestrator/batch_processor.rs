//! 批量提示词处理器 - 编排层
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、加载字体、建 HTTP 客户端、建输出目录
//! 2. **提示词加载**：静态或从任务历史派生
//! 3. **并发扇出**：每个提示词一个 tokio 任务，Semaphore 限制并发
//! 4. **失败隔离**：单个提示词失败只记录，不中断批次
//! 5. **结果配对**：按派生时的编号配对结果，与完成顺序无关
//! 6. **全局统计**：汇总所有提示词的处理结果

use crate::clients::CraiyonClient;
use crate::config::Config;
use crate::models::{BatchStats, PromptOutcome};
use crate::services::{Annotator, ArtifactWriter, PromptSource};
use crate::utils::logging;
use crate::workflow::{PromptCtx, PromptFlow};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    client: CraiyonClient,
    annotator: Arc<Annotator>,
    prompt_source: PromptSource,
}

impl App {
    /// 初始化应用
    ///
    /// 字体加载失败在这里直接失败整个进程：
    /// 没有字体任何提示词都不可能成功。
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config);

        let annotator = Arc::new(Annotator::new(&config)?);
        let client = CraiyonClient::new(&config)?;
        let prompt_source = PromptSource::new(&config)?;

        // 输出目录只建一次，之后并发写入互不相扰（文件名各不相同）
        ArtifactWriter::new(config.output_dir.clone()).ensure_output_dir()?;

        Ok(Self {
            config,
            client,
            annotator,
            prompt_source,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchStats> {
        let prompts = self.prompt_source.prompts().await?;

        if prompts.is_empty() {
            warn!("⚠️ 没有可处理的提示词（任务历史为空），程序结束");
            return Ok(BatchStats::default());
        }

        logging::log_prompts_loaded(&prompts, self.config.max_concurrent_prompts);

        let outcomes = self.process_all(prompts).await?;

        for outcome in &outcomes {
            logging::append_outcome(&self.config.output_log_file, outcome)?;
        }

        let stats = BatchStats::from_outcomes(&outcomes);
        logging::print_final_stats(&stats, &self.config);

        Ok(stats)
    }

    /// 并发处理所有提示词
    ///
    /// 每个任务在派生时就绑定了自己的编号和上下文，
    /// 按派生顺序 join，成品与提示词的对应关系不依赖完成顺序。
    async fn process_all(&self, prompts: Vec<String>) -> Result<Vec<PromptOutcome>> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_prompts));
        let mut handles = Vec::with_capacity(prompts.len());

        for (idx, prompt) in prompts.into_iter().enumerate() {
            let prompt_index = idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let flow = PromptFlow::new(&self.config, self.client.clone(), self.annotator.clone());
            let ctx = PromptCtx::new(prompt.clone(), prompt_index);

            let handle = tokio::spawn(async move {
                let _permit = permit;
                flow.run(&ctx).await
            });
            handles.push((prompt_index, prompt, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (prompt_index, prompt, handle) in handles {
            let outcome = match handle.await {
                Ok(Ok(path)) => PromptOutcome::saved(prompt_index, prompt, path),
                Ok(Err(e)) => {
                    error!("[提示词 {}] ❌ 处理失败: {}", prompt_index, e);
                    PromptOutcome::failed(prompt_index, prompt, e.to_string())
                }
                Err(e) => {
                    error!("[提示词 {}] ❌ 任务执行失败: {}", prompt_index, e);
                    PromptOutcome::failed(prompt_index, prompt, e.to_string())
                }
            };
            outcomes.push(outcome);
        }

        info!(
            "✓ 批次完成: 成功 {}/{}",
            outcomes.iter().filter(|o| o.is_saved()).count(),
            outcomes.len()
        );

        Ok(outcomes)
    }
}
