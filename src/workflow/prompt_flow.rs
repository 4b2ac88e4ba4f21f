//! 提示词处理流程 - 流程层
//!
//! 核心职责：定义"一个提示词"的完整处理流程。
//!
//! 流程顺序：
//! 1. 请求生成服务（唯一的网络挂起点）
//! 2. 解码图片批次
//! 3. 合成拼图
//! 4. 加边框和文字标注
//! 5. 保存成品
//!
//! 任意一步失败即该提示词分支失败，不影响其他分支。

use crate::clients::CraiyonClient;
use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::PromptState;
use crate::services::{Annotator, ArtifactWriter, ImageDecoder, MosaicCompositor};
use crate::utils::logging::truncate_text;
use crate::workflow::prompt_ctx::PromptCtx;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// 提示词处理流程
///
/// - 编排一个提示词的完整分支
/// - 不做并发控制（编排层的事）
/// - 每个分支独占自己的图片缓冲区，分支之间没有共享可变状态
pub struct PromptFlow {
    client: CraiyonClient,
    decoder: ImageDecoder,
    compositor: MosaicCompositor,
    annotator: Arc<Annotator>,
    writer: ArtifactWriter,
    verbose_logging: bool,
}

impl PromptFlow {
    /// 创建新的提示词处理流程
    ///
    /// 客户端和标注器由编排层构建后传入：客户端共享连接池，
    /// 标注器共享已加载的字体。
    pub fn new(config: &Config, client: CraiyonClient, annotator: Arc<Annotator>) -> Self {
        Self {
            client,
            decoder: ImageDecoder::new(),
            compositor: MosaicCompositor::new(config.grid_rows, config.grid_cols),
            annotator,
            writer: ArtifactWriter::new(config.output_dir.clone()),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 跑完一个提示词的完整分支，返回成品路径
    pub async fn run(&self, ctx: &PromptCtx) -> AppResult<PathBuf> {
        info!(
            "[提示词 {}] 开始处理: {}",
            ctx.prompt_index,
            truncate_text(&ctx.prompt, 60)
        );
        self.advance(ctx, PromptState::Pending);

        // ========== 请求生成服务 ==========
        let response = self.client.generate(&ctx.prompt).await?;
        self.advance(ctx, PromptState::Requested);

        if !response.is_success() {
            return Err(ApiError::BadResponse {
                endpoint: self.client.endpoint().to_string(),
                status: response.status,
            }
            .into());
        }

        // ========== 解码 ==========
        let images = self.decoder.decode(&response)?;
        self.advance(ctx, PromptState::Decoded);

        info!(
            "[提示词 {}] ✓ 解码 {} 张图片",
            ctx.prompt_index,
            images.len()
        );
        if self.verbose_logging {
            if let Some(first) = images.first() {
                let (w, h) = first.dimensions();
                info!("[提示词 {}]   单元格尺寸: {}x{}", ctx.prompt_index, w, h);
            }
        }

        // ========== 合成拼图 ==========
        let mosaic = self.compositor.compose(&images)?;
        self.advance(ctx, PromptState::Composed);

        // ========== 标注 ==========
        let annotated = self.annotator.annotate(&mosaic, &ctx.prompt);
        self.advance(ctx, PromptState::Annotated);

        // ========== 保存 ==========
        let path = self.writer.write(&annotated, &ctx.file_stem)?;
        self.advance(ctx, PromptState::Saved);

        info!(
            "[提示词 {}] ✓ 已保存: {}",
            ctx.prompt_index,
            path.display()
        );

        Ok(path)
    }

    /// 记录状态机推进
    fn advance(&self, ctx: &PromptCtx, state: PromptState) {
        debug!("[提示词 {}] 状态: {:?}", ctx.prompt_index, state);
    }
}
