//! # Craiyon Mosaic
//!
//! 一个批量请求 AI 图片生成服务并合成拼图的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 封装对外 HTTP 调用
//! - `CraiyonClient` - 图片生成服务（每个提示词一次请求）
//! - `JobHistoryClient` - 任务历史查询（derived 提示词模式）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个提示词的数据
//! - `PromptSource` - 产出提示词列表
//! - `ImageDecoder` - Base64 负载 → 内存位图
//! - `MosaicCompositor` - 3x3 行优先拼图
//! - `Annotator` - 边框扩展 + 居中文字标注
//! - `ArtifactWriter` - PNG 成品写入
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个提示词"的完整处理流程
//! - `PromptCtx` - 上下文封装（编号 + 文件名）
//! - `PromptFlow` - 流程编排（请求 → 解码 → 拼图 → 标注 → 保存）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量提示词处理器，
//!   管理并发扇出和失败隔离
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{CraiyonClient, JobHistoryClient};
pub use config::{Config, PromptMode};
pub use error::{AppError, AppResult};
pub use models::{BatchStats, GenerationResponse, PromptOutcome, PromptState};
pub use orchestrator::App;
pub use services::{Annotator, ArtifactWriter, ImageDecoder, MosaicCompositor, PromptSource};
pub use workflow::{PromptCtx, PromptFlow};
