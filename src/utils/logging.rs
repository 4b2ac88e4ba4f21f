//! 日志工具模块
//!
//! 提供 tracing 订阅器初始化、运行日志文件和批次横幅的辅助函数。

use crate::config::Config;
use crate::error::{AppResult, FileError};
use crate::models::{BatchStats, PromptOutcome};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;

/// 初始化 tracing 订阅器
///
/// 默认 info 级别，可用 RUST_LOG 覆盖。
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// 初始化运行日志文件（覆盖写入文件头）
pub fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\n提示词处理日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header).map_err(|source| FileError::LogWriteFailed {
        path: log_file_path.to_string(),
        source,
    })?;
    Ok(())
}

/// 追加一条提示词处理结果到运行日志文件
pub fn append_outcome(log_file_path: &str, outcome: &PromptOutcome) -> AppResult<()> {
    let line = match (&outcome.artifact_path, &outcome.failure) {
        (Some(path), _) => format!(
            "提示词 {} | {} | 成功: {}\n",
            outcome.prompt_index,
            outcome.prompt,
            path.display()
        ),
        (None, Some(reason)) => format!(
            "提示词 {} | {} | 失败: {}\n",
            outcome.prompt_index, outcome.prompt, reason
        ),
        (None, None) => format!(
            "提示词 {} | {} | 状态: {:?}\n",
            outcome.prompt_index, outcome.prompt, outcome.state
        ),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|source| FileError::LogWriteFailed {
            path: log_file_path.to_string(),
            source,
        })?;

    file.write_all(line.as_bytes())
        .map_err(|source| FileError::LogWriteFailed {
            path: log_file_path.to_string(),
            source,
        })?;

    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量图片生成拼图模式");
    info!("📊 最大并发数: {}", config.max_concurrent_prompts);
    info!("🖼️ 网格: {}x{}", config.grid_rows, config.grid_cols);
    info!("📁 输出目录: {}", config.output_dir);
    info!("{}", "=".repeat(60));
}

/// 记录提示词加载信息
pub fn log_prompts_loaded(prompts: &[String], max_concurrent: usize) {
    info!("✓ 本次批次共 {} 个提示词", prompts.len());
    for (i, prompt) in prompts.iter().enumerate() {
        info!("  {}. {}", i + 1, truncate_text(prompt, 60));
    }
    info!("📋 并发上限 {} 个\n", max_concurrent);
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &BatchStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 5), "abcde...");
    }
}
