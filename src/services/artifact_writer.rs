//! 成品写入服务 - 业务能力层
//!
//! 把标注完成的图片保存为 PNG，文件名从提示词净化而来，
//! 统一写到固定输出目录下。同名文件直接覆盖，没有版本号。

use crate::error::{AppResult, FileError};
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 成品写入服务
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 确保输出目录存在（启动时调用一次）
    pub fn ensure_output_dir(&self) -> AppResult<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| FileError::CreateDirFailed {
            path: self.output_dir.display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// 保存成品图片
    ///
    /// 路径为 `<output_dir>/<净化后的 name>.png`。
    /// 写入失败（权限、目录缺失、磁盘满）原样上抛，不重试。
    pub fn write(&self, image: &RgbImage, name: &str) -> AppResult<PathBuf> {
        let path = self.artifact_path(name);

        image.save(&path).map_err(|source| FileError::SaveFailed {
            path: path.display().to_string(),
            source,
        })?;

        debug!("已保存: {}", path.display());

        Ok(path)
    }

    /// name 对应的成品路径（不写入）
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.png", sanitize_file_stem(name)))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// 把提示词净化成安全的文件名主干
///
/// 字母、数字、连字符、下划线保留，其余字符（含空格和路径分隔符）
/// 替换为下划线。
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
