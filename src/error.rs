//! 错误类型定义
//!
//! 按照关注点划分错误类别：API 调用、图片解码、拼图合成、
//! 文件读写、资源加载。编排层统一捕获 `AppError`，
//! 单个提示词的失败不会向外传播到整个批次。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误（网络失败或非 200 状态码）
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 图片解码错误
    #[error("解码错误: {0}")]
    Decode(#[from] DecodeError),
    /// 拼图合成错误
    #[error("拼图错误: {0}")]
    Composition(#[from] CompositionError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 资源加载错误（启动时致命）
    #[error("资源错误: {0}")]
    Asset(#[from] AssetError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（传输层错误，包括超时）
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务返回非 200 状态码，原样透传不做解释
    #[error("API返回错误状态码 ({endpoint}): {status}")]
    BadResponse { endpoint: String, status: u16 },
    /// HTTP 客户端构建失败
    #[error("HTTP客户端构建失败: {0}")]
    ClientBuildFailed(#[source] reqwest::Error),
    /// 请求头的值非法（来自配置）
    #[error("请求头 {name} 的值非法")]
    InvalidHeaderValue { name: String },
    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
}

/// 图片解码错误
#[derive(Debug, Error)]
pub enum DecodeError {
    /// 响应体不是合法 JSON 或缺少 images 字段
    #[error("响应体解析失败: {0}")]
    BodyParseFailed(#[from] serde_json::Error),
    /// Base64 解码失败
    #[error("Base64解码失败 (第 {index} 张): {source}")]
    InvalidBase64 {
        index: usize,
        #[source]
        source: base64::DecodeError,
    },
    /// 图片字节不是合法的图片容器
    #[error("图片解码失败 (第 {index} 张): {source}")]
    InvalidImage {
        index: usize,
        #[source]
        source: image::ImageError,
    },
}

/// 拼图合成错误
#[derive(Debug, Error)]
pub enum CompositionError {
    /// 图片数量与网格不符
    #[error("图片数量不符: 期望 {expected} 张, 实际 {actual} 张")]
    WrongImageCount { expected: usize, actual: usize },
    /// 同一批图片的尺寸不一致
    #[error(
        "图片尺寸不一致 (第 {index} 张): 期望 {expected_w}x{expected_h}, 实际 {actual_w}x{actual_h}"
    )]
    DimensionMismatch {
        index: usize,
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 创建输出目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 保存图片文件失败
    #[error("保存图片失败 ({path}): {source}")]
    SaveFailed {
        path: String,
        #[source]
        source: image::ImageError,
    },
    /// 写入运行日志失败
    #[error("写入日志失败 ({path}): {source}")]
    LogWriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 资源加载错误
///
/// 字体缺失时任何提示词都无法成功，因此在启动阶段直接失败，
/// 而不是作为单次调用的错误。
#[derive(Debug, Error)]
pub enum AssetError {
    /// 读取字体文件失败
    #[error("读取字体文件失败 ({path}): {source}")]
    FontReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 字体文件内容无效
    #[error("字体文件无效 ({path})")]
    FontInvalid { path: String },
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
