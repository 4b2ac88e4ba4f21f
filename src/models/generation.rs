//! 生成服务的响应模型

use serde::Deserialize;

/// 一次生成请求的原始结果
///
/// 客户端只透传状态码和响应体，不解释非 200 状态码。
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// HTTP 状态码
    pub status: u16,
    /// 原始响应体
    pub body: String,
}

impl GenerationResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// 成功响应的 JSON 结构
///
/// `images` 中每个元素是一张 Base64 编码的图片，
/// 顺序即服务端返回的顺序，解码后必须保持不变。
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateBody {
    pub images: Vec<String>,
}
