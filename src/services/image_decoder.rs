//! 图片解码服务 - 业务能力层
//!
//! 从一次成功的生成响应中提取 Base64 图片列表并解码成内存位图。
//! 输出顺序与响应中的顺序完全一致。

use crate::error::{AppResult, DecodeError};
use crate::models::{GenerateBody, GenerationResponse};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::RgbImage;
use tracing::debug;

/// 图片解码服务
///
/// 前置条件：响应状态码为 200（由流程层检查），
/// 响应体是含 `images` 字段的 JSON。
pub struct ImageDecoder;

impl ImageDecoder {
    pub fn new() -> Self {
        Self
    }

    /// 解码一批图片
    ///
    /// 对每个负载依次做 Base64 解码和图片容器解码，
    /// 任意一张失败即整批失败。
    pub fn decode(&self, response: &GenerationResponse) -> AppResult<Vec<RgbImage>> {
        let body: GenerateBody =
            serde_json::from_str(&response.body).map_err(DecodeError::BodyParseFailed)?;

        debug!("响应包含 {} 个图片负载", body.images.len());

        let mut images = Vec::with_capacity(body.images.len());
        for (index, payload) in body.images.iter().enumerate() {
            let bytes = BASE64
                .decode(payload.trim())
                .map_err(|source| DecodeError::InvalidBase64 { index, source })?;

            let decoded = image::load_from_memory(&bytes)
                .map_err(|source| DecodeError::InvalidImage { index, source })?;

            images.push(decoded.to_rgb8());
        }

        Ok(images)
    }
}

impl Default for ImageDecoder {
    fn default() -> Self {
        Self::new()
    }
}
