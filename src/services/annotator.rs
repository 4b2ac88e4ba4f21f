//! 标注服务 - 业务能力层
//!
//! 给拼图加一圈纯色边框，并在上下边框带中各烧入一行居中文字：
//! 上面是提示词，下面是署名。

use crate::config::Config;
use crate::error::{AppResult, AssetError};
use ab_glyph::{FontVec, PxScale};
use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::debug;

/// 标注服务
///
/// 字体在构造时加载一次；文件缺失或内容无效属于启动期致命错误，
/// 不会变成某一次调用的错误。
pub struct Annotator {
    font: FontVec,
    border_size: u32,
    background: Rgb<u8>,
    foreground: Rgb<u8>,
    prompt_scale: PxScale,
    attribution_scale: PxScale,
    attribution: String,
}

impl Annotator {
    pub fn new(config: &Config) -> AppResult<Self> {
        let bytes =
            std::fs::read(&config.font_path).map_err(|source| AssetError::FontReadFailed {
                path: config.font_path.clone(),
                source,
            })?;

        let font = FontVec::try_from_vec(bytes).map_err(|_| AssetError::FontInvalid {
            path: config.font_path.clone(),
        })?;

        Ok(Self {
            font,
            border_size: config.border_size,
            background: Rgb(config.background_color),
            foreground: Rgb(config.text_color),
            prompt_scale: PxScale::from(config.prompt_font_size),
            attribution_scale: PxScale::from(config.attribution_font_size),
            attribution: config.attribution.clone(),
        })
    }

    /// 标注拼图
    ///
    /// 步骤：四边各扩展 `border_size` 像素并填充背景色，
    /// 然后在上边框带居中画提示词、下边框带居中画署名。
    /// 文字超出边框宽度时不换行也不截断。
    pub fn annotate(&self, mosaic: &RgbImage, prompt: &str) -> RgbImage {
        let mut canvas = expand_with_border(mosaic, self.border_size, self.background);
        let (canvas_w, canvas_h) = canvas.dimensions();

        debug!("标注画布: {}x{}", canvas_w, canvas_h);

        // 上边框带：提示词
        let (text_w, text_h) = text_size(self.prompt_scale, &self.font, prompt);
        let x = (canvas_w.saturating_sub(text_w) / 2) as i32;
        let y = (self.border_size.saturating_sub(text_h) / 2) as i32;
        draw_text_mut(
            &mut canvas,
            self.foreground,
            x,
            y,
            self.prompt_scale,
            &self.font,
            prompt,
        );

        // 下边框带：署名，字号较小
        let (text_w, text_h) = text_size(self.attribution_scale, &self.font, &self.attribution);
        let x = (canvas_w.saturating_sub(text_w) / 2) as i32;
        let y = (canvas_h - self.border_size + self.border_size.saturating_sub(text_h) / 2) as i32;
        draw_text_mut(
            &mut canvas,
            self.foreground,
            x,
            y,
            self.attribution_scale,
            &self.font,
            &self.attribution,
        );

        canvas
    }
}

/// 四边对称扩展画布，新像素填充背景色
pub fn expand_with_border(image: &RgbImage, border: u32, background: Rgb<u8>) -> RgbImage {
    let (w, h) = image.dimensions();
    let mut canvas = RgbImage::from_pixel(w + border * 2, h + border * 2, background);
    imageops::replace(&mut canvas, image, border as i64, border as i64);
    canvas
}
