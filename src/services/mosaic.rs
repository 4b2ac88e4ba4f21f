//! 拼图合成服务 - 业务能力层
//!
//! 把一批等尺寸的图片按行优先顺序拼成一张大图。
//! 这是系统唯一的布局契约：索引 0 在左上角，
//! 图片顺序严格等于解码顺序（即服务端返回顺序）。

use crate::error::CompositionError;
use image::{imageops, RgbImage};
use tracing::debug;

/// 拼图合成服务
pub struct MosaicCompositor {
    rows: u32,
    cols: u32,
}

impl MosaicCompositor {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// 一次合成需要的图片数量
    pub fn expected_count(&self) -> usize {
        (self.rows * self.cols) as usize
    }

    /// 合成拼图
    ///
    /// 单元格尺寸取自第一张图片；整批图片的尺寸必须一致，
    /// 不一致直接失败，不做重采样。
    ///
    /// `images[idx]` 贴在像素偏移 `(col * w, row * h)`，
    /// 其中 `idx = row * cols + col`。
    pub fn compose(&self, images: &[RgbImage]) -> Result<RgbImage, CompositionError> {
        let expected = self.expected_count();
        if images.len() != expected {
            return Err(CompositionError::WrongImageCount {
                expected,
                actual: images.len(),
            });
        }

        let (width, height) = images[0].dimensions();
        for (index, img) in images.iter().enumerate() {
            let (w, h) = img.dimensions();
            if (w, h) != (width, height) {
                return Err(CompositionError::DimensionMismatch {
                    index,
                    expected_w: width,
                    expected_h: height,
                    actual_w: w,
                    actual_h: h,
                });
            }
        }

        debug!(
            "合成 {}x{} 拼图, 单元格 {}x{}",
            self.cols, self.rows, width, height
        );

        let mut canvas = RgbImage::new(width * self.cols, height * self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = (row * self.cols + col) as usize;
                let x = (col * width) as i64;
                let y = (row * height) as i64;
                imageops::replace(&mut canvas, &images[idx], x, y);
            }
        }

        Ok(canvas)
    }
}
