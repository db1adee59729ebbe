//! 实体属性定义
//!
//! 颜色与线宽等视觉属性。

use serde::{Deserialize, Serialize};

/// RGBA颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 从十六进制值创建（如 0xFF0000 表示红色）
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 255,
        }
    }

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 128, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::new(211, 211, 211);
    pub const ORANGE: Color = Color::new(255, 165, 0);
    pub const DARK_GREEN: Color = Color::new(0, 100, 0);

    /// 选中实体的高亮色
    pub const HIGHLIGHT: Color = Color::ORANGE;
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// 一次绘制使用的笔触（颜色 + 线宽）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub thickness: f64,
    /// 选中高亮
    #[serde(default)]
    pub highlighted: bool,
}

impl Stroke {
    pub const fn new(color: Color, thickness: f64) -> Self {
        Self {
            color,
            thickness,
            highlighted: false,
        }
    }

    /// 标记为选中高亮
    pub fn highlighted(self) -> Self {
        Self {
            highlighted: true,
            ..self
        }
    }

    /// 按比例调整线宽（用于延伸线、引线等细线）
    pub fn thinner(&self, factor: f64) -> Self {
        Self {
            thickness: self.thickness * factor,
            ..*self
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(Color::BLACK, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex(0xFFA500), Color::ORANGE);
        assert_eq!(Color::default(), Color::BLACK);
    }

    #[test]
    fn test_thinner_stroke() {
        let stroke = Stroke::new(Color::RED, 2.0).thinner(0.5);
        assert_eq!(stroke.color, Color::RED);
        assert!((stroke.thickness - 1.0).abs() < 1e-12);
        assert!(!stroke.highlighted);

        let stroke = Stroke::new(Color::HIGHLIGHT, 4.0).highlighted().thinner(0.5);
        assert!(stroke.highlighted);
    }
}
