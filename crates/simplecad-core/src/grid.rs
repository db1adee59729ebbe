//! 栅格绘制
//!
//! 在世界坐标下绘制栅格：坐标轴、每10格一条的主线、以及足够稀疏时的次线。
//! 线宽按屏幕像素给出，绘制时除以缩放级别。

use crate::math::{BoundingBox2, Point2};
use crate::properties::Color;
use crate::render::Renderer;

/// 屏幕上栅格间距小于该值时不绘制
const MIN_SCREEN_SPACING: f64 = 2.0;

/// 屏幕上栅格间距大于该值时才绘制次线
const MINOR_SCREEN_SPACING: f64 = 5.0;

/// 主线间隔（格数）
const MAJOR_EVERY: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub x_axis: Color,
    pub y_axis: Color,
    pub axis_width: f64,
    pub major: Color,
    pub major_width: f64,
    pub minor: Color,
    pub minor_width: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            x_axis: Color::RED,
            y_axis: Color::BLUE,
            axis_width: 1.5,
            major: Color::new(200, 200, 200),
            major_width: 1.0,
            minor: Color::with_alpha(240, 240, 240, 128),
            minor_width: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GridRenderer {
    pub style: GridStyle,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在可见范围内绘制栅格
    pub fn draw(
        &self,
        renderer: &mut dyn Renderer,
        visible: &BoundingBox2,
        spacing: f64,
        zoom: f64,
    ) {
        if spacing <= 0.0 || zoom <= 0.0 || visible.is_empty() {
            return;
        }

        let scaled = spacing * zoom;
        if scaled < MIN_SCREEN_SPACING {
            return;
        }
        let draw_minor = scaled > MINOR_SCREEN_SPACING;

        let first_col = (visible.min.x / spacing).floor() as i64;
        let last_col = (visible.max.x / spacing).ceil() as i64;
        for k in first_col..=last_col {
            let x = k as f64 * spacing;
            let p1 = Point2::new(x, visible.min.y);
            let p2 = Point2::new(x, visible.max.y);
            if let Some((color, width)) = self.line_style(k, draw_minor, self.style.y_axis) {
                renderer.draw_line(p1, p2, color, width / zoom);
            }
        }

        let first_row = (visible.min.y / spacing).floor() as i64;
        let last_row = (visible.max.y / spacing).ceil() as i64;
        for k in first_row..=last_row {
            let y = k as f64 * spacing;
            let p1 = Point2::new(visible.min.x, y);
            let p2 = Point2::new(visible.max.x, y);
            if let Some((color, width)) = self.line_style(k, draw_minor, self.style.x_axis) {
                renderer.draw_line(p1, p2, color, width / zoom);
            }
        }
    }

    fn line_style(&self, index: i64, draw_minor: bool, axis: Color) -> Option<(Color, f64)> {
        if index == 0 {
            Some((axis, self.style.axis_width))
        } else if index % MAJOR_EVERY == 0 {
            Some((self.style.major, self.style.major_width))
        } else if draw_minor {
            Some((self.style.minor, self.style.minor_width))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingRenderer};

    fn bounds() -> BoundingBox2 {
        BoundingBox2::new(Point2::new(-50.0, -50.0), Point2::new(150.0, 150.0))
    }

    fn colors(r: &RecordingRenderer) -> Vec<Color> {
        r.commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_dense_grid_is_skipped() {
        let mut r = RecordingRenderer::new();
        GridRenderer::new().draw(&mut r, &bounds(), 10.0, 0.1);
        assert!(r.commands().is_empty());
    }

    #[test]
    fn test_axes_and_major_lines() {
        let mut r = RecordingRenderer::new();
        GridRenderer::new().draw(&mut r, &bounds(), 10.0, 1.0);

        let colors = colors(&r);
        assert_eq!(colors.iter().filter(|c| **c == Color::RED).count(), 1);
        assert_eq!(colors.iter().filter(|c| **c == Color::BLUE).count(), 1);
        // x = 100 与 y = 100 两条主线
        let major = GridStyle::default().major;
        assert_eq!(colors.iter().filter(|c| **c == major).count(), 2);
        // -50..=150 每方向 21 条
        assert_eq!(colors.len(), 42);
    }

    #[test]
    fn test_minor_lines_hidden_when_sparse() {
        let mut r = RecordingRenderer::new();
        GridRenderer::new().draw(&mut r, &bounds(), 10.0, 0.4);
        let minor = GridStyle::default().minor;
        assert!(colors(&r).iter().all(|c| *c != minor));
        assert_eq!(colors(&r).len(), 4);
    }
}
