//! 标注
//!
//! 三种标注共享同一套文字处理：文字位置可以被用户拖动覆盖，
//! 未覆盖时由标注几何计算默认位置；拾取时文字框优先于标注线。
//!
//! - [`LinearDimension`] 线性标注（水平/垂直自动判断）
//! - [`RadialDimension`] 半径标注
//! - [`AngularDimension`] 角度标注

mod angular;
mod linear;
mod radial;

pub use angular::{AngularDimension, DEFAULT_ARC_RADIUS};
pub use linear::{LinearDimension, DEFAULT_OFFSET};
pub use radial::RadialDimension;

use crate::geometry::Shape;
use crate::math::{rotate_point, scale_point, BoundingBox2, Point2, Vector2, EPSILON};
use crate::properties::Stroke;
use crate::render::{estimate_text_width, Renderer};
use serde::{Deserialize, Serialize};

/// 默认箭头大小
pub const DEFAULT_ARROW_SIZE: f64 = 5.0;

/// 默认文字大小
pub const DEFAULT_TEXT_SIZE: f64 = 12.0;

/// 标注样式与文字覆盖位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionStyle {
    /// 用户拖动后的文字位置，`None` 表示使用默认位置
    pub text_override: Option<Point2>,
    pub arrow_size: f64,
    pub text_size: f64,
}

impl Default for DimensionStyle {
    fn default() -> Self {
        Self {
            text_override: None,
            arrow_size: DEFAULT_ARROW_SIZE,
            text_size: DEFAULT_TEXT_SIZE,
        }
    }
}

impl DimensionStyle {
    pub(crate) fn translate_override(&mut self, dx: f64, dy: f64) {
        if let Some(p) = self.text_override.as_mut() {
            *p += Vector2::new(dx, dy);
        }
    }

    pub(crate) fn rotate_override(&mut self, center: &Point2, angle: f64) {
        if let Some(p) = self.text_override.as_mut() {
            *p = rotate_point(p, center, angle);
        }
    }

    pub(crate) fn scale_override(&mut self, center: &Point2, sx: f64, sy: f64) {
        if let Some(p) = self.text_override.as_mut() {
            *p = scale_point(p, center, sx, sy);
        }
    }
}

/// 标注的公共行为
pub trait Dimension: Shape {
    fn style(&self) -> &DimensionStyle;

    fn style_mut(&mut self) -> &mut DimensionStyle;

    /// 未覆盖时的文字位置
    fn default_text_position(&self) -> Point2;

    /// 显示的测量值文本
    fn value_text(&self) -> String;

    /// 给定文字位置与宽度时的文字框
    fn text_bounds(&self, text_position: Point2, text_width: f64) -> BoundingBox2;

    /// 当前文字位置：覆盖位置优先
    fn text_position(&self) -> Point2 {
        self.style()
            .text_override
            .unwrap_or_else(|| self.default_text_position())
    }

    /// 不依赖渲染器的文字宽度估算
    fn estimated_text_width(&self) -> f64 {
        estimate_text_width(&self.value_text(), self.style().text_size)
    }

    /// 文字框（按估算宽度）是否命中
    fn hit_test_text(&self, point: &Point2, tolerance: f64) -> bool {
        self.text_bounds(self.text_position(), self.estimated_text_width())
            .inflate(tolerance)
            .contains(point)
    }

    /// 把文字移动到指定位置
    fn move_text_to(&mut self, position: Point2) {
        self.style_mut().text_override = Some(position);
    }

    /// 恢复默认文字位置
    fn reset_text_position(&mut self) {
        self.style_mut().text_override = None;
    }
}

/// 箭头线宽，与实体线宽无关；选中时加倍
pub const ARROW_THICKNESS: f64 = 1.0;

/// 绘制开口箭头：从 `tip` 沿 `-direction` 画两条边
///
/// 只取笔触的颜色和高亮标记，线宽固定为 [`ARROW_THICKNESS`]。
/// 方向向量长度为零时不绘制。
pub fn draw_arrow(
    renderer: &mut dyn Renderer,
    tip: Point2,
    direction: Vector2,
    size: f64,
    stroke: Stroke,
) {
    let len = direction.norm();
    if len < EPSILON {
        return;
    }

    let dir = direction / len;
    let perp = Vector2::new(-dir.y, dir.x);
    let base = tip - dir * size;
    let half_width = size * 0.5;
    let thickness = if stroke.highlighted {
        ARROW_THICKNESS * 2.0
    } else {
        ARROW_THICKNESS
    };

    renderer.draw_line(tip, base + perp * half_width, stroke.color, thickness);
    renderer.draw_line(tip, base - perp * half_width, stroke.color, thickness);
}

/// 文字左上角位于 `(x, y - size / 2)`，即 `y` 为文字竖直中线
pub(crate) fn draw_value_text(
    renderer: &mut dyn Renderer,
    text: &str,
    x: f64,
    y: f64,
    size: f64,
    stroke: Stroke,
) {
    renderer.draw_text(text, Point2::new(x, y - size / 2.0), size, stroke.color);
}
