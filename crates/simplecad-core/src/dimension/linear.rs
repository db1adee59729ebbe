//! 线性标注

use super::{draw_arrow, draw_value_text, Dimension, DimensionStyle};
use crate::geometry::Shape;
use crate::math::{distance, rotate_point, scale_point, BoundingBox2, Point2, Vector2};
use crate::properties::Stroke;
use crate::render::Renderer;
use crate::transform::Transform2D;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// 默认偏移距离
pub const DEFAULT_OFFSET: f64 = 20.0;

/// 延伸线与被标注点之间的间隙
const EXTENSION_GAP: f64 = 2.0;

/// 线性标注
///
/// `|dx| > |dy|` 时为水平标注，否则为垂直标注。测量值始终是两点间的欧氏距离。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearDimension {
    pub point1: Point2,
    pub point2: Point2,
    /// 标注线到被标注点的距离
    pub offset: f64,
    pub style: DimensionStyle,
}

impl LinearDimension {
    pub fn new(point1: Point2, point2: Point2, offset: f64) -> Self {
        Self {
            point1,
            point2,
            offset,
            style: DimensionStyle::default(),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        (self.point2.x - self.point1.x).abs() > (self.point2.y - self.point1.y).abs()
    }

    /// 测量值
    pub fn measured_length(&self) -> f64 {
        distance(&self.point1, &self.point2)
    }

    fn draw_horizontal(
        &self,
        renderer: &mut dyn Renderer,
        stroke: Stroke,
        text_pos: Point2,
        text: &str,
        text_width: f64,
    ) {
        let y = text_pos.y;
        draw_extension_line(renderer, self.point1, Point2::new(self.point1.x, y), stroke);
        draw_extension_line(renderer, self.point2, Point2::new(self.point2.x, y), stroke);

        let left = Point2::new(self.point1.x.min(self.point2.x), y);
        let right = Point2::new(self.point1.x.max(self.point2.x), y);
        let half = text_width / 2.0;
        let size = self.style.arrow_size;

        if text_pos.x >= left.x && text_pos.x <= right.x {
            renderer.draw_line(left, right, stroke.color, stroke.thickness);
            draw_arrow(renderer, left, Vector2::new(-1.0, 0.0), size, stroke);
            draw_arrow(renderer, right, Vector2::new(1.0, 0.0), size, stroke);
        } else {
            if text_pos.x + half < left.x {
                renderer.draw_line(
                    Point2::new(text_pos.x + half, y),
                    right,
                    stroke.color,
                    stroke.thickness,
                );
            } else {
                renderer.draw_line(
                    left,
                    Point2::new(text_pos.x - half, y),
                    stroke.color,
                    stroke.thickness,
                );
            }
            // 文字在外侧时箭头朝内
            draw_arrow(renderer, left, Vector2::new(1.0, 0.0), size, stroke);
            draw_arrow(renderer, right, Vector2::new(-1.0, 0.0), size, stroke);
        }

        draw_value_text(
            renderer,
            text,
            text_pos.x - half,
            text_pos.y,
            self.style.text_size,
            stroke,
        );
    }

    fn draw_vertical(
        &self,
        renderer: &mut dyn Renderer,
        stroke: Stroke,
        text_pos: Point2,
        text: &str,
        text_width: f64,
    ) {
        let x = text_pos.x;
        draw_extension_line(renderer, self.point1, Point2::new(x, self.point1.y), stroke);
        draw_extension_line(renderer, self.point2, Point2::new(x, self.point2.y), stroke);

        let top = Point2::new(x, self.point1.y.min(self.point2.y));
        let bottom = Point2::new(x, self.point1.y.max(self.point2.y));
        let half_size = self.style.text_size / 2.0;
        let size = self.style.arrow_size;

        if text_pos.y >= top.y && text_pos.y <= bottom.y {
            renderer.draw_line(top, bottom, stroke.color, stroke.thickness);
            draw_arrow(renderer, top, Vector2::new(0.0, -1.0), size, stroke);
            draw_arrow(renderer, bottom, Vector2::new(0.0, 1.0), size, stroke);
        } else {
            if text_pos.y + half_size < top.y {
                renderer.draw_line(
                    Point2::new(x, text_pos.y + half_size),
                    bottom,
                    stroke.color,
                    stroke.thickness,
                );
            } else {
                renderer.draw_line(
                    top,
                    Point2::new(x, text_pos.y - half_size),
                    stroke.color,
                    stroke.thickness,
                );
            }
            draw_arrow(renderer, top, Vector2::new(0.0, 1.0), size, stroke);
            draw_arrow(renderer, bottom, Vector2::new(0.0, -1.0), size, stroke);
        }

        // 竖排文字：绕文字位置旋转 -90°
        renderer.push_transform(Transform2D::rotation_around(text_pos, -FRAC_PI_2));
        draw_value_text(
            renderer,
            text,
            text_pos.x - text_width / 2.0,
            text_pos.y,
            self.style.text_size,
            stroke,
        );
        renderer.pop_transform();
    }
}

/// 延伸线：离开被标注点一个间隙，长度不足两倍间隙时省略
fn draw_extension_line(renderer: &mut dyn Renderer, from: Point2, to: Point2, stroke: Stroke) {
    let v = to - from;
    let len = v.norm();
    if len < EXTENSION_GAP * 2.0 {
        return;
    }

    let start = from + v * (EXTENSION_GAP / len);
    let thin = stroke.thinner(0.5);
    renderer.draw_line(start, to, thin.color, thin.thickness);
}

impl Dimension for LinearDimension {
    fn style(&self) -> &DimensionStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut DimensionStyle {
        &mut self.style
    }

    fn default_text_position(&self) -> Point2 {
        let mid_x = (self.point1.x + self.point2.x) / 2.0;
        let mid_y = (self.point1.y + self.point2.y) / 2.0;
        if self.is_horizontal() {
            Point2::new(mid_x, self.point1.y.min(self.point2.y) - self.offset)
        } else {
            Point2::new(self.point1.x.min(self.point2.x) - self.offset, mid_y)
        }
    }

    fn value_text(&self) -> String {
        format!("{:.2}", self.measured_length())
    }

    /// 以文字位置为中心
    fn text_bounds(&self, text_position: Point2, text_width: f64) -> BoundingBox2 {
        let size = self.style.text_size;
        BoundingBox2::from_origin_size(
            text_position.x - text_width / 2.0,
            text_position.y - size / 2.0,
            text_width,
            size,
        )
    }
}

impl Shape for LinearDimension {
    fn draw(&self, renderer: &mut dyn Renderer, stroke: Stroke) {
        let text_pos = self.text_position();
        let text = self.value_text();
        let text_width = renderer.measure_text_width(&text, self.style.text_size);

        if self.is_horizontal() {
            self.draw_horizontal(renderer, stroke, text_pos, &text, text_width);
        } else {
            self.draw_vertical(renderer, stroke, text_pos, &text, text_width);
        }
    }

    fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.point1, self.point2, self.text_position()]).inflate(20.0)
    }

    fn hit_test(&self, point: &Point2, tolerance: f64) -> bool {
        if self.hit_test_text(point, tolerance) {
            return true;
        }

        let text_pos = self.text_position();
        if self.is_horizontal() {
            let min_x = self.point1.x.min(self.point2.x);
            let max_x = self.point1.x.max(self.point2.x);
            (point.y - text_pos.y).abs() <= tolerance
                && point.x >= min_x - tolerance
                && point.x <= max_x + tolerance
        } else {
            let min_y = self.point1.y.min(self.point2.y);
            let max_y = self.point1.y.max(self.point2.y);
            (point.x - text_pos.x).abs() <= tolerance
                && point.y >= min_y - tolerance
                && point.y <= max_y + tolerance
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let offset = Vector2::new(dx, dy);
        self.point1 += offset;
        self.point2 += offset;
        self.style.translate_override(dx, dy);
    }

    fn rotate(&mut self, center: &Point2, angle: f64) {
        self.point1 = rotate_point(&self.point1, center, angle);
        self.point2 = rotate_point(&self.point2, center, angle);
        self.style.rotate_override(center, angle);
    }

    fn scale(&mut self, center: &Point2, sx: f64, sy: f64) {
        self.point1 = scale_point(&self.point1, center, sx, sy);
        self.point2 = scale_point(&self.point2, center, sx, sy);
        self.offset *= sx.min(sy);
        self.style.scale_override(center, sx, sy);
    }
}
