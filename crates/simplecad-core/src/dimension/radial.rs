//! 半径标注

use super::{draw_arrow, draw_value_text, Dimension, DimensionStyle};
use crate::geometry::Shape;
use crate::math::{
    angle_between, distance, point_to_segment_distance, rotate_point, scale_point, BoundingBox2,
    Point2, Vector2,
};
use crate::properties::Stroke;
use crate::render::Renderer;
use serde::{Deserialize, Serialize};

/// 引线折弯的水平长度
const ELBOW_LENGTH: f64 = 10.0;

/// 半径标注
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialDimension {
    pub center: Point2,
    /// 圆周上的点
    pub radius_point: Point2,
    pub style: DimensionStyle,
}

impl RadialDimension {
    pub fn new(center: Point2, radius_point: Point2) -> Self {
        Self {
            center,
            radius_point,
            style: DimensionStyle::default(),
        }
    }

    pub fn radius(&self) -> f64 {
        distance(&self.center, &self.radius_point)
    }
}

impl Dimension for RadialDimension {
    fn style(&self) -> &DimensionStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut DimensionStyle {
        &mut self.style
    }

    /// 沿半径方向 1.5 倍半径处
    fn default_text_position(&self) -> Point2 {
        let angle = angle_between(&self.center, &self.radius_point);
        let r = self.radius() * 1.5;
        Point2::new(
            self.center.x + r * angle.cos(),
            self.center.y + r * angle.sin(),
        )
    }

    fn value_text(&self) -> String {
        format!("R{:.2}", self.radius())
    }

    /// 文字框从文字位置向右展开
    fn text_bounds(&self, text_position: Point2, text_width: f64) -> BoundingBox2 {
        let size = self.style.text_size;
        BoundingBox2::from_origin_size(
            text_position.x,
            text_position.y - size / 2.0,
            text_width,
            size,
        )
    }
}

impl Shape for RadialDimension {
    fn draw(&self, renderer: &mut dyn Renderer, stroke: Stroke) {
        renderer.draw_line(self.center, self.radius_point, stroke.color, stroke.thickness);
        draw_arrow(
            renderer,
            self.radius_point,
            self.radius_point - self.center,
            self.style.arrow_size,
            stroke,
        );

        let text_pos = self.text_position();
        let elbow = Point2::new(text_pos.x - ELBOW_LENGTH, text_pos.y);
        let leader = stroke.thinner(0.7);
        renderer.draw_line(self.radius_point, elbow, leader.color, leader.thickness);
        renderer.draw_line(elbow, text_pos, leader.color, leader.thickness);

        draw_value_text(
            renderer,
            &self.value_text(),
            text_pos.x,
            text_pos.y,
            self.style.text_size,
            stroke,
        );
    }

    fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.center, self.radius_point, self.text_position()])
            .inflate(20.0)
    }

    fn hit_test(&self, point: &Point2, tolerance: f64) -> bool {
        self.hit_test_text(point, tolerance)
            || point_to_segment_distance(point, &self.center, &self.radius_point) <= tolerance
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let offset = Vector2::new(dx, dy);
        self.center += offset;
        self.radius_point += offset;
        self.style.translate_override(dx, dy);
    }

    fn rotate(&mut self, center: &Point2, angle: f64) {
        self.center = rotate_point(&self.center, center, angle);
        self.radius_point = rotate_point(&self.radius_point, center, angle);
        self.style.rotate_override(center, angle);
    }

    fn scale(&mut self, center: &Point2, sx: f64, sy: f64) {
        self.center = scale_point(&self.center, center, sx, sy);
        self.radius_point = scale_point(&self.radius_point, center, sx, sy);
        self.style.scale_override(center, sx, sy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::points_approx_eq;
    use crate::render::{DrawCommand, RecordingRenderer};

    fn dimension() -> RadialDimension {
        RadialDimension::new(Point2::new(0.0, 0.0), Point2::new(50.0, 0.0))
    }

    #[test]
    fn test_value_and_default_position() {
        let dim = dimension();
        assert_eq!(dim.value_text(), "R50.00");
        assert!(points_approx_eq(&dim.text_position(), &Point2::new(75.0, 0.0)));
    }

    #[test]
    fn test_text_bounds_left_anchored() {
        let dim = dimension();
        let bounds = dim.text_bounds(dim.text_position(), dim.estimated_text_width());
        assert!((bounds.min.x - 75.0).abs() < 1e-9);
        assert!((bounds.width() - 43.2).abs() < 1e-9);
        assert!((bounds.min.y + 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test() {
        let dim = dimension();
        assert!(dim.hit_test(&Point2::new(100.0, 3.0), 0.0));
        assert!(dim.hit_test(&Point2::new(25.0, 2.0), 3.0));
        assert!(!dim.hit_test(&Point2::new(25.0, 10.0), 3.0));
    }

    #[test]
    fn test_draw() {
        let dim = dimension();
        let mut r = RecordingRenderer::new();
        dim.draw(&mut r, Stroke::default());

        let lines = r.lines();
        // 半径线 + 2 箭头 + 2 引线
        assert_eq!(lines.len(), 5);
        assert!(lines.contains(&(Point2::new(50.0, 0.0), Point2::new(65.0, 0.0))));
        assert!(lines.contains(&(Point2::new(65.0, 0.0), Point2::new(75.0, 0.0))));
        assert!(r.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, position, .. }
                if text == "R50.00" && points_approx_eq(position, &Point2::new(75.0, -6.0))
        )));
    }

    #[test]
    fn test_degenerate_radius_skips_arrow() {
        let dim = RadialDimension::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0));
        let mut r = RecordingRenderer::new();
        dim.draw(&mut r, Stroke::default());
        assert_eq!(r.lines().len(), 3);
    }
}
