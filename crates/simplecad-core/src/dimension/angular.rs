//! 角度标注

use super::{draw_arrow, draw_value_text, Dimension, DimensionStyle};
use crate::geometry::Shape;
use crate::math::{
    angle_between, distance, normalize_signed_radians, rotate_point, scale_point, BoundingBox2,
    Point2, Vector2,
};
use crate::properties::Stroke;
use crate::render::Renderer;
use serde::{Deserialize, Serialize};

/// 默认标注弧半径
pub const DEFAULT_ARC_RADIUS: f64 = 30.0;

/// 显示弧的最小半径
const MIN_DISPLAY_RADIUS: f64 = 15.0;

/// 角度标注
///
/// 测量从 `center` 出发经过 `point1`、`point2` 两条射线的夹角。
/// 显示弧的半径跟随文字位置，为中心到文字距离的 0.7 倍。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngularDimension {
    pub center: Point2,
    pub point1: Point2,
    pub point2: Point2,
    pub arc_radius: f64,
    pub style: DimensionStyle,
}

impl AngularDimension {
    pub fn new(center: Point2, point1: Point2, point2: Point2, arc_radius: f64) -> Self {
        Self {
            center,
            point1,
            point2,
            arc_radius,
            style: DimensionStyle::default(),
        }
    }

    fn start_angle(&self) -> f64 {
        angle_between(&self.center, &self.point1)
    }

    fn end_angle(&self) -> f64 {
        angle_between(&self.center, &self.point2)
    }

    /// 从第一条射线到第二条射线的有向夹角（弧度，[-π, π]）
    fn signed_sweep(&self) -> f64 {
        normalize_signed_radians(self.end_angle() - self.start_angle())
    }

    /// 角平分线方向（弧度）
    fn bisector_angle(&self) -> f64 {
        self.start_angle() + self.signed_sweep() / 2.0
    }

    /// 夹角（度，非负）
    pub fn angle_degrees(&self) -> f64 {
        self.signed_sweep().abs().to_degrees()
    }

    /// 实际绘制的弧半径
    pub fn display_radius(&self) -> f64 {
        (distance(&self.center, &self.text_position()) * 0.7).max(MIN_DISPLAY_RADIUS)
    }

    fn point_on_ray(&self, angle: f64, r: f64) -> Point2 {
        Point2::new(
            self.center.x + r * angle.cos(),
            self.center.y + r * angle.sin(),
        )
    }

    /// 射线端点在显示弧之外时，从弧外侧画到端点附近
    fn draw_extension_line(
        &self,
        renderer: &mut dyn Renderer,
        ray_point: Point2,
        angle: f64,
        r: f64,
        stroke: Stroke,
    ) {
        let d = distance(&self.center, &ray_point);
        if d <= r * 1.2 {
            return;
        }

        let thin = stroke.thinner(0.5);
        renderer.draw_line(
            self.point_on_ray(angle, r * 1.1),
            self.point_on_ray(angle, d * 0.9),
            thin.color,
            thin.thickness,
        );
    }
}

impl Dimension for AngularDimension {
    fn style(&self) -> &DimensionStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut DimensionStyle {
        &mut self.style
    }

    /// 角平分线上 1.5 倍标注弧半径处
    fn default_text_position(&self) -> Point2 {
        self.point_on_ray(self.bisector_angle(), self.arc_radius * 1.5)
    }

    fn value_text(&self) -> String {
        format!("{:.2}°", self.angle_degrees())
    }

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

impl Shape for AngularDimension {
    fn draw(&self, renderer: &mut dyn Renderer, stroke: Stroke) {
        let text_pos = self.text_position();
        let r = self.display_radius();
        let a1 = self.start_angle();
        let a2 = self.end_angle();
        let sweep = self.signed_sweep();

        self.draw_extension_line(renderer, self.point1, a1, r, stroke);
        self.draw_extension_line(renderer, self.point2, a2, r, stroke);

        renderer.draw_arc(
            self.center,
            r,
            a1.to_degrees(),
            sweep.to_degrees(),
            stroke.color,
            stroke.thickness,
        );

        // 零扫掠不画箭头
        let sign = if sweep > 0.0 {
            1.0
        } else if sweep < 0.0 {
            -1.0
        } else {
            0.0
        };
        let size = self.style.arrow_size;
        draw_arrow(
            renderer,
            self.point_on_ray(a1, r),
            Vector2::new(-a1.sin(), a1.cos()) * sign,
            size,
            stroke,
        );
        draw_arrow(
            renderer,
            self.point_on_ray(a2, r),
            Vector2::new(a2.sin(), -a2.cos()) * sign,
            size,
            stroke,
        );

        let arc_mid = self.point_on_ray(self.bisector_angle(), r);
        if distance(&arc_mid, &text_pos) > r * 0.2 {
            let leader = stroke.thinner(0.7);
            renderer.draw_line(arc_mid, text_pos, leader.color, leader.thickness);
        }

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
        BoundingBox2::from_points([self.center, self.point1, self.point2, self.text_position()])
            .inflate(40.0)
    }

    fn hit_test(&self, point: &Point2, tolerance: f64) -> bool {
        if self.hit_test_text(point, tolerance) {
            return true;
        }

        let r = self.display_radius();
        if (distance(&self.center, point) - r).abs() > tolerance {
            return false;
        }

        let sweep = self.signed_sweep();
        let rel = normalize_signed_radians(angle_between(&self.center, point) - self.start_angle());
        if sweep >= 0.0 {
            rel >= 0.0 && rel <= sweep
        } else {
            rel <= 0.0 && rel >= sweep
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let offset = Vector2::new(dx, dy);
        self.center += offset;
        self.point1 += offset;
        self.point2 += offset;
        self.style.translate_override(dx, dy);
    }

    fn rotate(&mut self, center: &Point2, angle: f64) {
        self.center = rotate_point(&self.center, center, angle);
        self.point1 = rotate_point(&self.point1, center, angle);
        self.point2 = rotate_point(&self.point2, center, angle);
        self.style.rotate_override(center, angle);
    }

    fn scale(&mut self, center: &Point2, sx: f64, sy: f64) {
        self.center = scale_point(&self.center, center, sx, sy);
        self.point1 = scale_point(&self.point1, center, sx, sy);
        self.point2 = scale_point(&self.point2, center, sx, sy);
        self.arc_radius *= sx.min(sy);
        self.style.scale_override(center, sx, sy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingRenderer};
    use std::f64::consts::FRAC_1_SQRT_2;

    fn right_angle() -> AngularDimension {
        AngularDimension::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
            DEFAULT_ARC_RADIUS,
        )
    }

    #[test]
    fn test_value() {
        let dim = right_angle();
        assert!((dim.angle_degrees() - 90.0).abs() < 1e-9);
        assert_eq!(dim.value_text(), "90.00°");
    }

    #[test]
    fn test_reflex_angle_takes_short_way() {
        let dim = AngularDimension::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, -10.0),
            DEFAULT_ARC_RADIUS,
        );
        assert!((dim.angle_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_text_on_bisector() {
        let dim = right_angle();
        let p = dim.text_position();
        let expected = 45.0 * FRAC_1_SQRT_2;
        assert!((p.x - expected).abs() < 1e-9);
        assert!((p.y - expected).abs() < 1e-9);
        assert!((dim.display_radius() - 31.5).abs() < 1e-9);
    }

    #[test]
    fn test_display_radius_minimum() {
        let mut dim = right_angle();
        dim.move_text_to(Point2::new(1.0, 1.0));
        assert!((dim.display_radius() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_hit_test_arc_span() {
        let dim = right_angle();
        let r = dim.display_radius();
        let on_arc = Point2::new(r * (0.3f64).cos(), r * (0.3f64).sin());
        assert!(dim.hit_test(&on_arc, 1.0));

        let outside_span = Point2::new(-r * (0.3f64).cos(), -r * (0.3f64).sin());
        assert!(!dim.hit_test(&outside_span, 1.0));
    }

    #[test]
    fn test_draw() {
        let dim = right_angle();
        let mut r = RecordingRenderer::new();
        dim.draw(&mut r, Stroke::default());

        assert_eq!(r.count("arc"), 1);
        match r.commands().iter().find(|c| c.kind() == "arc").unwrap() {
            DrawCommand::Arc {
                start_deg,
                sweep_deg,
                radius,
                ..
            } => {
                assert!(start_deg.abs() < 1e-9);
                assert!((sweep_deg - 90.0).abs() < 1e-9);
                assert!((radius - 31.5).abs() < 1e-9);
            }
            _ => unreachable!(),
        }
        // 射线端点在弧内，无延伸线；2×2 箭头 + 引线
        assert_eq!(r.lines().len(), 5);
        assert_eq!(r.texts(), vec!["90.00°"]);
    }

    #[test]
    fn test_zero_sweep_has_no_arrows() {
        let dim = AngularDimension::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(20.0, 0.0),
            DEFAULT_ARC_RADIUS,
        );
        let mut r = RecordingRenderer::new();
        dim.draw(&mut r, Stroke::default());
        assert_eq!(dim.value_text(), "0.00°");
        // 只有引线
        assert_eq!(r.lines().len(), 1);
    }

    #[test]
    fn test_scale_scales_arc_radius() {
        let mut dim = right_angle();
        dim.scale(&Point2::origin(), 0.5, 2.0);
        assert!((dim.arc_radius - 15.0).abs() < 1e-12);
    }
}
