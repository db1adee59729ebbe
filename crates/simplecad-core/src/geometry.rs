//! 几何图元定义
//!
//! 支持的图元：
//! - 线段 (Line)
//! - 圆弧 (Arc)
//! - 插值曲线 (Curve)
//! - 标注（见 [`crate::dimension`]）
//!
//! 所有图元实现 [`Shape`]，[`Geometry`] 枚举按类型分派。

use crate::dimension::{AngularDimension, Dimension, LinearDimension, RadialDimension};
use crate::math::{
    distance, normalize_degrees, point_to_segment_distance, rotate_point, scale_point,
    BoundingBox2, Point2, Vector2,
};
use crate::properties::Stroke;
use crate::render::Renderer;
use crate::spline::{sample_through, CURVE_SUBDIVISIONS};
use serde::{Deserialize, Serialize};

/// 图元的公共能力：绘制、包围盒、拾取与几何变换
///
/// 旋转角度为弧度（绕 `center` 逆时针为正）。
pub trait Shape {
    fn draw(&self, renderer: &mut dyn Renderer, stroke: Stroke);

    fn bounding_box(&self) -> BoundingBox2;

    fn hit_test(&self, point: &Point2, tolerance: f64) -> bool;

    fn translate(&mut self, dx: f64, dy: f64);

    fn rotate(&mut self, center: &Point2, angle: f64);

    fn scale(&mut self, center: &Point2, sx: f64, sy: f64);
}

/// 几何类型枚举
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Geometry {
    Line(Line),
    Arc(Arc),
    Curve(Curve),
    LinearDimension(LinearDimension),
    RadialDimension(RadialDimension),
    AngularDimension(AngularDimension),
}

macro_rules! dispatch {
    ($self:expr, $g:ident => $body:expr) => {
        match $self {
            Geometry::Line($g) => $body,
            Geometry::Arc($g) => $body,
            Geometry::Curve($g) => $body,
            Geometry::LinearDimension($g) => $body,
            Geometry::RadialDimension($g) => $body,
            Geometry::AngularDimension($g) => $body,
        }
    };
}

impl Geometry {
    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Line(_) => "Line",
            Geometry::Arc(_) => "Arc",
            Geometry::Curve(_) => "Curve",
            Geometry::LinearDimension(_) => "LinearDimension",
            Geometry::RadialDimension(_) => "RadialDimension",
            Geometry::AngularDimension(_) => "AngularDimension",
        }
    }

    /// 作为标注访问
    pub fn as_dimension(&self) -> Option<&dyn Dimension> {
        match self {
            Geometry::LinearDimension(d) => Some(d),
            Geometry::RadialDimension(d) => Some(d),
            Geometry::AngularDimension(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_dimension_mut(&mut self) -> Option<&mut dyn Dimension> {
        match self {
            Geometry::LinearDimension(d) => Some(d),
            Geometry::RadialDimension(d) => Some(d),
            Geometry::AngularDimension(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_dimension(&self) -> bool {
        self.as_dimension().is_some()
    }
}

impl Shape for Geometry {
    fn draw(&self, renderer: &mut dyn Renderer, stroke: Stroke) {
        dispatch!(self, g => g.draw(renderer, stroke))
    }

    fn bounding_box(&self) -> BoundingBox2 {
        dispatch!(self, g => g.bounding_box())
    }

    fn hit_test(&self, point: &Point2, tolerance: f64) -> bool {
        dispatch!(self, g => g.hit_test(point, tolerance))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        dispatch!(self, g => g.translate(dx, dy))
    }

    fn rotate(&mut self, center: &Point2, angle: f64) {
        dispatch!(self, g => g.rotate(center, angle))
    }

    fn scale(&mut self, center: &Point2, sx: f64, sy: f64) {
        dispatch!(self, g => g.scale(center, sx, sy))
    }
}

impl From<Line> for Geometry {
    fn from(line: Line) -> Self {
        Geometry::Line(line)
    }
}

impl From<Arc> for Geometry {
    fn from(arc: Arc) -> Self {
        Geometry::Arc(arc)
    }
}

impl From<Curve> for Geometry {
    fn from(curve: Curve) -> Self {
        Geometry::Curve(curve)
    }
}

impl From<LinearDimension> for Geometry {
    fn from(dim: LinearDimension) -> Self {
        Geometry::LinearDimension(dim)
    }
}

impl From<RadialDimension> for Geometry {
    fn from(dim: RadialDimension) -> Self {
        Geometry::RadialDimension(dim)
    }
}

impl From<AngularDimension> for Geometry {
    fn from(dim: AngularDimension) -> Self {
        Geometry::AngularDimension(dim)
    }
}

/// 线段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

impl Line {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 线段长度
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// 中点
    pub fn midpoint(&self) -> Point2 {
        Point2::from((self.start.coords + self.end.coords) / 2.0)
    }

    /// 点到线段的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        point_to_segment_distance(point, &self.start, &self.end)
    }
}

impl Shape for Line {
    fn draw(&self, renderer: &mut dyn Renderer, stroke: Stroke) {
        renderer.draw_line(self.start, self.end, stroke.color, stroke.thickness);
    }

    fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.start, self.end])
    }

    fn hit_test(&self, point: &Point2, tolerance: f64) -> bool {
        self.distance_to_point(point) <= tolerance
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let offset = Vector2::new(dx, dy);
        self.start += offset;
        self.end += offset;
    }

    fn rotate(&mut self, center: &Point2, angle: f64) {
        self.start = rotate_point(&self.start, center, angle);
        self.end = rotate_point(&self.end, center, angle);
    }

    fn scale(&mut self, center: &Point2, sx: f64, sy: f64) {
        self.start = scale_point(&self.start, center, sx, sy);
        self.end = scale_point(&self.end, center, sx, sy);
    }
}

/// 圆弧
///
/// 角度以度为单位存储。绘制时扫掠角为 `end_angle - start_angle`，
/// 符号表示旋转方向；拾取时按 `[start, end]` 区间判断，`start > end` 时跨越 0°。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    /// 起始角度（度）
    pub start_angle: f64,
    /// 终止角度（度）
    pub end_angle: f64,
}

impl Arc {
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// 绘制用的扫掠角（度，带符号）
    pub fn sweep_angle(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// 指定角度（度）处圆上的点
    pub fn point_at_degrees(&self, degrees: f64) -> Point2 {
        let rad = degrees.to_radians();
        Point2::new(
            self.center.x + self.radius * rad.cos(),
            self.center.y + self.radius * rad.sin(),
        )
    }

    pub fn start_point(&self) -> Point2 {
        self.point_at_degrees(self.start_angle)
    }

    pub fn end_point(&self) -> Point2 {
        self.point_at_degrees(self.end_angle)
    }

    /// 角度是否落在拾取区间 `[start, end]` 内（`start > end` 时跨越 0°）
    pub fn contains_angle(&self, degrees: f64) -> bool {
        let a = normalize_degrees(degrees);
        let start = normalize_degrees(self.start_angle);
        let end = normalize_degrees(self.end_angle);

        if start <= end {
            a >= start && a <= end
        } else {
            a >= start || a <= end
        }
    }

    /// 角度是否落在实际绘制出的扫掠范围内
    fn covers_drawn_angle(&self, degrees: f64) -> bool {
        let sweep = self.sweep_angle();
        if sweep.abs() >= 360.0 {
            return true;
        }
        if sweep >= 0.0 {
            normalize_degrees(degrees - self.start_angle) <= sweep
        } else {
            normalize_degrees(self.start_angle - degrees) <= -sweep
        }
    }
}

impl Shape for Arc {
    fn draw(&self, renderer: &mut dyn Renderer, stroke: Stroke) {
        renderer.draw_arc(
            self.center,
            self.radius,
            self.start_angle,
            self.sweep_angle(),
            stroke.color,
            stroke.thickness,
        );
    }

    /// 端点加上扫掠范围内的象限点
    fn bounding_box(&self) -> BoundingBox2 {
        let mut bbox = BoundingBox2::from_points([self.start_point(), self.end_point()]);
        for quadrant in [0.0, 90.0, 180.0, 270.0] {
            if self.covers_drawn_angle(quadrant) {
                bbox.expand_to_include(&self.point_at_degrees(quadrant));
            }
        }
        bbox
    }

    fn hit_test(&self, point: &Point2, tolerance: f64) -> bool {
        let d = distance(point, &self.center);
        if (d - self.radius).abs() > tolerance {
            return false;
        }

        let angle = (point.y - self.center.y)
            .atan2(point.x - self.center.x)
            .to_degrees();
        self.contains_angle(angle)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center += Vector2::new(dx, dy);
    }

    fn rotate(&mut self, center: &Point2, angle: f64) {
        self.center = rotate_point(&self.center, center, angle);
        let degrees = angle.to_degrees();
        self.start_angle = normalize_degrees(self.start_angle + degrees);
        self.end_angle = normalize_degrees(self.end_angle + degrees);
    }

    fn scale(&mut self, center: &Point2, sx: f64, sy: f64) {
        self.center = scale_point(&self.center, center, sx, sy);
        self.radius *= ((sx + sy) / 2.0).abs();
    }
}

/// 插值曲线
///
/// 曲线穿过所有通过点；渲染、包围盒与拾取都基于 [`CURVE_SUBDIVISIONS`] 分辨率的采样折线，
/// 每次按当前通过点重新采样。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub pass_points: Vec<Point2>,
}

impl Curve {
    pub fn new(pass_points: Vec<Point2>) -> Self {
        Self { pass_points }
    }

    /// 采样折线，少于2个通过点时为空
    pub fn sample_points(&self) -> Vec<Point2> {
        sample_through(&self.pass_points, CURVE_SUBDIVISIONS)
    }
}

impl Shape for Curve {
    fn draw(&self, renderer: &mut dyn Renderer, stroke: Stroke) {
        let samples = self.sample_points();
        if samples.len() < 2 {
            return;
        }
        renderer.draw_path(&samples, stroke.color, stroke.thickness);
    }

    fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points(self.sample_points())
    }

    fn hit_test(&self, point: &Point2, tolerance: f64) -> bool {
        self.sample_points()
            .windows(2)
            .any(|w| point_to_segment_distance(point, &w[0], &w[1]) <= tolerance)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let offset = Vector2::new(dx, dy);
        for p in &mut self.pass_points {
            *p += offset;
        }
    }

    fn rotate(&mut self, center: &Point2, angle: f64) {
        for p in &mut self.pass_points {
            *p = rotate_point(p, center, angle);
        }
    }

    fn scale(&mut self, center: &Point2, sx: f64, sy: f64) {
        for p in &mut self.pass_points {
            *p = scale_point(p, center, sx, sy);
        }
    }
}
