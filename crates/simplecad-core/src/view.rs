//! 视图变换
//!
//! 处理平移、缩放和屏幕/世界坐标转换。屏幕坐标 y 轴向下，与世界坐标同向：
//!
//! ```text
//! screen = (world + view_center) * zoom + viewport / 2
//! ```

use crate::math::{BoundingBox2, Point2, Vector2};
use crate::transform::Transform2D;
use serde::{Deserialize, Serialize};

/// 最小缩放
pub const MIN_ZOOM: f64 = 0.1;

/// 最大缩放
pub const MAX_ZOOM: f64 = 100.0;

/// 视图状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// 缩放级别（像素/单位）
    zoom: f64,

    /// 世界坐标的平移量
    pub view_center: Vector2,

    /// 视口宽度（像素）
    pub viewport_width: f64,

    /// 视口高度（像素）
    pub viewport_height: f64,
}

impl ViewTransform {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            zoom: 1.0,
            view_center: Vector2::zeros(),
            viewport_width,
            viewport_height,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// 设置缩放级别，限制在 [`MIN_ZOOM`, `MAX_ZOOM`]
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// 更新视口大小
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    fn half_viewport(&self) -> Vector2 {
        Vector2::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    /// 屏幕坐标转世界坐标
    pub fn screen_to_world(&self, screen: Point2) -> Point2 {
        Point2::from((screen.coords - self.half_viewport()) / self.zoom - self.view_center)
    }

    /// 世界坐标转屏幕坐标
    pub fn world_to_screen(&self, world: Point2) -> Point2 {
        Point2::from((world.coords + self.view_center) * self.zoom + self.half_viewport())
    }

    /// 按屏幕像素平移
    pub fn pan(&mut self, screen_delta: Vector2) {
        self.view_center += screen_delta / self.zoom;
    }

    /// 缩放（以指定屏幕点为中心，该点下的世界坐标保持不变）
    pub fn zoom_at(&mut self, screen_point: Point2, factor: f64) {
        let world_before = self.screen_to_world(screen_point);
        self.set_zoom(self.zoom * factor);
        let world_after = self.screen_to_world(screen_point);
        self.view_center += world_after - world_before;
    }

    /// 恢复默认视图
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.view_center = Vector2::zeros();
    }

    /// 渲染实体前压入的世界到屏幕变换
    pub fn world_to_screen_transform(&self) -> Transform2D {
        let half = self.half_viewport();
        Transform2D::translation(half.x, half.y)
            .then(&Transform2D::scale(self.zoom, self.zoom))
            .then(&Transform2D::translation(self.view_center.x, self.view_center.y))
    }

    /// 视口覆盖的世界范围
    pub fn visible_bounds(&self) -> BoundingBox2 {
        BoundingBox2::from_points([
            self.screen_to_world(Point2::origin()),
            self.screen_to_world(Point2::new(self.viewport_width, self.viewport_height)),
        ])
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
