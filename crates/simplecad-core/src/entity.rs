//! 实体标识和管理
//!
//! 实体 = 几何 + 通用属性（名称、颜色、线宽、可见性、选中状态）。
//! 选中与可见性的处理统一在这里完成，几何本身只关心形状。

use crate::dimension::Dimension;
use crate::geometry::{Geometry, Shape};
use crate::math::{BoundingBox2, Point2};
use crate::properties::{Color, Stroke};
use crate::render::Renderer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// 全局实体ID生成器
static ENTITY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// 实体拾取的默认容差
pub const DEFAULT_HIT_TOLERANCE: f64 = 5.0;

/// 实体唯一标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// 创建新的实体ID
    pub fn new() -> Self {
        Self(ENTITY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// 从指定值创建（用于文件加载）
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// CAD实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// 唯一标识符
    pub id: EntityId,

    /// 显示名称，默认为几何类型名
    pub name: String,

    pub color: Color,

    pub thickness: f64,

    pub visible: bool,

    pub selected: bool,

    /// 几何类型和数据
    pub geometry: Geometry,
}

impl Entity {
    /// 创建新实体
    ///
    /// 标注默认深绿色，其余图元默认黑色，线宽 1.0。
    pub fn new(geometry: impl Into<Geometry>) -> Self {
        let geometry = geometry.into();
        let color = if geometry.is_dimension() {
            Color::DARK_GREEN
        } else {
            Color::BLACK
        };

        Self {
            id: EntityId::new(),
            name: geometry.type_name().to_string(),
            color,
            thickness: 1.0,
            visible: true,
            selected: false,
            geometry,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// 获取类型名称
    pub fn type_name(&self) -> &'static str {
        self.geometry.type_name()
    }

    /// 绘制使用的笔触：选中时为高亮色并加倍线宽
    pub fn stroke(&self) -> Stroke {
        if self.selected {
            Stroke::new(Color::HIGHLIGHT, self.thickness * 2.0).highlighted()
        } else {
            Stroke::new(self.color, self.thickness)
        }
    }

    /// 绘制实体，不可见时跳过
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if !self.visible {
            return;
        }
        self.geometry.draw(renderer, self.stroke());
    }

    /// 包围盒，不可见或几何为空时为 `None`
    pub fn bounding_box(&self) -> Option<BoundingBox2> {
        if !self.visible {
            return None;
        }
        let bbox = self.geometry.bounding_box();
        (!bbox.is_empty()).then_some(bbox)
    }

    /// 拾取测试，不可见实体永不命中
    pub fn hit_test(&self, point: &Point2, tolerance: f64) -> bool {
        self.visible && self.geometry.hit_test(point, tolerance)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.geometry.translate(dx, dy);
    }

    /// 绕 `center` 旋转（弧度）
    pub fn rotate(&mut self, center: &Point2, angle: f64) {
        self.geometry.rotate(center, angle);
    }

    pub fn scale(&mut self, center: &Point2, sx: f64, sy: f64) {
        self.geometry.scale(center, sx, sy);
    }

    pub fn is_dimension(&self) -> bool {
        self.geometry.is_dimension()
    }

    pub fn as_dimension(&self) -> Option<&dyn Dimension> {
        self.geometry.as_dimension()
    }

    pub fn as_dimension_mut(&mut self) -> Option<&mut dyn Dimension> {
        self.geometry.as_dimension_mut()
    }
}
