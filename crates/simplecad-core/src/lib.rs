//! SimpleCAD 核心库
//!
//! 提供2D几何图元、实体模型、标注、渲染契约以及选择/捕捉服务。
//! 核心库不依赖任何图形平台，所有绘制都通过 [`render::Renderer`] 完成。
//!
//! # 架构设计
//!
//! - `Entity`: 标识符 + 通用属性（颜色、线宽、可见、选中）
//! - `Geometry`: 几何数据（线段、圆弧、曲线、标注）
//! - `Drawing`: 有序实体集合
//!
//! # 示例
//!
//! ```rust
//! use simplecad_core::prelude::*;
//!
//! let mut drawing = Drawing::new();
//! drawing.add(Entity::new(Line::new(Point2::origin(), Point2::new(100.0, 50.0))));
//!
//! let mut renderer = RecordingRenderer::new();
//! drawing.draw(&mut renderer);
//! assert_eq!(renderer.count("line"), 1);
//! ```

pub mod dimension;
pub mod drawing;
pub mod entity;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod math;
pub mod properties;
pub mod render;
pub mod selection;
pub mod settings;
pub mod snap;
pub mod spline;
pub mod transform;
pub mod view;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::dimension::{
        AngularDimension, Dimension, DimensionStyle, LinearDimension, RadialDimension,
    };
    pub use crate::drawing::Drawing;
    pub use crate::entity::{Entity, EntityId, DEFAULT_HIT_TOLERANCE};
    pub use crate::geometry::{Arc, Curve, Geometry, Line, Shape};
    pub use crate::input::PointerEvent;
    pub use crate::math::{BoundingBox2, Point2, Vector2};
    pub use crate::properties::{Color, Stroke};
    pub use crate::render::{DrawCommand, RecordingRenderer, Renderer};
    pub use crate::settings::EditorSettings;
    pub use crate::transform::Transform2D;
}
