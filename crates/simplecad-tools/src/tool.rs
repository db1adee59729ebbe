//! 工具 trait
//!
//! 每个绘图/编辑工具都是一个由指针事件驱动的状态机：
//! - 按下：提交一个点并推进状态
//! - 移动：只更新预览用的当前点
//! - 抬起：本系统中的工具都不使用
//!
//! 绘图工具在最后一个点提交时产出新实体，编辑工具原地修改选中的实体。

use simplecad_core::drawing::Drawing;
use simplecad_core::entity::{Entity, EntityId};
use simplecad_core::input::PointerEvent;
use simplecad_core::math::Point2;
use simplecad_core::properties::Color;
use simplecad_core::render::Renderer;

/// 预览标记点的半径
pub const MARKER_RADIUS: f64 = 3.0;

/// 工具新建几何（线段、圆弧、曲线）的线宽
pub const CREATED_THICKNESS: f64 = 1.5;

/// 工具处理一次事件的结果
#[derive(Debug, Clone)]
pub enum ToolResult {
    /// 继续等待输入
    Continue,
    /// 完成并产出一个新实体
    Completed(Entity),
    /// 原地修改了这些实体
    Modified(Vec<EntityId>),
}

impl ToolResult {
    pub fn is_completed(&self) -> bool {
        matches!(self, ToolResult::Completed(_))
    }
}

pub trait Tool {
    /// 工具名称（注册表中的键）
    fn name(&self) -> &'static str;

    /// 是否处于操作中（已提交至少一个点）
    fn is_active(&self) -> bool;

    /// 当前步骤的提示
    fn prompt(&self) -> &'static str;

    fn on_pointer_down(&mut self, drawing: &mut Drawing, event: &PointerEvent) -> ToolResult;

    fn on_pointer_move(&mut self, event: &PointerEvent);

    fn on_pointer_up(&mut self, _drawing: &mut Drawing, _event: &PointerEvent) -> ToolResult {
        ToolResult::Continue
    }

    fn draw_preview(&self, renderer: &mut dyn Renderer);

    /// 回到初始状态，丢弃所有未完成的点
    fn cancel(&mut self);

    /// 外部触发的完成（非点击）
    fn complete(&mut self) -> ToolResult {
        ToolResult::Continue
    }

    /// 撤销最后一个点
    fn undo_point(&mut self) {}
}

/// 预览用的实心标记点
pub(crate) fn draw_marker(renderer: &mut dyn Renderer, point: Point2, color: Color) {
    renderer.fill_circle(point, MARKER_RADIUS, color);
}

/// 预览用的细灰线
pub(crate) fn draw_guide(renderer: &mut dyn Renderer, p1: Point2, p2: Point2, color: Color) {
    renderer.draw_line(p1, p2, color, 1.0);
}
