//! 绘制线段

use crate::tool::{draw_guide, draw_marker, Tool, ToolResult, CREATED_THICKNESS};
use simplecad_core::drawing::Drawing;
use simplecad_core::entity::Entity;
use simplecad_core::geometry::Line;
use simplecad_core::input::PointerEvent;
use simplecad_core::math::Point2;
use simplecad_core::properties::Color;
use simplecad_core::render::Renderer;
use tracing::debug;

/// 线段绘制状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 等待起点
    Idle,
    /// 已有起点，等待终点
    HaveStart { start: Point2 },
}

pub struct LineTool {
    status: Status,
    cursor: Option<Point2>,
}

impl LineTool {
    pub fn new() -> Self {
        Self {
            status: Status::Idle,
            cursor: None,
        }
    }

    fn reset(&mut self) {
        self.status = Status::Idle;
        self.cursor = None;
    }
}

impl Default for LineTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for LineTool {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn is_active(&self) -> bool {
        !matches!(self.status, Status::Idle)
    }

    fn prompt(&self) -> &'static str {
        match self.status {
            Status::Idle => "指定起点",
            Status::HaveStart { .. } => "指定终点",
        }
    }

    fn on_pointer_down(&mut self, _drawing: &mut Drawing, event: &PointerEvent) -> ToolResult {
        let point = event.effective_point();
        match self.status {
            Status::Idle => {
                self.status = Status::HaveStart { start: point };
                self.cursor = Some(point);
                ToolResult::Continue
            }
            Status::HaveStart { start } => {
                self.reset();
                debug!("Line completed: ({}, {}) -> ({}, {})", start.x, start.y, point.x, point.y);
                let entity = Entity::new(Line::new(start, point)).with_thickness(CREATED_THICKNESS);
                ToolResult::Completed(entity)
            }
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) {
        if self.is_active() {
            self.cursor = Some(event.effective_point());
        }
    }

    fn draw_preview(&self, renderer: &mut dyn Renderer) {
        if let (Status::HaveStart { start }, Some(cursor)) = (self.status, self.cursor) {
            draw_guide(renderer, start, cursor, Color::GRAY);
            draw_marker(renderer, start, Color::RED);
            draw_marker(renderer, cursor, Color::BLUE);
        }
    }

    fn cancel(&mut self) {
        self.reset();
    }
}
