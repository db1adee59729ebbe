//! 绘制插值曲线
//!
//! 每次点击追加一个通过点，由外部调用 [`Tool::complete`] 结束。

use crate::tool::{draw_guide, draw_marker, Tool, ToolResult, CREATED_THICKNESS};
use simplecad_core::drawing::Drawing;
use simplecad_core::entity::Entity;
use simplecad_core::geometry::{Curve, Shape};
use simplecad_core::input::PointerEvent;
use simplecad_core::math::Point2;
use simplecad_core::properties::{Color, Stroke};
use simplecad_core::render::Renderer;
use tracing::debug;

pub struct CurveTool {
    points: Vec<Point2>,
    cursor: Option<Point2>,
}

impl CurveTool {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            cursor: None,
        }
    }

    /// 已提交的通过点
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    fn reset(&mut self) {
        self.points.clear();
        self.cursor = None;
    }
}

impl Default for CurveTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for CurveTool {
    fn name(&self) -> &'static str {
        "Curve"
    }

    fn is_active(&self) -> bool {
        !self.points.is_empty()
    }

    fn prompt(&self) -> &'static str {
        if self.points.len() < 2 {
            "指定通过点"
        } else {
            "指定下一个通过点或完成"
        }
    }

    fn on_pointer_down(&mut self, _drawing: &mut Drawing, event: &PointerEvent) -> ToolResult {
        let point = event.effective_point();
        self.points.push(point);
        self.cursor = Some(point);
        ToolResult::Continue
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) {
        if self.is_active() {
            self.cursor = Some(event.effective_point());
        }
    }

    fn draw_preview(&self, renderer: &mut dyn Renderer) {
        let Some(last) = self.points.last().copied() else {
            return;
        };

        let last_index = self.points.len() - 1;
        for (i, p) in self.points.iter().enumerate() {
            let color = if i == 0 {
                Color::RED
            } else if i == last_index {
                Color::GREEN
            } else {
                Color::ORANGE
            };
            draw_marker(renderer, *p, color);
        }

        if let Some(cursor) = self.cursor {
            draw_guide(renderer, last, cursor, Color::GRAY);
            draw_marker(renderer, cursor, Color::BLUE);
        }

        if self.points.len() >= 3 {
            Curve::new(self.points.clone()).draw(renderer, Stroke::new(Color::BLACK, CREATED_THICKNESS));
        }

        for w in self.points.windows(2) {
            renderer.draw_line(w[0], w[1], Color::LIGHT_GRAY, 0.5);
        }
    }

    fn cancel(&mut self) {
        self.reset();
    }

    /// 至少两个通过点时产出曲线；无论是否产出都回到初始状态
    fn complete(&mut self) -> ToolResult {
        let points = std::mem::take(&mut self.points);
        self.cursor = None;

        if points.len() < 2 {
            debug!("Curve discarded with {} point(s)", points.len());
            return ToolResult::Continue;
        }

        debug!("Curve completed with {} points", points.len());
        ToolResult::Completed(Entity::new(Curve::new(points)).with_thickness(CREATED_THICKNESS))
    }

    fn undo_point(&mut self) {
        self.points.pop();
        if self.points.is_empty() {
            self.cursor = None;
        }
    }
}
