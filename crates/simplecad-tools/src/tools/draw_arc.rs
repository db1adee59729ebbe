//! 绘制圆弧
//!
//! 依次指定圆心、起点、终点。半径取圆心到起点的距离，终点只决定终止角度。

use crate::tool::{draw_guide, draw_marker, Tool, ToolResult, CREATED_THICKNESS};
use simplecad_core::drawing::Drawing;
use simplecad_core::entity::Entity;
use simplecad_core::geometry::{Arc, Shape};
use simplecad_core::input::PointerEvent;
use simplecad_core::math::{distance, normalize_degrees, Point2};
use simplecad_core::properties::{Color, Stroke};
use simplecad_core::render::Renderer;
use tracing::debug;

/// 圆弧绘制状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 等待圆心
    WaitingForCenter,
    /// 等待起点
    WaitingForStart { center: Point2 },
    /// 等待终点
    WaitingForEnd { center: Point2, start: Point2 },
}

pub struct ArcTool {
    status: Status,
    cursor: Option<Point2>,
}

/// 圆心指向点的角度（度，[0, 360)）
fn angle_degrees(center: &Point2, point: &Point2) -> f64 {
    normalize_degrees((point.y - center.y).atan2(point.x - center.x).to_degrees())
}

fn build_arc(center: Point2, start: Point2, end: Point2) -> Arc {
    Arc::new(
        center,
        distance(&center, &start),
        angle_degrees(&center, &start),
        angle_degrees(&center, &end),
    )
}

impl ArcTool {
    pub fn new() -> Self {
        Self {
            status: Status::WaitingForCenter,
            cursor: None,
        }
    }

    fn reset(&mut self) {
        self.status = Status::WaitingForCenter;
        self.cursor = None;
    }
}

impl Default for ArcTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for ArcTool {
    fn name(&self) -> &'static str {
        "Arc"
    }

    fn is_active(&self) -> bool {
        !matches!(self.status, Status::WaitingForCenter)
    }

    fn prompt(&self) -> &'static str {
        match self.status {
            Status::WaitingForCenter => "指定圆心",
            Status::WaitingForStart { .. } => "指定起点",
            Status::WaitingForEnd { .. } => "指定终点",
        }
    }

    fn on_pointer_down(&mut self, _drawing: &mut Drawing, event: &PointerEvent) -> ToolResult {
        let point = event.effective_point();
        match self.status {
            Status::WaitingForCenter => {
                self.status = Status::WaitingForStart { center: point };
                ToolResult::Continue
            }
            Status::WaitingForStart { center } => {
                self.status = Status::WaitingForEnd {
                    center,
                    start: point,
                };
                self.cursor = Some(point);
                ToolResult::Continue
            }
            Status::WaitingForEnd { center, start } => {
                self.reset();
                let arc = build_arc(center, start, point);
                debug!(
                    "Arc completed: r={:.2}, {:.2}° -> {:.2}°",
                    arc.radius, arc.start_angle, arc.end_angle
                );
                ToolResult::Completed(Entity::new(arc).with_thickness(CREATED_THICKNESS))
            }
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) {
        self.cursor = Some(event.effective_point());
    }

    fn draw_preview(&self, renderer: &mut dyn Renderer) {
        match (self.status, self.cursor) {
            (Status::WaitingForStart { center }, cursor) => {
                draw_marker(renderer, center, Color::RED);
                if let Some(cursor) = cursor {
                    let radius = distance(&center, &cursor);
                    renderer.draw_circle(center, radius, Color::LIGHT_GRAY, 1.0);
                    draw_guide(renderer, center, cursor, Color::GRAY);
                }
            }
            (Status::WaitingForEnd { center, start }, Some(cursor)) => {
                draw_marker(renderer, center, Color::RED);
                build_arc(center, start, cursor).draw(renderer, Stroke::new(Color::GRAY, 1.0));
                draw_marker(renderer, start, Color::GREEN);
                draw_marker(renderer, cursor, Color::BLUE);
            }
            _ => {}
        }
    }

    fn cancel(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplecad_core::geometry::Geometry;
    use simplecad_core::render::{DrawCommand, RecordingRenderer};

    fn click(tool: &mut ArcTool, drawing: &mut Drawing, x: f64, y: f64) -> ToolResult {
        tool.on_pointer_down(drawing, &PointerEvent::at(x, y))
    }

    #[test]
    fn test_three_clicks_make_an_arc() {
        let mut tool = ArcTool::new();
        let mut drawing = Drawing::new();

        assert!(!click(&mut tool, &mut drawing, 0.0, 0.0).is_completed());
        assert!(!click(&mut tool, &mut drawing, 10.0, 0.0).is_completed());
        let result = click(&mut tool, &mut drawing, 0.0, -20.0);

        let ToolResult::Completed(entity) = result else {
            panic!("arc not completed");
        };
        let Geometry::Arc(arc) = entity.geometry else {
            panic!("not an arc");
        };
        assert!((arc.radius - 10.0).abs() < 1e-12);
        assert!(arc.start_angle.abs() < 1e-12);
        assert!((arc.end_angle - 270.0).abs() < 1e-9);
        assert_eq!(entity.thickness, 1.5);
        assert!(!tool.is_active());
    }

    #[test]
    fn test_preview_after_center_shows_circle() {
        let mut tool = ArcTool::new();
        let mut drawing = Drawing::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        tool.on_pointer_move(&PointerEvent::at(3.0, 4.0));

        let mut r = RecordingRenderer::new();
        tool.draw_preview(&mut r);
        assert!(r.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Circle { radius, color, .. } if (*radius - 5.0).abs() < 1e-12 && *color == Color::LIGHT_GRAY
        )));
    }

    #[test]
    fn test_preview_before_center_is_empty() {
        let mut tool = ArcTool::new();
        tool.on_pointer_move(&PointerEvent::at(3.0, 4.0));
        let mut r = RecordingRenderer::new();
        tool.draw_preview(&mut r);
        assert!(r.commands().is_empty());
        assert!(!tool.is_active());
    }

    #[test]
    fn test_preview_arc_while_waiting_for_end() {
        let mut tool = ArcTool::new();
        let mut drawing = Drawing::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        click(&mut tool, &mut drawing, 10.0, 0.0);
        tool.on_pointer_move(&PointerEvent::at(0.0, 10.0));

        let mut r = RecordingRenderer::new();
        tool.draw_preview(&mut r);
        assert_eq!(r.count("arc"), 1);
        assert_eq!(r.count("fill_circle"), 3);
    }
}
