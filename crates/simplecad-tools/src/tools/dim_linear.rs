//! 线性标注
//!
//! 依次指定两个测量点和尺寸线位置。水平标注的偏移取点击点到两点平均 y 的距离，
//! 竖直标注取到平均 x 的距离。

use crate::tool::{draw_guide, draw_marker, Tool, ToolResult};
use simplecad_core::dimension::LinearDimension;
use simplecad_core::drawing::Drawing;
use simplecad_core::entity::Entity;
use simplecad_core::input::PointerEvent;
use simplecad_core::math::Point2;
use simplecad_core::properties::Color;
use simplecad_core::render::Renderer;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    WaitingForFirstPoint,
    WaitingForSecondPoint { p1: Point2 },
    WaitingForOffset { p1: Point2, p2: Point2 },
}

pub struct LinearDimensionTool {
    status: Status,
    cursor: Option<Point2>,
}

/// 由第三次点击计算尺寸线偏移
fn offset_from(p1: Point2, p2: Point2, click: Point2) -> f64 {
    let horizontal = (p2.x - p1.x).abs() > (p2.y - p1.y).abs();
    if horizontal {
        (click.y - (p1.y + p2.y) / 2.0).abs()
    } else {
        (click.x - (p1.x + p2.x) / 2.0).abs()
    }
}

impl LinearDimensionTool {
    pub fn new() -> Self {
        Self {
            status: Status::WaitingForFirstPoint,
            cursor: None,
        }
    }

    fn reset(&mut self) {
        self.status = Status::WaitingForFirstPoint;
        self.cursor = None;
    }
}

impl Default for LinearDimensionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for LinearDimensionTool {
    fn name(&self) -> &'static str {
        "LinearDimension"
    }

    fn is_active(&self) -> bool {
        !matches!(self.status, Status::WaitingForFirstPoint)
    }

    fn prompt(&self) -> &'static str {
        match self.status {
            Status::WaitingForFirstPoint => "指定第一个测量点",
            Status::WaitingForSecondPoint { .. } => "指定第二个测量点",
            Status::WaitingForOffset { .. } => "指定尺寸线位置",
        }
    }

    fn on_pointer_down(&mut self, _drawing: &mut Drawing, event: &PointerEvent) -> ToolResult {
        let point = event.effective_point();
        match self.status {
            Status::WaitingForFirstPoint => {
                self.status = Status::WaitingForSecondPoint { p1: point };
                self.cursor = Some(point);
                ToolResult::Continue
            }
            Status::WaitingForSecondPoint { p1 } => {
                self.status = Status::WaitingForOffset { p1, p2: point };
                ToolResult::Continue
            }
            Status::WaitingForOffset { p1, p2 } => {
                self.reset();
                let dimension = LinearDimension::new(p1, p2, offset_from(p1, p2, point));
                debug!(
                    "Linear dimension completed: length={:.2}, offset={:.2}",
                    dimension.measured_length(),
                    dimension.offset
                );
                ToolResult::Completed(Entity::new(dimension))
            }
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) {
        self.cursor = Some(event.effective_point());
    }

    fn draw_preview(&self, renderer: &mut dyn Renderer) {
        match self.status {
            Status::WaitingForFirstPoint => {}
            Status::WaitingForSecondPoint { p1 } => {
                draw_marker(renderer, p1, Color::RED);
                if let Some(cursor) = self.cursor {
                    draw_guide(renderer, p1, cursor, Color::GRAY);
                    draw_marker(renderer, cursor, Color::BLUE);
                }
            }
            Status::WaitingForOffset { p1, p2 } => {
                draw_marker(renderer, p1, Color::RED);
                draw_marker(renderer, p2, Color::RED);
                draw_guide(renderer, p1, p2, Color::LIGHT_GRAY);
                let Some(cursor) = self.cursor else {
                    return;
                };
                draw_marker(renderer, cursor, Color::BLUE);

                // 与完成后的标注相同的尺寸线位置
                let offset = offset_from(p1, p2, cursor);
                let (a, b) = if (p2.x - p1.x).abs() > (p2.y - p1.y).abs() {
                    let y = p1.y.min(p2.y) - offset;
                    (Point2::new(p1.x, y), Point2::new(p2.x, y))
                } else {
                    let x = p1.x.min(p2.x) - offset;
                    (Point2::new(x, p1.y), Point2::new(x, p2.y))
                };
                renderer.draw_line(p1, a, Color::GRAY, 0.5);
                renderer.draw_line(p2, b, Color::GRAY, 0.5);
                renderer.draw_line(a, b, Color::GRAY, 1.0);
            }
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
    use simplecad_core::render::RecordingRenderer;

    fn click(tool: &mut LinearDimensionTool, drawing: &mut Drawing, x: f64, y: f64) -> ToolResult {
        tool.on_pointer_down(drawing, &PointerEvent::at(x, y))
    }

    fn finish(points: [(f64, f64); 3]) -> LinearDimension {
        let mut tool = LinearDimensionTool::new();
        let mut drawing = Drawing::new();
        let mut result = ToolResult::Continue;
        for (x, y) in points {
            result = click(&mut tool, &mut drawing, x, y);
        }
        assert!(!tool.is_active());
        let ToolResult::Completed(entity) = result else {
            panic!("dimension not completed");
        };
        assert_eq!(entity.color, Color::DARK_GREEN);
        let Geometry::LinearDimension(dim) = entity.geometry else {
            panic!("not a linear dimension");
        };
        dim
    }

    #[test]
    fn test_horizontal_offset_from_average_y() {
        let dim = finish([(0.0, 0.0), (100.0, 10.0), (50.0, -25.0)]);
        assert_eq!(dim.point1, Point2::new(0.0, 0.0));
        assert_eq!(dim.point2, Point2::new(100.0, 10.0));
        assert_eq!(dim.offset, 30.0);
    }

    #[test]
    fn test_vertical_offset_from_average_x() {
        let dim = finish([(0.0, 0.0), (10.0, 100.0), (45.0, 50.0)]);
        assert_eq!(dim.offset, 40.0);
    }

    #[test]
    fn test_preview_shows_dimension_line() {
        let mut tool = LinearDimensionTool::new();
        let mut drawing = Drawing::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        click(&mut tool, &mut drawing, 100.0, 0.0);
        tool.on_pointer_move(&PointerEvent::at(50.0, -20.0));

        let mut r = RecordingRenderer::new();
        tool.draw_preview(&mut r);
        assert!(r
            .lines()
            .contains(&(Point2::new(0.0, -20.0), Point2::new(100.0, -20.0))));
        assert_eq!(r.count("fill_circle"), 3);
    }

    #[test]
    fn test_cancel_resets_prompt() {
        let mut tool = LinearDimensionTool::new();
        let mut drawing = Drawing::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        assert_eq!(tool.prompt(), "指定第二个测量点");
        tool.cancel();
        assert_eq!(tool.prompt(), "指定第一个测量点");
    }
}
