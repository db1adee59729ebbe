//! 角度标注
//!
//! 依次指定顶点、第一条边上的点、第二条边上的点，最后一次点击到顶点的距离作为圆弧半径。

use crate::tool::{draw_guide, draw_marker, Tool, ToolResult};
use simplecad_core::dimension::AngularDimension;
use simplecad_core::drawing::Drawing;
use simplecad_core::entity::Entity;
use simplecad_core::input::PointerEvent;
use simplecad_core::math::{angle_between, distance, normalize_signed_radians, Point2};
use simplecad_core::properties::Color;
use simplecad_core::render::Renderer;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    WaitingForCenter,
    WaitingForFirstPoint {
        center: Point2,
    },
    WaitingForSecondPoint {
        center: Point2,
        p1: Point2,
    },
    WaitingForArcPosition {
        center: Point2,
        p1: Point2,
        p2: Point2,
    },
}

pub struct AngularDimensionTool {
    status: Status,
    cursor: Option<Point2>,
}

impl AngularDimensionTool {
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

impl Default for AngularDimensionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for AngularDimensionTool {
    fn name(&self) -> &'static str {
        "AngularDimension"
    }

    fn is_active(&self) -> bool {
        !matches!(self.status, Status::WaitingForCenter)
    }

    fn prompt(&self) -> &'static str {
        match self.status {
            Status::WaitingForCenter => "指定角顶点",
            Status::WaitingForFirstPoint { .. } => "指定第一条边上的点",
            Status::WaitingForSecondPoint { .. } => "指定第二条边上的点",
            Status::WaitingForArcPosition { .. } => "指定圆弧位置",
        }
    }

    fn on_pointer_down(&mut self, _drawing: &mut Drawing, event: &PointerEvent) -> ToolResult {
        let point = event.effective_point();
        match self.status {
            Status::WaitingForCenter => {
                self.status = Status::WaitingForFirstPoint { center: point };
                self.cursor = Some(point);
                ToolResult::Continue
            }
            Status::WaitingForFirstPoint { center } => {
                self.status = Status::WaitingForSecondPoint { center, p1: point };
                ToolResult::Continue
            }
            Status::WaitingForSecondPoint { center, p1 } => {
                self.status = Status::WaitingForArcPosition {
                    center,
                    p1,
                    p2: point,
                };
                ToolResult::Continue
            }
            Status::WaitingForArcPosition { center, p1, p2 } => {
                self.reset();
                let dimension = AngularDimension::new(center, p1, p2, distance(&center, &point));
                debug!(
                    "Angular dimension completed: {:.2}°",
                    dimension.angle_degrees()
                );
                ToolResult::Completed(Entity::new(dimension))
            }
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) {
        self.cursor = Some(event.effective_point());
    }

    fn draw_preview(&self, renderer: &mut dyn Renderer) {
        let (center, p1, p2) = match self.status {
            Status::WaitingForCenter => return,
            Status::WaitingForFirstPoint { center } => (center, None, None),
            Status::WaitingForSecondPoint { center, p1 } => (center, Some(p1), None),
            Status::WaitingForArcPosition { center, p1, p2 } => (center, Some(p1), Some(p2)),
        };

        draw_marker(renderer, center, Color::RED);
        for p in [p1, p2].into_iter().flatten() {
            draw_marker(renderer, p, Color::RED);
            draw_guide(renderer, center, p, Color::LIGHT_GRAY);
        }

        let Some(cursor) = self.cursor else {
            return;
        };
        draw_marker(renderer, cursor, Color::BLUE);

        match (p1, p2) {
            (Some(p1), Some(p2)) => {
                let a1 = angle_between(&center, &p1);
                let sweep = normalize_signed_radians(angle_between(&center, &p2) - a1);
                renderer.draw_arc(
                    center,
                    distance(&center, &cursor),
                    a1.to_degrees(),
                    sweep.to_degrees(),
                    Color::GRAY,
                    1.0,
                );
            }
            _ => draw_guide(renderer, center, cursor, Color::GRAY),
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

    fn click(tool: &mut AngularDimensionTool, drawing: &mut Drawing, x: f64, y: f64) -> ToolResult {
        tool.on_pointer_down(drawing, &PointerEvent::at(x, y))
    }

    #[test]
    fn test_four_clicks_make_angular_dimension() {
        let mut tool = AngularDimensionTool::new();
        let mut drawing = Drawing::new();

        for (x, y) in [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)] {
            assert!(!click(&mut tool, &mut drawing, x, y).is_completed());
        }
        assert_eq!(tool.prompt(), "指定圆弧位置");

        let ToolResult::Completed(entity) = click(&mut tool, &mut drawing, 30.0, 40.0) else {
            panic!("dimension not completed");
        };
        assert_eq!(entity.color, Color::DARK_GREEN);
        let Geometry::AngularDimension(dim) = entity.geometry else {
            panic!("not an angular dimension");
        };
        assert_eq!(dim.arc_radius, 50.0);
        assert!((dim.angle_degrees() - 90.0).abs() < 1e-9);
        assert!(!tool.is_active());
    }

    #[test]
    fn test_preview_arc_uses_shortest_sweep() {
        let mut tool = AngularDimensionTool::new();
        let mut drawing = Drawing::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        click(&mut tool, &mut drawing, 0.0, -10.0);
        click(&mut tool, &mut drawing, 10.0, 0.0);
        tool.on_pointer_move(&PointerEvent::at(20.0, 0.0));

        let mut r = RecordingRenderer::new();
        tool.draw_preview(&mut r);
        let arc = r
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Arc {
                    radius,
                    start_deg,
                    sweep_deg,
                    ..
                } => Some((*radius, *start_deg, *sweep_deg)),
                _ => None,
            })
            .expect("arc preview");
        assert_eq!(arc.0, 20.0);
        assert!((arc.1 + 90.0).abs() < 1e-9);
        assert!((arc.2 - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_preview_guide_before_second_point() {
        let mut tool = AngularDimensionTool::new();
        let mut drawing = Drawing::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        tool.on_pointer_move(&PointerEvent::at(5.0, 5.0));

        let mut r = RecordingRenderer::new();
        tool.draw_preview(&mut r);
        assert_eq!(r.lines(), vec![(Point2::new(0.0, 0.0), Point2::new(5.0, 5.0))]);
    }
}
