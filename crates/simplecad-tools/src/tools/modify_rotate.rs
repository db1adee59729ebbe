//! 旋转工具
//!
//! 依次指定旋转中心、基准点、目标点，旋转角为两条射线的夹角。

use crate::tool::{draw_guide, draw_marker, Tool, ToolResult};
use simplecad_core::drawing::Drawing;
use simplecad_core::entity::EntityId;
use simplecad_core::input::PointerEvent;
use simplecad_core::math::{angle_between, Point2};
use simplecad_core::properties::Color;
use simplecad_core::render::Renderer;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
enum Status {
    /// 等待旋转中心
    WaitingForCenter,
    /// 等待基准点
    WaitingForBase {
        center: Point2,
        targets: Vec<EntityId>,
    },
    /// 等待目标点
    WaitingForDestination {
        center: Point2,
        base: Point2,
        targets: Vec<EntityId>,
    },
}

pub struct RotateTool {
    status: Status,
    cursor: Option<Point2>,
}

impl RotateTool {
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

impl Default for RotateTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for RotateTool {
    fn name(&self) -> &'static str {
        "Rotate"
    }

    fn is_active(&self) -> bool {
        !matches!(self.status, Status::WaitingForCenter)
    }

    fn prompt(&self) -> &'static str {
        match self.status {
            Status::WaitingForCenter => "指定旋转中心",
            Status::WaitingForBase { .. } => "指定基准点",
            Status::WaitingForDestination { .. } => "指定目标点",
        }
    }

    fn on_pointer_down(&mut self, drawing: &mut Drawing, event: &PointerEvent) -> ToolResult {
        let point = event.effective_point();
        match std::mem::replace(&mut self.status, Status::WaitingForCenter) {
            Status::WaitingForCenter => {
                let targets = drawing.selected_ids();
                if targets.is_empty() {
                    debug!("Rotate ignored: nothing selected");
                    return ToolResult::Continue;
                }
                self.status = Status::WaitingForBase {
                    center: point,
                    targets,
                };
                self.cursor = Some(point);
                ToolResult::Continue
            }
            Status::WaitingForBase { center, targets } => {
                self.status = Status::WaitingForDestination {
                    center,
                    base: point,
                    targets,
                };
                self.cursor = Some(point);
                ToolResult::Continue
            }
            Status::WaitingForDestination {
                center,
                base,
                targets,
            } => {
                self.reset();
                let angle = angle_between(&center, &point) - angle_between(&center, &base);
                let mut rotated = Vec::with_capacity(targets.len());
                for id in targets {
                    if let Some(entity) = drawing.get_mut(id) {
                        entity.rotate(&center, angle);
                        rotated.push(id);
                    }
                }
                info!(
                    "Rotated {} entities by {:.2}°",
                    rotated.len(),
                    angle.to_degrees()
                );
                ToolResult::Modified(rotated)
            }
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) {
        if self.is_active() {
            self.cursor = Some(event.effective_point());
        }
    }

    fn draw_preview(&self, renderer: &mut dyn Renderer) {
        let center = match &self.status {
            Status::WaitingForCenter => return,
            Status::WaitingForBase { center, .. } => *center,
            Status::WaitingForDestination { center, .. } => *center,
        };
        renderer.fill_circle(center, 4.0, Color::RED);

        let Some(cursor) = self.cursor else {
            return;
        };
        if let Status::WaitingForDestination { base, .. } = &self.status {
            draw_guide(renderer, center, *base, Color::GRAY);
            draw_marker(renderer, *base, Color::GREEN);
        }
        draw_guide(renderer, center, cursor, Color::GRAY);
        draw_marker(renderer, cursor, Color::BLUE);
    }

    fn cancel(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplecad_core::entity::Entity;
    use simplecad_core::geometry::{Geometry, Line};
    use simplecad_core::math::points_approx_eq;
    use simplecad_core::render::RecordingRenderer;

    fn click(tool: &mut RotateTool, drawing: &mut Drawing, x: f64, y: f64) -> ToolResult {
        tool.on_pointer_down(drawing, &PointerEvent::at(x, y))
    }

    fn selected_line(drawing: &mut Drawing) -> EntityId {
        let id = drawing.add(Entity::new(Line::new(
            Point2::new(10.0, 0.0),
            Point2::new(20.0, 0.0),
        )));
        drawing.get_mut(id).unwrap().selected = true;
        id
    }

    #[test]
    fn test_nothing_selected_does_not_advance() {
        let mut drawing = Drawing::new();
        let mut tool = RotateTool::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        assert!(!tool.is_active());
    }

    #[test]
    fn test_rotates_by_angle_between_rays() {
        let mut drawing = Drawing::new();
        let id = selected_line(&mut drawing);
        let mut tool = RotateTool::new();

        click(&mut tool, &mut drawing, 0.0, 0.0);
        click(&mut tool, &mut drawing, 5.0, 0.0);
        let result = click(&mut tool, &mut drawing, 0.0, 7.0);
        assert!(matches!(result, ToolResult::Modified(ids) if ids == vec![id]));

        let Geometry::Line(line) = &drawing.get(id).unwrap().geometry else {
            panic!("not a line");
        };
        assert!(points_approx_eq(&line.start, &Point2::new(0.0, 10.0)));
        assert!(points_approx_eq(&line.end, &Point2::new(0.0, 20.0)));
        assert!(!tool.is_active());
    }

    #[test]
    fn test_preview_while_waiting_for_destination() {
        let mut drawing = Drawing::new();
        selected_line(&mut drawing);
        let mut tool = RotateTool::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        click(&mut tool, &mut drawing, 5.0, 0.0);
        tool.on_pointer_move(&PointerEvent::at(0.0, 5.0));

        let mut r = RecordingRenderer::new();
        tool.draw_preview(&mut r);
        // 中心 + 基准点 + 当前点
        assert_eq!(r.count("fill_circle"), 3);
        assert_eq!(r.count("line"), 2);
    }

    #[test]
    fn test_cancel_keeps_entities() {
        let mut drawing = Drawing::new();
        let id = selected_line(&mut drawing);
        let mut tool = RotateTool::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        click(&mut tool, &mut drawing, 5.0, 0.0);
        tool.cancel();
        assert!(!tool.is_active());

        let Geometry::Line(line) = &drawing.get(id).unwrap().geometry else {
            panic!("not a line");
        };
        assert_eq!(line.start, Point2::new(10.0, 0.0));
    }
}
