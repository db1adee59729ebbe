//! 缩放工具
//!
//! 依次指定基点、参考点、目标点，比例为 `|基点-目标| / |基点-参考|`，等比缩放。

use crate::tool::{draw_guide, draw_marker, Tool, ToolResult};
use simplecad_core::drawing::Drawing;
use simplecad_core::entity::EntityId;
use simplecad_core::input::PointerEvent;
use simplecad_core::math::{distance, Point2};
use simplecad_core::properties::Color;
use simplecad_core::render::Renderer;
use tracing::{debug, info, warn};

/// 参考距离小于该值时放弃缩放
pub const MIN_REFERENCE_DISTANCE: f64 = 0.001;

#[derive(Debug, Clone, PartialEq)]
enum Status {
    /// 等待基点
    WaitingForBase,
    /// 等待参考点
    WaitingForReference {
        base: Point2,
        targets: Vec<EntityId>,
    },
    /// 等待目标点
    WaitingForTarget {
        base: Point2,
        reference: Point2,
        targets: Vec<EntityId>,
    },
}

pub struct ScaleTool {
    status: Status,
    cursor: Option<Point2>,
}

impl ScaleTool {
    pub fn new() -> Self {
        Self {
            status: Status::WaitingForBase,
            cursor: None,
        }
    }

    fn reset(&mut self) {
        self.status = Status::WaitingForBase;
        self.cursor = None;
    }
}

impl Default for ScaleTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for ScaleTool {
    fn name(&self) -> &'static str {
        "Scale"
    }

    fn is_active(&self) -> bool {
        !matches!(self.status, Status::WaitingForBase)
    }

    fn prompt(&self) -> &'static str {
        match self.status {
            Status::WaitingForBase => "指定基点",
            Status::WaitingForReference { .. } => "指定参考点",
            Status::WaitingForTarget { .. } => "指定目标点",
        }
    }

    fn on_pointer_down(&mut self, drawing: &mut Drawing, event: &PointerEvent) -> ToolResult {
        let point = event.effective_point();
        match std::mem::replace(&mut self.status, Status::WaitingForBase) {
            Status::WaitingForBase => {
                let targets = drawing.selected_ids();
                if targets.is_empty() {
                    debug!("Scale ignored: nothing selected");
                    return ToolResult::Continue;
                }
                self.status = Status::WaitingForReference {
                    base: point,
                    targets,
                };
                self.cursor = Some(point);
                ToolResult::Continue
            }
            Status::WaitingForReference { base, targets } => {
                self.status = Status::WaitingForTarget {
                    base,
                    reference: point,
                    targets,
                };
                self.cursor = Some(point);
                ToolResult::Continue
            }
            Status::WaitingForTarget {
                base,
                reference,
                targets,
            } => {
                self.reset();
                let reference_distance = distance(&base, &reference);
                if reference_distance <= MIN_REFERENCE_DISTANCE {
                    warn!("Scale skipped: reference point coincides with base point");
                    return ToolResult::Continue;
                }

                let factor = distance(&base, &point) / reference_distance;
                let mut scaled = Vec::with_capacity(targets.len());
                for id in targets {
                    if let Some(entity) = drawing.get_mut(id) {
                        entity.scale(&base, factor, factor);
                        scaled.push(id);
                    }
                }
                info!("Scaled {} entities by {:.4}", scaled.len(), factor);
                ToolResult::Modified(scaled)
            }
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) {
        if self.is_active() {
            self.cursor = Some(event.effective_point());
        }
    }

    fn draw_preview(&self, renderer: &mut dyn Renderer) {
        match (&self.status, self.cursor) {
            (Status::WaitingForBase, _) => {}
            (Status::WaitingForReference { base, .. }, cursor) => {
                renderer.fill_circle(*base, 4.0, Color::RED);
                if let Some(cursor) = cursor {
                    draw_guide(renderer, *base, cursor, Color::GRAY);
                    draw_marker(renderer, cursor, Color::BLUE);
                }
            }
            (
                Status::WaitingForTarget {
                    base, reference, ..
                },
                cursor,
            ) => {
                renderer.fill_circle(*base, 4.0, Color::RED);
                draw_guide(renderer, *base, *reference, Color::GRAY);
                draw_marker(renderer, *reference, Color::GREEN);
                if let Some(cursor) = cursor {
                    draw_guide(renderer, *base, cursor, Color::BLUE);
                    draw_marker(renderer, cursor, Color::BLUE);
                }
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
    use simplecad_core::entity::Entity;
    use simplecad_core::geometry::{Arc, Geometry, Line};
    use simplecad_core::render::{DrawCommand, RecordingRenderer};

    fn click(tool: &mut ScaleTool, drawing: &mut Drawing, x: f64, y: f64) -> ToolResult {
        tool.on_pointer_down(drawing, &PointerEvent::at(x, y))
    }

    #[test]
    fn test_factor_is_distance_ratio() {
        let mut drawing = Drawing::new();
        let line = drawing.add(Entity::new(Line::new(
            Point2::new(1.0, 1.0),
            Point2::new(5.0, 3.0),
        )));
        let arc = drawing.add(Entity::new(Arc::new(Point2::new(10.0, 0.0), 4.0, 0.0, 90.0)));
        drawing.get_mut(line).unwrap().selected = true;
        drawing.get_mut(arc).unwrap().selected = true;

        let mut tool = ScaleTool::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        click(&mut tool, &mut drawing, 10.0, 0.0);
        let result = click(&mut tool, &mut drawing, 0.0, 20.0);
        assert!(matches!(result, ToolResult::Modified(ids) if ids.len() == 2));

        let Geometry::Line(l) = &drawing.get(line).unwrap().geometry else {
            panic!("not a line");
        };
        assert_eq!(l.start, Point2::new(2.0, 2.0));
        assert_eq!(l.end, Point2::new(10.0, 6.0));

        let Geometry::Arc(a) = &drawing.get(arc).unwrap().geometry else {
            panic!("not an arc");
        };
        assert_eq!(a.center, Point2::new(20.0, 0.0));
        assert_eq!(a.radius, 8.0);
    }

    #[test]
    fn test_degenerate_reference_is_ignored() {
        let mut drawing = Drawing::new();
        let id = drawing.add(Entity::new(Line::new(
            Point2::new(1.0, 1.0),
            Point2::new(5.0, 3.0),
        )));
        drawing.get_mut(id).unwrap().selected = true;

        let mut tool = ScaleTool::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        click(&mut tool, &mut drawing, 0.0, 0.0);
        assert!(matches!(
            click(&mut tool, &mut drawing, 10.0, 0.0),
            ToolResult::Continue
        ));
        assert!(!tool.is_active());

        let Geometry::Line(l) = &drawing.get(id).unwrap().geometry else {
            panic!("not a line");
        };
        assert_eq!(l.start, Point2::new(1.0, 1.0));
    }

    #[test]
    fn test_nothing_selected_does_not_advance() {
        let mut drawing = Drawing::new();
        let mut tool = ScaleTool::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        assert!(!tool.is_active());
        assert_eq!(tool.prompt(), "指定基点");
    }

    #[test]
    fn test_target_preview_uses_blue_guide() {
        let mut drawing = Drawing::new();
        let id = drawing.add(Entity::new(Line::new(Point2::origin(), Point2::new(1.0, 0.0))));
        drawing.get_mut(id).unwrap().selected = true;

        let mut tool = ScaleTool::new();
        click(&mut tool, &mut drawing, 0.0, 0.0);
        click(&mut tool, &mut drawing, 10.0, 0.0);
        tool.on_pointer_move(&PointerEvent::at(20.0, 0.0));

        let mut r = RecordingRenderer::new();
        tool.draw_preview(&mut r);
        assert!(r.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Line { p2, color, .. } if *p2 == Point2::new(20.0, 0.0) && *color == Color::BLUE
        )));
    }
}
