//! 半径标注：指定圆心和圆上一点

use crate::tool::{draw_guide, draw_marker, Tool, ToolResult};
use simplecad_core::dimension::RadialDimension;
use simplecad_core::drawing::Drawing;
use simplecad_core::entity::Entity;
use simplecad_core::input::PointerEvent;
use simplecad_core::math::{distance, Point2};
use simplecad_core::properties::Color;
use simplecad_core::render::Renderer;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    WaitingForCenter,
    WaitingForRadius { center: Point2 },
}

pub struct RadialDimensionTool {
    status: Status,
    cursor: Option<Point2>,
}

impl RadialDimensionTool {
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

impl Default for RadialDimensionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for RadialDimensionTool {
    fn name(&self) -> &'static str {
        "RadialDimension"
    }

    fn is_active(&self) -> bool {
        !matches!(self.status, Status::WaitingForCenter)
    }

    fn prompt(&self) -> &'static str {
        match self.status {
            Status::WaitingForCenter => "指定圆心",
            Status::WaitingForRadius { .. } => "指定圆上一点",
        }
    }

    fn on_pointer_down(&mut self, _drawing: &mut Drawing, event: &PointerEvent) -> ToolResult {
        let point = event.effective_point();
        match self.status {
            Status::WaitingForCenter => {
                self.status = Status::WaitingForRadius { center: point };
                self.cursor = Some(point);
                ToolResult::Continue
            }
            Status::WaitingForRadius { center } => {
                self.reset();
                let dimension = RadialDimension::new(center, point);
                debug!("Radial dimension completed: R={:.2}", dimension.radius());
                ToolResult::Completed(Entity::new(dimension))
            }
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) {
        self.cursor = Some(event.effective_point());
    }

    fn draw_preview(&self, renderer: &mut dyn Renderer) {
        let Status::WaitingForRadius { center } = self.status else {
            return;
        };
        draw_marker(renderer, center, Color::RED);
        if let Some(cursor) = self.cursor {
            draw_marker(renderer, cursor, Color::BLUE);
            renderer.draw_circle(center, distance(&center, &cursor), Color::GRAY, 1.0);
            draw_guide(renderer, center, cursor, Color::GRAY);
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

    #[test]
    fn test_two_clicks_make_radial_dimension() {
        let mut tool = RadialDimensionTool::new();
        let mut drawing = Drawing::new();
        tool.on_pointer_down(&mut drawing, &PointerEvent::at(0.0, 0.0));
        assert!(tool.is_active());
        let result = tool.on_pointer_down(&mut drawing, &PointerEvent::at(30.0, 40.0));

        let ToolResult::Completed(entity) = result else {
            panic!("dimension not completed");
        };
        assert_eq!(entity.thickness, 1.0);
        let Geometry::RadialDimension(dim) = entity.geometry else {
            panic!("not a radial dimension");
        };
        assert_eq!(dim.radius(), 50.0);
        assert!(!tool.is_active());
    }

    #[test]
    fn test_preview_circle_follows_cursor() {
        let mut tool = RadialDimensionTool::new();
        let mut drawing = Drawing::new();
        tool.on_pointer_down(&mut drawing, &PointerEvent::at(0.0, 0.0));
        tool.on_pointer_move(&PointerEvent::at(0.0, 12.0));

        let mut r = RecordingRenderer::new();
        tool.draw_preview(&mut r);
        assert_eq!(r.count("circle"), 1);
        assert_eq!(r.count("line"), 1);
        assert_eq!(r.count("fill_circle"), 2);
    }
}
