//! 选择工具
//!
//! 每次点击独立处理：命中的实体中取包围盒中心离点击点最近的一个，
//! 切换其选中状态并取消其余实体的选中；未命中时清空选择。

use crate::tool::{Tool, ToolResult};
use simplecad_core::drawing::Drawing;
use simplecad_core::entity::EntityId;
use simplecad_core::input::PointerEvent;
use simplecad_core::math::{distance, Point2};
use simplecad_core::render::Renderer;
use tracing::debug;

/// 选择工具的拾取容差
pub const SELECTION_TOLERANCE: f64 = 10.0;

pub struct SelectionTool {
    tolerance: f64,
    active: bool,
}

impl SelectionTool {
    pub fn new() -> Self {
        Self::with_tolerance(SELECTION_TOLERANCE)
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            active: false,
        }
    }

    fn pick(&self, drawing: &Drawing, point: &Point2) -> Option<EntityId> {
        let mut nearest = None;
        let mut min_distance = f64::MAX;

        for entity in drawing.iter() {
            if !entity.hit_test(point, self.tolerance) {
                continue;
            }
            let Some(bbox) = entity.bounding_box() else {
                continue;
            };
            let d = distance(point, &bbox.center());
            if d < min_distance {
                min_distance = d;
                nearest = Some(entity.id);
            }
        }

        nearest
    }
}

impl Default for SelectionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Selection"
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn prompt(&self) -> &'static str {
        "选择对象"
    }

    /// 使用原始点击点，不做栅格捕捉
    fn on_pointer_down(&mut self, drawing: &mut Drawing, event: &PointerEvent) -> ToolResult {
        self.active = true;
        let hit = self.pick(drawing, &event.point);

        let mut changed = Vec::new();
        for entity in drawing.iter_mut() {
            let selected = if Some(entity.id) == hit {
                !entity.selected
            } else {
                false
            };
            if entity.selected != selected {
                entity.selected = selected;
                changed.push(entity.id);
            }
        }

        match hit {
            Some(id) => debug!("Selection toggled {}", id),
            None => debug!("Selection cleared"),
        }

        if changed.is_empty() {
            ToolResult::Continue
        } else {
            ToolResult::Modified(changed)
        }
    }

    fn on_pointer_move(&mut self, _event: &PointerEvent) {}

    fn draw_preview(&self, _renderer: &mut dyn Renderer) {}

    fn cancel(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplecad_core::entity::Entity;
    use simplecad_core::geometry::Line;

    fn drawing() -> (Drawing, EntityId, EntityId) {
        let mut drawing = Drawing::new();
        let a = drawing.add(Entity::new(Line::new(
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
        )));
        let b = drawing.add(Entity::new(Line::new(
            Point2::new(0.0, 8.0),
            Point2::new(20.0, 8.0),
        )));
        (drawing, a, b)
    }

    fn click(tool: &mut SelectionTool, drawing: &mut Drawing, x: f64, y: f64) -> ToolResult {
        tool.on_pointer_down(drawing, &PointerEvent::at(x, y))
    }

    #[test]
    fn test_picks_nearest_bounds_center() {
        let (mut drawing, _a, b) = drawing();
        let mut tool = SelectionTool::new();

        // 两条线都在容差内，b 的包围盒中心更近
        click(&mut tool, &mut drawing, 10.0, 4.0);
        assert_eq!(drawing.selected_ids(), vec![b]);
    }

    #[test]
    fn test_click_toggles_and_clears_others() {
        let (mut drawing, a, b) = drawing();
        let mut tool = SelectionTool::new();

        click(&mut tool, &mut drawing, 10.0, 8.0);
        assert_eq!(drawing.selected_ids(), vec![b]);

        click(&mut tool, &mut drawing, 90.0, 0.0);
        assert_eq!(drawing.selected_ids(), vec![a]);

        let result = click(&mut tool, &mut drawing, 90.0, 0.0);
        assert!(drawing.selected_ids().is_empty());
        assert!(matches!(result, ToolResult::Modified(ids) if ids == vec![a]));
    }

    #[test]
    fn test_miss_clears_selection() {
        let (mut drawing, a, b) = drawing();
        let mut tool = SelectionTool::new();
        drawing.get_mut(a).unwrap().selected = true;
        drawing.get_mut(b).unwrap().selected = true;

        click(&mut tool, &mut drawing, 500.0, 500.0);
        assert!(drawing.selected_ids().is_empty());

        assert!(matches!(
            click(&mut tool, &mut drawing, 500.0, 500.0),
            ToolResult::Continue
        ));
    }

    #[test]
    fn test_invisible_entities_are_not_picked() {
        let (mut drawing, a, _b) = drawing();
        let mut tool = SelectionTool::new();
        drawing.get_mut(a).unwrap().visible = false;

        click(&mut tool, &mut drawing, 90.0, 0.0);
        assert!(drawing.selected_ids().is_empty());
    }
}
