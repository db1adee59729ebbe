//! 移动工具
//!
//! 指定基点和目标点，把选中的实体平移 `目标 - 基点`。
//! 只选中一个标注且基点落在其文字上时，只移动标注文字。

use crate::tool::{draw_guide, draw_marker, Tool, ToolResult};
use simplecad_core::drawing::Drawing;
use simplecad_core::entity::EntityId;
use simplecad_core::input::PointerEvent;
use simplecad_core::math::Point2;
use simplecad_core::properties::Color;
use simplecad_core::render::Renderer;
use tracing::{debug, info};

/// 判断是否点中标注文字的容差
pub const TEXT_HIT_TOLERANCE: f64 = 10.0;

/// 移动的对象
#[derive(Debug, Clone, PartialEq)]
enum Target {
    /// 平移所有选中实体
    Entities(Vec<EntityId>),
    /// 只移动该标注的文字
    DimensionText(EntityId),
}

#[derive(Debug, Clone, PartialEq)]
enum Status {
    /// 等待基点
    WaitingForBase,
    /// 等待目标点
    WaitingForDestination { base: Point2, target: Target },
}

pub struct MoveTool {
    status: Status,
    cursor: Option<Point2>,
}

impl MoveTool {
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

    /// 基点时刻的选择快照
    fn snapshot(drawing: &Drawing, base: &Point2) -> Option<Target> {
        let selected = drawing.selected_ids();
        if selected.is_empty() {
            return None;
        }

        if let [only] = selected.as_slice() {
            let on_text = drawing
                .get(*only)
                .and_then(|e| e.as_dimension())
                .is_some_and(|d| d.hit_test_text(base, TEXT_HIT_TOLERANCE));
            if on_text {
                return Some(Target::DimensionText(*only));
            }
        }

        Some(Target::Entities(selected))
    }
}

impl Default for MoveTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for MoveTool {
    fn name(&self) -> &'static str {
        "Move"
    }

    fn is_active(&self) -> bool {
        !matches!(self.status, Status::WaitingForBase)
    }

    fn prompt(&self) -> &'static str {
        match self.status {
            Status::WaitingForBase => "指定基点",
            Status::WaitingForDestination { .. } => "指定目标点",
        }
    }

    fn on_pointer_down(&mut self, drawing: &mut Drawing, event: &PointerEvent) -> ToolResult {
        let point = event.effective_point();
        match std::mem::replace(&mut self.status, Status::WaitingForBase) {
            Status::WaitingForBase => {
                let Some(target) = Self::snapshot(drawing, &point) else {
                    debug!("Move ignored: nothing selected");
                    return ToolResult::Continue;
                };
                self.status = Status::WaitingForDestination {
                    base: point,
                    target,
                };
                self.cursor = Some(point);
                ToolResult::Continue
            }
            Status::WaitingForDestination { base, target } => {
                self.reset();
                match target {
                    Target::DimensionText(id) => {
                        let Some(dim) = drawing.get_mut(id).and_then(|e| e.as_dimension_mut())
                        else {
                            return ToolResult::Continue;
                        };
                        dim.move_text_to(point);
                        info!("Moved dimension text of {}", id);
                        ToolResult::Modified(vec![id])
                    }
                    Target::Entities(ids) => {
                        let offset = point - base;
                        let mut moved = Vec::with_capacity(ids.len());
                        for id in ids {
                            if let Some(entity) = drawing.get_mut(id) {
                                entity.translate(offset.x, offset.y);
                                moved.push(id);
                            }
                        }
                        info!("Moved {} entities by ({}, {})", moved.len(), offset.x, offset.y);
                        ToolResult::Modified(moved)
                    }
                }
            }
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) {
        if self.is_active() {
            self.cursor = Some(event.effective_point());
        }
    }

    fn draw_preview(&self, renderer: &mut dyn Renderer) {
        if let (Status::WaitingForDestination { base, .. }, Some(cursor)) = (&self.status, self.cursor)
        {
            draw_guide(renderer, *base, cursor, Color::GRAY);
            draw_marker(renderer, *base, Color::RED);
            draw_marker(renderer, cursor, Color::BLUE);
        }
    }

    fn cancel(&mut self) {
        self.reset();
    }
}
