//! 工具管理器
//!
//! 维护名称到工具的注册表和当前激活的工具，指针事件只转发给激活的工具。
//! 工具完成时产出 [`CompletionMessage`]，由调用方把实体加入图纸。

use std::collections::HashMap;

use crate::error::ToolError;
use crate::tool::{Tool, ToolResult};
use crate::tools::default_tools;
use simplecad_core::drawing::Drawing;
use simplecad_core::entity::Entity;
use simplecad_core::input::PointerEvent;
use simplecad_core::render::Renderer;
use tracing::{debug, info};

/// 曲线工具在注册表中的名称
pub const CURVE_TOOL: &str = "Curve";

/// 工具完成消息
#[derive(Debug, Clone)]
pub struct CompletionMessage {
    pub tool_name: &'static str,
    pub entity: Entity,
}

pub struct ToolManager {
    tools: HashMap<&'static str, Box<dyn Tool>>,
    /// 注册顺序
    order: Vec<&'static str>,
    active: Option<&'static str>,
}

impl ToolManager {
    /// 空的管理器
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
            active: None,
        }
    }

    /// 注册全部内置工具
    pub fn with_default_tools() -> Self {
        let mut manager = Self::new();
        for tool in default_tools() {
            manager.register(tool);
        }
        manager
    }

    /// 注册工具；同名工具会被替换
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name();
        if self.tools.insert(name, tool).is_none() {
            self.order.push(name);
        } else if self.active == Some(name) {
            self.active = None;
        }
        debug!("Registered tool {}", name);
    }

    /// 已注册的工具名称（注册顺序）
    pub fn tool_names(&self) -> &[&'static str] {
        &self.order
    }

    pub fn active_tool_name(&self) -> Option<&'static str> {
        self.active
    }

    pub fn active_tool(&self) -> Option<&dyn Tool> {
        self.active
            .and_then(|name| self.tools.get(name))
            .map(|tool| &**tool)
    }

    fn active_tool_mut(&mut self) -> Option<&mut Box<dyn Tool>> {
        let name = self.active?;
        self.tools.get_mut(name)
    }

    /// 激活工具，先取消之前激活的工具
    pub fn activate_tool(&mut self, name: &str) -> Result<(), ToolError> {
        let Some((&key, _)) = self.tools.get_key_value(name) else {
            return Err(ToolError::UnknownTool(name.to_string()));
        };

        if let Some(previous) = self.active_tool_mut() {
            previous.cancel();
        }
        self.active = Some(key);
        info!("Activated tool {}", key);
        Ok(())
    }

    /// 取消并清除当前工具
    pub fn deactivate_tool(&mut self) {
        if let Some(tool) = self.active_tool_mut() {
            tool.cancel();
        }
        if let Some(name) = self.active.take() {
            info!("Deactivated tool {}", name);
        }
    }

    /// 取消当前工具的未完成操作，工具保持激活
    pub fn cancel_current_tool(&mut self) {
        if let Some(tool) = self.active_tool_mut() {
            tool.cancel();
            debug!("Cancelled tool {}", tool.name());
        }
    }

    pub fn on_pointer_down(
        &mut self,
        drawing: &mut Drawing,
        event: &PointerEvent,
    ) -> Option<CompletionMessage> {
        let tool = self.active_tool_mut()?;
        let result = tool.on_pointer_down(drawing, event);
        Self::dispatch(tool.name(), result)
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        if let Some(tool) = self.active_tool_mut() {
            tool.on_pointer_move(event);
        }
    }

    pub fn on_pointer_up(
        &mut self,
        drawing: &mut Drawing,
        event: &PointerEvent,
    ) -> Option<CompletionMessage> {
        let tool = self.active_tool_mut()?;
        let result = tool.on_pointer_up(drawing, event);
        Self::dispatch(tool.name(), result)
    }

    /// 绘制当前工具的预览
    pub fn draw_preview(&self, renderer: &mut dyn Renderer) {
        if let Some(tool) = self.active_tool() {
            tool.draw_preview(renderer);
        }
    }

    /// 结束曲线输入
    pub fn complete_curve(&mut self) -> Result<Option<CompletionMessage>, ToolError> {
        let tool = self.curve_tool_mut()?;
        let result = tool.complete();
        Ok(Self::dispatch(CURVE_TOOL, result))
    }

    /// 撤销曲线的最后一个通过点
    pub fn undo_curve_point(&mut self) -> Result<(), ToolError> {
        self.curve_tool_mut()?.undo_point();
        Ok(())
    }

    fn curve_tool_mut(&mut self) -> Result<&mut Box<dyn Tool>, ToolError> {
        if self.active != Some(CURVE_TOOL) {
            return Err(ToolError::NotActive(CURVE_TOOL));
        }
        self.active_tool_mut()
            .ok_or(ToolError::NotActive(CURVE_TOOL))
    }

    fn dispatch(tool_name: &'static str, result: ToolResult) -> Option<CompletionMessage> {
        match result {
            ToolResult::Continue => None,
            ToolResult::Completed(entity) => {
                info!("{} created {}", tool_name, entity.type_name());
                Some(CompletionMessage { tool_name, entity })
            }
            ToolResult::Modified(ids) => {
                debug!("{} modified {} entities", tool_name, ids.len());
                None
            }
        }
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplecad_core::geometry::{Geometry, Line};
    use simplecad_core::math::Point2;
    use simplecad_core::render::RecordingRenderer;

    fn down(manager: &mut ToolManager, drawing: &mut Drawing, x: f64, y: f64) -> Option<CompletionMessage> {
        manager.on_pointer_down(drawing, &PointerEvent::at(x, y))
    }

    #[test]
    fn test_default_tools_registered_in_order() {
        let manager = ToolManager::with_default_tools();
        assert_eq!(
            manager.tool_names(),
            &[
                "Selection",
                "Line",
                "Arc",
                "Curve",
                "Move",
                "Rotate",
                "Scale",
                "LinearDimension",
                "RadialDimension",
                "AngularDimension",
            ]
        );
        assert!(manager.active_tool_name().is_none());
    }

    #[test]
    fn test_unknown_tool() {
        let mut manager = ToolManager::with_default_tools();
        assert_eq!(
            manager.activate_tool("Polygon"),
            Err(ToolError::UnknownTool("Polygon".to_string()))
        );
        assert!(manager.active_tool_name().is_none());
    }

    #[test]
    fn test_events_without_active_tool_are_ignored() {
        let mut manager = ToolManager::with_default_tools();
        let mut drawing = Drawing::new();
        assert!(down(&mut manager, &mut drawing, 0.0, 0.0).is_none());
        manager.on_pointer_move(&PointerEvent::at(1.0, 1.0));
        assert!(drawing.is_empty());
    }

    #[test]
    fn test_line_completion_message() {
        let mut manager = ToolManager::with_default_tools();
        let mut drawing = Drawing::new();
        manager.activate_tool("Line").unwrap();

        assert!(down(&mut manager, &mut drawing, 0.0, 0.0).is_none());
        let message = down(&mut manager, &mut drawing, 10.0, 10.0).expect("completion");
        assert_eq!(message.tool_name, "Line");
        let Geometry::Line(line) = &message.entity.geometry else {
            panic!("not a line");
        };
        assert_eq!(line.end, Point2::new(10.0, 10.0));
        assert!(!manager.active_tool().unwrap().is_active());
    }

    #[test]
    fn test_activate_cancels_previous_tool() {
        let mut manager = ToolManager::with_default_tools();
        let mut drawing = Drawing::new();
        manager.activate_tool("Line").unwrap();
        down(&mut manager, &mut drawing, 5.0, 5.0);
        assert!(manager.active_tool().unwrap().is_active());

        manager.activate_tool("Arc").unwrap();
        manager.activate_tool("Line").unwrap();
        assert!(!manager.active_tool().unwrap().is_active());

        // 原起点已丢弃，需要两次点击才能完成
        assert!(down(&mut manager, &mut drawing, 20.0, 0.0).is_none());
        assert!(down(&mut manager, &mut drawing, 30.0, 0.0).is_some());
    }

    #[test]
    fn test_deactivate_clears_active_tool() {
        let mut manager = ToolManager::with_default_tools();
        let mut drawing = Drawing::new();
        manager.activate_tool("Line").unwrap();
        down(&mut manager, &mut drawing, 5.0, 5.0);
        manager.deactivate_tool();
        assert!(manager.active_tool_name().is_none());

        manager.activate_tool("Line").unwrap();
        assert!(!manager.active_tool().unwrap().is_active());
    }

    #[test]
    fn test_modifications_do_not_emit_messages() {
        let mut manager = ToolManager::with_default_tools();
        let mut drawing = Drawing::new();
        let id = drawing.add(Entity::new(Line::new(Point2::origin(), Point2::new(10.0, 0.0))));
        drawing.get_mut(id).unwrap().selected = true;

        manager.activate_tool("Move").unwrap();
        assert!(down(&mut manager, &mut drawing, 0.0, 0.0).is_none());
        assert!(down(&mut manager, &mut drawing, 0.0, 5.0).is_none());
        let Geometry::Line(line) = &drawing.get(id).unwrap().geometry else {
            panic!("not a line");
        };
        assert_eq!(line.start, Point2::new(0.0, 5.0));
    }

    #[test]
    fn test_curve_passthroughs_require_active_curve() {
        let mut manager = ToolManager::with_default_tools();
        let mut drawing = Drawing::new();
        assert_eq!(
            manager.complete_curve().unwrap_err(),
            ToolError::NotActive(CURVE_TOOL)
        );

        manager.activate_tool("Line").unwrap();
        assert_eq!(manager.undo_curve_point(), Err(ToolError::NotActive(CURVE_TOOL)));

        manager.activate_tool("Curve").unwrap();
        for (x, y) in [(0.0, 0.0), (10.0, 10.0), (20.0, 0.0), (30.0, 10.0)] {
            assert!(down(&mut manager, &mut drawing, x, y).is_none());
        }
        manager.undo_curve_point().unwrap();

        let message = manager.complete_curve().unwrap().expect("curve");
        assert_eq!(message.tool_name, "Curve");
        let Geometry::Curve(curve) = &message.entity.geometry else {
            panic!("not a curve");
        };
        assert_eq!(curve.pass_points.len(), 3);
    }

    #[test]
    fn test_preview_comes_from_active_tool() {
        let mut manager = ToolManager::with_default_tools();
        let mut drawing = Drawing::new();
        let mut r = RecordingRenderer::new();
        manager.draw_preview(&mut r);
        assert!(r.commands().is_empty());

        manager.activate_tool("Line").unwrap();
        down(&mut manager, &mut drawing, 0.0, 0.0);
        manager.on_pointer_move(&PointerEvent::at(10.0, 0.0));
        manager.draw_preview(&mut r);
        assert_eq!(r.count("line"), 1);
    }
}
