//! 具体的工具实现
//!
//! 每个绘图/编辑/标注操作对应一个 Tool 实现

mod dim_angular;
mod dim_linear;
mod dim_radial;
mod draw_arc;
mod draw_curve;
mod draw_line;
mod modify_move;
mod modify_rotate;
mod modify_scale;
mod select;

pub use dim_angular::AngularDimensionTool;
pub use dim_linear::LinearDimensionTool;
pub use dim_radial::RadialDimensionTool;
pub use draw_arc::ArcTool;
pub use draw_curve::CurveTool;
pub use draw_line::LineTool;
pub use modify_move::{MoveTool, TEXT_HIT_TOLERANCE};
pub use modify_rotate::RotateTool;
pub use modify_scale::{ScaleTool, MIN_REFERENCE_DISTANCE};
pub use select::{SelectionTool, SELECTION_TOLERANCE};

use crate::tool::Tool;

/// 内置工具，按注册顺序排列
pub fn default_tools() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(SelectionTool::new()),
        Box::new(LineTool::new()),
        Box::new(ArcTool::new()),
        Box::new(CurveTool::new()),
        Box::new(MoveTool::new()),
        Box::new(RotateTool::new()),
        Box::new(ScaleTool::new()),
        Box::new(LinearDimensionTool::new()),
        Box::new(RadialDimensionTool::new()),
        Box::new(AngularDimensionTool::new()),
    ]
}
