//! SimpleCAD 交互工具
//!
//! 绘图、编辑、标注工具都实现 [`Tool`] trait，由 [`ToolManager`] 统一调度。
//!
//! ```rust
//! use simplecad_core::prelude::*;
//! use simplecad_tools::ToolManager;
//!
//! let mut drawing = Drawing::new();
//! let mut manager = ToolManager::with_default_tools();
//! manager.activate_tool("Line").unwrap();
//!
//! manager.on_pointer_down(&mut drawing, &PointerEvent::at(0.0, 0.0));
//! if let Some(message) = manager.on_pointer_down(&mut drawing, &PointerEvent::at(10.0, 10.0)) {
//!     drawing.add(message.entity);
//! }
//! assert_eq!(drawing.len(), 1);
//! ```

pub mod error;
pub mod manager;
pub mod tool;
pub mod tools;

pub use error::ToolError;
pub use manager::{CompletionMessage, ToolManager};
pub use tool::{Tool, ToolResult};
