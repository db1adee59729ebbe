//! 编辑器设置
//!
//! 从 JSON 加载，缺省字段使用默认值。

use crate::input::PointerEvent;
use crate::math::{Point2, Vector2};
use crate::snap::SnapService;
use crate::view::{ViewTransform, MAX_ZOOM, MIN_ZOOM};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid grid spacing: {0}")]
    InvalidGridSpacing(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub grid_visible: bool,
    pub snap_to_grid: bool,
    pub grid_spacing: f64,
    pub zoom_level: f64,
    pub view_center: Vector2,
    /// 实体拾取容差
    pub hit_tolerance: f64,
    /// 选择工具的拾取容差
    pub selection_tolerance: f64,
    /// 选择服务包围盒扩展半径
    pub selection_hit_radius: f64,
    /// 是否显示曲线通过点
    pub show_pass_points: bool,
    pub read_only: bool,
    /// 日志级别（trace/debug/info/warn/error）
    pub log_level: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_visible: true,
            snap_to_grid: true,
            grid_spacing: 10.0,
            zoom_level: 1.0,
            view_center: Vector2::zeros(),
            hit_tolerance: 5.0,
            selection_tolerance: 10.0,
            selection_hit_radius: 8.0,
            show_pass_points: true,
            read_only: false,
            log_level: "info".to_string(),
        }
    }
}

impl EditorSettings {
    /// 解析 JSON 并校验
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: EditorSettings = serde_json::from_str(json)?;
        settings.validate()?;
        settings.zoom_level = settings.zoom_level.clamp(MIN_ZOOM, MAX_ZOOM);
        Ok(settings)
    }

    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.grid_spacing.is_finite() || self.grid_spacing <= 0.0 {
            return Err(SettingsError::InvalidGridSpacing(self.grid_spacing));
        }
        Ok(())
    }

    /// 构造携带当前捕捉设置的指针事件
    pub fn pointer(&self, point: Point2) -> PointerEvent {
        PointerEvent::new(point, self.snap_to_grid, self.grid_spacing)
    }

    pub fn snap_service(&self) -> SnapService {
        SnapService::new(self.grid_spacing, self.snap_to_grid)
    }

    /// 按设置初始化视图
    pub fn view(&self, viewport_width: f64, viewport_height: f64) -> ViewTransform {
        let mut view = ViewTransform::new(viewport_width, viewport_height);
        view.set_zoom(self.zoom_level);
        view.view_center = self.view_center;
        view
    }
}
