//! 栅格捕捉
//!
//! 坐标在 x/y 方向上独立取整到栅格间距的整数倍。中点按"四舍六入五成双"处理，
//! 预览与提交使用同一函数，保证预览与最终结果一致。

use crate::math::{distance, Point2};
use serde::{Deserialize, Serialize};

/// 默认栅格间距
pub const DEFAULT_GRID_SPACING: f64 = 10.0;

/// 判断是否靠近栅格点的默认阈值
pub const DEFAULT_NEAR_THRESHOLD: f64 = 5.0;

/// 把点捕捉到栅格，间距非正时原样返回
pub fn snap_point(point: &Point2, spacing: f64) -> Point2 {
    if spacing <= 0.0 || !spacing.is_finite() {
        return *point;
    }
    Point2::new(
        (point.x / spacing).round_ties_even() * spacing,
        (point.y / spacing).round_ties_even() * spacing,
    )
}

/// 栅格捕捉服务
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapService {
    pub grid_spacing: f64,
    pub enabled: bool,
}

impl Default for SnapService {
    fn default() -> Self {
        Self {
            grid_spacing: DEFAULT_GRID_SPACING,
            enabled: true,
        }
    }
}

impl SnapService {
    pub fn new(grid_spacing: f64, enabled: bool) -> Self {
        Self {
            grid_spacing,
            enabled,
        }
    }

    /// 捕捉开启时取整到栅格
    pub fn snap_to_grid(&self, point: &Point2) -> Point2 {
        if !self.enabled {
            return *point;
        }
        snap_point(point, self.grid_spacing)
    }

    /// 最近的栅格点（不受开关影响）
    pub fn nearest_grid_point(&self, point: &Point2) -> Point2 {
        snap_point(point, self.grid_spacing)
    }

    pub fn is_near_grid_point(&self, point: &Point2, threshold: f64) -> bool {
        distance(point, &self.nearest_grid_point(point)) <= threshold
    }
}
