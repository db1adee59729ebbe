//! 指针输入
//!
//! 平台层把每次指针事件转换成世界坐标，并附带当前的捕捉设置。

use crate::math::Point2;
use crate::snap::snap_point;
use serde::{Deserialize, Serialize};

/// 一次指针事件
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// 世界坐标
    pub point: Point2,
    pub snap_enabled: bool,
    pub grid_spacing: f64,
}

impl PointerEvent {
    pub fn new(point: Point2, snap_enabled: bool, grid_spacing: f64) -> Self {
        Self {
            point,
            snap_enabled,
            grid_spacing,
        }
    }

    /// 不带捕捉的事件
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Point2::new(x, y), false, 0.0)
    }

    /// 工具实际使用的点：开启捕捉时取整到栅格
    pub fn effective_point(&self) -> Point2 {
        if self.snap_enabled {
            snap_point(&self.point, self.grid_spacing)
        } else {
            self.point
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_point() {
        let ev = PointerEvent::new(Point2::new(12.0, 17.0), true, 10.0);
        assert_eq!(ev.effective_point(), Point2::new(10.0, 20.0));

        let raw = PointerEvent::new(Point2::new(12.0, 17.0), false, 10.0);
        assert_eq!(raw.effective_point(), Point2::new(12.0, 17.0));
        assert_eq!(PointerEvent::at(1.5, 2.5).effective_point(), Point2::new(1.5, 2.5));
    }
}
