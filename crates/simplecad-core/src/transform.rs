//! 2D仿射变换
//!
//! 渲染契约中 `push_transform` 使用的矩阵类型。变换之间通过矩阵乘法组合，
//! 而不是相互替换。

use crate::math::{Matrix3, Point2};
use serde::{Deserialize, Serialize};

/// 2D仿射变换
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    matrix: Matrix3,
}

impl Transform2D {
    /// 创建单位变换
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// 创建平移变换
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            matrix: Matrix3::new(
                1.0, 0.0, dx,
                0.0, 1.0, dy,
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// 创建旋转变换（绕原点，弧度）
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            matrix: Matrix3::new(
                cos, -sin, 0.0,
                sin, cos, 0.0,
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// 创建绕指定点的旋转变换
    pub fn rotation_around(center: Point2, angle: f64) -> Self {
        Self::translation(center.x, center.y)
            .then(&Self::rotation(angle))
            .then(&Self::translation(-center.x, -center.y))
    }

    /// 创建缩放变换（绕原点）
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            matrix: Matrix3::new(
                sx, 0.0, 0.0,
                0.0, sy, 0.0,
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// 创建绕指定点的缩放变换
    pub fn scale_around(center: Point2, sx: f64, sy: f64) -> Self {
        Self::translation(center.x, center.y)
            .then(&Self::scale(sx, sy))
            .then(&Self::translation(-center.x, -center.y))
    }

    /// 组合两个变换（self 在后，other 在前）
    pub fn then(&self, other: &Transform2D) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// 变换一个点
    pub fn transform_point(&self, point: &Point2) -> Point2 {
        let v = self.matrix * nalgebra::Vector3::new(point.x, point.y, 1.0);
        Point2::new(v.x, v.y)
    }

    /// 获取逆变换
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|m| Self { matrix: m })
    }

    /// 获取变换矩阵
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform2D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_translation() {
        let t = Transform2D::translation(10.0, 20.0);
        let result = t.transform_point(&Point2::new(5.0, 5.0));

        assert!(approx_eq(result.x, 15.0));
        assert!(approx_eq(result.y, 25.0));
    }

    #[test]
    fn test_rotation_around() {
        let t = Transform2D::rotation_around(Point2::new(10.0, 0.0), std::f64::consts::PI);
        let result = t.transform_point(&Point2::new(12.0, 0.0));

        assert!((result.x - 8.0).abs() < 1e-12);
        assert!(result.y.abs() < 1e-12);
    }

    #[test]
    fn test_scale_around() {
        let t = Transform2D::scale_around(Point2::new(1.0, 1.0), 2.0, 3.0);
        let result = t.transform_point(&Point2::new(2.0, 2.0));

        assert!(approx_eq(result.x, 3.0));
        assert!(approx_eq(result.y, 4.0));
    }

    #[test]
    fn test_inverse() {
        let t = Transform2D::translation(10.0, 20.0)
            .then(&Transform2D::rotation(0.5))
            .then(&Transform2D::scale(2.0, 3.0));

        let inv = t.inverse().unwrap();
        let p = Point2::new(100.0, 200.0);
        let restored = inv.transform_point(&t.transform_point(&p));

        assert!((restored.x - p.x).abs() < 1e-9);
        assert!((restored.y - p.y).abs() < 1e-9);
    }
}
