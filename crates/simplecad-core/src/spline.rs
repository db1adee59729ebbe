//! 插值样条
//!
//! 由一组通过点构造插值 B-样条（全局插值）：
//! - 阶数 `min(3, n - 1)`
//! - 弦长参数化
//! - 节点向量取参数的滑动平均
//! - 用 nalgebra 的 LU 分解求解控制点
//!
//! 曲线实体的渲染、包围盒和拾取都基于固定分辨率的采样折线。

use crate::math::{distance, Point2, EPSILON};
use nalgebra::DMatrix;

/// 曲线采样的细分数（采样点数为 `CURVE_SUBDIVISIONS + 1`）
pub const CURVE_SUBDIVISIONS: usize = 100;

/// 插值 B-样条
#[derive(Debug, Clone)]
pub struct InterpolatingSpline {
    degree: usize,
    knots: Vec<f64>,
    control_points: Vec<Point2>,
}

impl InterpolatingSpline {
    /// 构造穿过所有通过点的样条，少于2个点时返回 `None`
    ///
    /// 线性方程组奇异时（例如相邻通过点重合）退化为以通过点为控制点的一次样条，
    /// 即通过点折线。
    pub fn through(pass_points: &[Point2]) -> Option<Self> {
        let n = pass_points.len();
        if n < 2 {
            return None;
        }

        let degree = 3.min(n - 1);
        let params = chord_length_params(pass_points);
        let knots = averaged_knots(&params, degree);

        let mut basis = DMatrix::<f64>::zeros(n, n);
        for (row, &u) in params.iter().enumerate() {
            let span = find_span(n - 1, degree, u, &knots);
            let values = basis_functions(span, u, degree, &knots);
            for (i, value) in values.into_iter().enumerate() {
                basis[(row, span - degree + i)] = value;
            }
        }

        let rhs = DMatrix::<f64>::from_fn(n, 2, |row, col| {
            if col == 0 {
                pass_points[row].x
            } else {
                pass_points[row].y
            }
        });

        let solved = basis
            .lu()
            .solve(&rhs)
            .filter(|m| m.iter().all(|v| v.is_finite()));

        match solved {
            Some(m) => Some(Self {
                degree,
                knots,
                control_points: (0..n).map(|i| Point2::new(m[(i, 0)], m[(i, 1)])).collect(),
            }),
            None => Some(Self::polyline(pass_points)),
        }
    }

    /// 以通过点为控制点的一次样条
    fn polyline(points: &[Point2]) -> Self {
        let n = points.len();
        let mut knots = Vec::with_capacity(n + 2);
        knots.push(0.0);
        for i in 0..n {
            knots.push(i as f64 / (n - 1) as f64);
        }
        knots.push(1.0);

        Self {
            degree: 1,
            knots,
            control_points: points.to_vec(),
        }
    }

    /// 曲线阶数
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// 控制点
    pub fn control_points(&self) -> &[Point2] {
        &self.control_points
    }

    /// 计算参数 `u ∈ [0, 1]` 处的点
    pub fn point_at(&self, u: f64) -> Point2 {
        let u = u.clamp(0.0, 1.0);
        let last = self.control_points.len() - 1;
        let span = find_span(last, self.degree, u, &self.knots);
        let values = basis_functions(span, u, self.degree, &self.knots);

        let mut x = 0.0;
        let mut y = 0.0;
        for (i, value) in values.into_iter().enumerate() {
            let p = self.control_points[span - self.degree + i];
            x += p.x * value;
            y += p.y * value;
        }
        Point2::new(x, y)
    }

    /// 均匀采样，返回 `subdivisions + 1` 个点
    pub fn sample(&self, subdivisions: usize) -> Vec<Point2> {
        let subdivisions = subdivisions.max(1);
        (0..=subdivisions)
            .map(|i| self.point_at(i as f64 / subdivisions as f64))
            .collect()
    }
}

/// 对通过点采样，少于2个点时返回空
pub fn sample_through(pass_points: &[Point2], subdivisions: usize) -> Vec<Point2> {
    InterpolatingSpline::through(pass_points)
        .map(|spline| spline.sample(subdivisions))
        .unwrap_or_default()
}

fn chord_length_params(points: &[Point2]) -> Vec<f64> {
    let n = points.len();
    let total: f64 = points.windows(2).map(|w| distance(&w[0], &w[1])).sum();

    if total < EPSILON {
        return (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    }

    let mut params = Vec::with_capacity(n);
    let mut acc = 0.0;
    params.push(0.0);
    for w in points.windows(2) {
        acc += distance(&w[0], &w[1]);
        params.push(acc / total);
    }
    // 消除累加误差
    params[n - 1] = 1.0;
    params
}

fn averaged_knots(params: &[f64], degree: usize) -> Vec<f64> {
    let n = params.len();
    let mut knots = vec![0.0; n + degree + 1];
    for knot in knots.iter_mut().skip(n) {
        *knot = 1.0;
    }
    for j in 1..n - degree {
        let sum: f64 = params[j..j + degree].iter().sum();
        knots[j + degree] = sum / degree as f64;
    }
    knots
}

/// 查找 `u` 所在的节点区间，`last` 为最后一个控制点的下标
fn find_span(last: usize, degree: usize, u: f64, knots: &[f64]) -> usize {
    if u >= knots[last + 1] {
        return last;
    }
    if u <= knots[degree] {
        return degree;
    }

    let mut low = degree;
    let mut high = last + 1;
    let mut mid = (low + high) / 2;
    while u < knots[mid] || u >= knots[mid + 1] {
        if u < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Cox-de Boor 递推，返回区间内非零的 `degree + 1` 个基函数值
fn basis_functions(span: usize, u: f64, degree: usize, knots: &[f64]) -> Vec<f64> {
    let mut values = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    values[0] = 1.0;

    for j in 1..=degree {
        left[j] = u - knots[span + 1 - j];
        right[j] = knots[span + j] - u;
        let mut saved = 0.0;
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            let temp = if denom.abs() < EPSILON {
                0.0
            } else {
                values[r] / denom
            };
            values[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        values[j] = saved;
    }
    values
}
