//! 渲染契约
//!
//! 所有绘制都通过 [`Renderer`] 完成，核心库不关心具体的像素绘制与字体光栅化。
//! 平台层实现该 trait；[`RecordingRenderer`] 记录所有调用，供测试与无界面宿主使用。
//!
//! 坐标均为世界坐标，角度均为度。

use crate::math::{BoundingBox2, Point2};
use crate::properties::Color;
use crate::transform::Transform2D;

/// 平台无关的绘制接口
pub trait Renderer {
    /// 绘制直线
    fn draw_line(&mut self, p1: Point2, p2: Point2, color: Color, thickness: f64);

    /// 绘制圆弧，`sweep_deg` 的符号表示旋转方向
    fn draw_arc(
        &mut self,
        center: Point2,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
        color: Color,
        thickness: f64,
    );

    /// 绘制三次贝塞尔曲线
    fn draw_bezier(
        &mut self,
        p1: Point2,
        p2: Point2,
        p3: Point2,
        p4: Point2,
        color: Color,
        thickness: f64,
    );

    /// 绘制连续折线
    fn draw_path(&mut self, points: &[Point2], color: Color, thickness: f64);

    fn draw_circle(&mut self, center: Point2, radius: f64, color: Color, thickness: f64);

    fn fill_circle(&mut self, center: Point2, radius: f64, color: Color);

    fn draw_rectangle(&mut self, rect: BoundingBox2, color: Color, thickness: f64);

    fn fill_rectangle(&mut self, rect: BoundingBox2, color: Color);

    /// 绘制文本，`position` 为文本框左上角
    fn draw_text(&mut self, text: &str, position: Point2, font_size: f64, color: Color);

    /// 测量文本宽度
    fn measure_text_width(&self, text: &str, font_size: f64) -> f64;

    /// 压入变换矩阵，与当前变换相乘
    fn push_transform(&mut self, transform: Transform2D);

    /// 弹出最近一次压入的变换
    fn pop_transform(&mut self);
}

/// 不依赖字体的文本宽度估算：每个字符宽度为字号的0.6倍
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    font_size * 0.6 * text.chars().count() as f64
}

/// 记录下来的一次绘制调用
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        p1: Point2,
        p2: Point2,
        color: Color,
        thickness: f64,
    },
    Arc {
        center: Point2,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
        color: Color,
        thickness: f64,
    },
    Bezier {
        points: [Point2; 4],
        color: Color,
        thickness: f64,
    },
    Path {
        points: Vec<Point2>,
        color: Color,
        thickness: f64,
    },
    Circle {
        center: Point2,
        radius: f64,
        color: Color,
        thickness: f64,
    },
    FillCircle {
        center: Point2,
        radius: f64,
        color: Color,
    },
    Rectangle {
        rect: BoundingBox2,
        color: Color,
        thickness: f64,
    },
    FillRectangle {
        rect: BoundingBox2,
        color: Color,
    },
    Text {
        text: String,
        position: Point2,
        font_size: f64,
        color: Color,
    },
    PushTransform(Transform2D),
    PopTransform,
}

impl DrawCommand {
    /// 命令类型名称（用于日志输出）
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Line { .. } => "line",
            DrawCommand::Arc { .. } => "arc",
            DrawCommand::Bezier { .. } => "bezier",
            DrawCommand::Path { .. } => "path",
            DrawCommand::Circle { .. } => "circle",
            DrawCommand::FillCircle { .. } => "fill_circle",
            DrawCommand::Rectangle { .. } => "rectangle",
            DrawCommand::FillRectangle { .. } => "fill_rectangle",
            DrawCommand::Text { .. } => "text",
            DrawCommand::PushTransform(_) => "push_transform",
            DrawCommand::PopTransform => "pop_transform",
        }
    }
}

/// 记录所有调用的渲染器
///
/// 维护变换栈：每次压入时 `current = current * pushed`，弹出时恢复。
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    stack: Vec<Transform2D>,
    current: Transform2D,
    unbalanced_pops: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录的命令
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// 取出并清空已记录的命令（开始新的一帧）
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// 当前组合后的变换
    pub fn current_transform(&self) -> Transform2D {
        self.current
    }

    /// 变换栈深度
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// 每次压入都已弹出，且没有多余的弹出
    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty() && self.unbalanced_pops == 0
    }

    /// 所有直线命令
    pub fn lines(&self) -> Vec<(Point2, Point2)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { p1, p2, .. } => Some((*p1, *p2)),
                _ => None,
            })
            .collect()
    }

    /// 所有文本命令的内容
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// 按类型统计命令数量
    pub fn count(&self, kind: &str) -> usize {
        self.commands.iter().filter(|c| c.kind() == kind).count()
    }
}

impl Renderer for RecordingRenderer {
    fn draw_line(&mut self, p1: Point2, p2: Point2, color: Color, thickness: f64) {
        self.commands.push(DrawCommand::Line {
            p1,
            p2,
            color,
            thickness,
        });
    }

    fn draw_arc(
        &mut self,
        center: Point2,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
        color: Color,
        thickness: f64,
    ) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_deg,
            sweep_deg,
            color,
            thickness,
        });
    }

    fn draw_bezier(
        &mut self,
        p1: Point2,
        p2: Point2,
        p3: Point2,
        p4: Point2,
        color: Color,
        thickness: f64,
    ) {
        self.commands.push(DrawCommand::Bezier {
            points: [p1, p2, p3, p4],
            color,
            thickness,
        });
    }

    fn draw_path(&mut self, points: &[Point2], color: Color, thickness: f64) {
        self.commands.push(DrawCommand::Path {
            points: points.to_vec(),
            color,
            thickness,
        });
    }

    fn draw_circle(&mut self, center: Point2, radius: f64, color: Color, thickness: f64) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            thickness,
        });
    }

    fn fill_circle(&mut self, center: Point2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_rectangle(&mut self, rect: BoundingBox2, color: Color, thickness: f64) {
        self.commands.push(DrawCommand::Rectangle {
            rect,
            color,
            thickness,
        });
    }

    fn fill_rectangle(&mut self, rect: BoundingBox2, color: Color) {
        self.commands.push(DrawCommand::FillRectangle { rect, color });
    }

    fn draw_text(&mut self, text: &str, position: Point2, font_size: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font_size,
            color,
        });
    }

    fn measure_text_width(&self, text: &str, font_size: f64) -> f64 {
        estimate_text_width(text, font_size)
    }

    fn push_transform(&mut self, transform: Transform2D) {
        self.stack.push(self.current);
        self.current = self.current * transform;
        self.commands.push(DrawCommand::PushTransform(transform));
    }

    fn pop_transform(&mut self) {
        match self.stack.pop() {
            Some(previous) => self.current = previous,
            None => self.unbalanced_pops += 1,
        }
        self.commands.push(DrawCommand::PopTransform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::points_approx_eq;

    #[test]
    fn test_estimate_text_width() {
        assert!((estimate_text_width("R50.00", 12.0) - 43.2).abs() < 1e-9);
        assert_eq!(estimate_text_width("", 12.0), 0.0);
    }

    #[test]
    fn test_transforms_compose_by_multiplication() {
        let mut r = RecordingRenderer::new();
        r.push_transform(Transform2D::translation(10.0, 0.0));
        r.push_transform(Transform2D::scale(2.0, 2.0));

        let p = r.current_transform().transform_point(&Point2::new(1.0, 1.0));
        assert!(points_approx_eq(&p, &Point2::new(12.0, 2.0)));
        assert_eq!(r.depth(), 2);

        r.pop_transform();
        let p = r.current_transform().transform_point(&Point2::new(1.0, 1.0));
        assert!(points_approx_eq(&p, &Point2::new(11.0, 1.0)));

        r.pop_transform();
        assert!(r.is_balanced());
    }

    #[test]
    fn test_extra_pop_is_unbalanced() {
        let mut r = RecordingRenderer::new();
        r.pop_transform();
        assert!(!r.is_balanced());
    }

    #[test]
    fn test_records_commands() {
        let mut r = RecordingRenderer::new();
        r.draw_line(Point2::origin(), Point2::new(1.0, 0.0), Color::BLACK, 1.0);
        r.draw_text("12.00", Point2::origin(), 12.0, Color::BLACK);

        assert_eq!(r.count("line"), 1);
        assert_eq!(r.texts(), vec!["12.00"]);
        assert_eq!(r.take_commands().len(), 2);
        assert!(r.commands().is_empty());
    }
}
