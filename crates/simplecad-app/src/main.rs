//! SimpleCAD 演示程序
//!
//! 无界面运行：加载设置，通过工具管理器回放一段指针操作，
//! 再把图纸、栅格和预览绘制到记录渲染器并输出统计。
//!
//! 用法：`simplecad [settings.json]`

use anyhow::{Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use simplecad_core::drawing::Drawing;
use simplecad_core::geometry::Geometry;
use simplecad_core::grid::GridRenderer;
use simplecad_core::math::Point2;
use simplecad_core::properties::Color;
use simplecad_core::render::{RecordingRenderer, Renderer};
use simplecad_core::selection::SelectionService;
use simplecad_core::settings::EditorSettings;
use simplecad_tools::tools::SelectionTool;
use simplecad_tools::ToolManager;

/// 回放脚本中的一步
#[derive(Debug, Clone, Copy)]
enum Step {
    Activate(&'static str),
    Down(f64, f64),
    Move(f64, f64),
    CompleteCurve,
    Cancel,
}

/// 演示会话：画线、圆弧、曲线、三种标注，再选中并编辑
fn demo_script() -> Vec<Step> {
    use Step::*;
    vec![
        Activate("Line"),
        Down(0.0, 0.0),
        Move(48.0, 3.0),
        Down(101.0, 2.0),
        Activate("Arc"),
        Down(200.0, 0.0),
        Down(250.0, 0.0),
        Move(200.0, 48.0),
        Down(200.0, 50.0),
        Activate("Curve"),
        Down(0.0, 100.0),
        Down(40.0, 140.0),
        Down(80.0, 90.0),
        Down(120.0, 130.0),
        CompleteCurve,
        Activate("LinearDimension"),
        Down(0.0, 0.0),
        Down(100.0, 0.0),
        Down(50.0, -30.0),
        Activate("RadialDimension"),
        Down(200.0, 0.0),
        Down(250.0, 0.0),
        Activate("AngularDimension"),
        Down(200.0, 0.0),
        Down(250.0, 0.0),
        Down(200.0, 50.0),
        Down(230.0, 30.0),
        Activate("Selection"),
        Down(50.0, 1.0),
        Activate("Move"),
        Down(0.0, 0.0),
        Down(0.0, -20.0),
        Activate("Rotate"),
        Down(50.0, -20.0),
        Down(100.0, -20.0),
        Move(50.0, 30.0),
        Down(50.0, 30.0),
        Activate("Scale"),
        Down(50.0, -20.0),
        Down(60.0, -20.0),
        Move(70.0, -20.0),
        Cancel,
        Activate("Line"),
        Down(300.0, 300.0),
        Move(320.0, 310.0),
    ]
}

fn load_settings() -> Result<EditorSettings> {
    match std::env::args().nth(1) {
        Some(path) => EditorSettings::load(&path)
            .with_context(|| format!("Failed to load settings from {}", path)),
        None => Ok(EditorSettings::default()),
    }
}

fn log_level(name: &str) -> Level {
    name.parse().unwrap_or_else(|_| {
        eprintln!("Unknown log level '{}', using info", name);
        Level::INFO
    })
}

fn run(settings: &EditorSettings) -> Result<()> {
    let mut drawing = Drawing::new();
    let mut manager = ToolManager::with_default_tools();
    manager.register(Box::new(SelectionTool::with_tolerance(
        settings.selection_tolerance,
    )));
    info!("Registered tools: {}", manager.tool_names().join(", "));

    for step in demo_script() {
        let message = match step {
            Step::Activate(name) => {
                manager
                    .activate_tool(name)
                    .with_context(|| format!("Failed to activate {}", name))?;
                None
            }
            Step::Down(x, y) => manager.on_pointer_down(&mut drawing, &settings.pointer(Point2::new(x, y))),
            Step::Move(x, y) => {
                manager.on_pointer_move(&settings.pointer(Point2::new(x, y)));
                None
            }
            Step::CompleteCurve => manager.complete_curve().context("Failed to complete curve")?,
            Step::Cancel => {
                manager.cancel_current_tool();
                None
            }
        };

        if let Some(message) = message {
            if settings.read_only {
                warn!("Read-only drawing, discarded {} from {}", message.entity.type_name(), message.tool_name);
            } else {
                drawing.add(message.entity);
            }
        }
    }

    info!("Drawing has {} entities", drawing.len());
    for entity in drawing.iter() {
        info!("  {} {} selected={}", entity.id, entity.name, entity.selected);
    }
    if let Some(extents) = drawing.extents() {
        info!(
            "Extents: ({:.2}, {:.2}) - ({:.2}, {:.2})",
            extents.min.x, extents.min.y, extents.max.x, extents.max.y
        );
    }

    let cursor = Point2::new(200.0, 45.0);
    let snap = settings.snap_service();
    let snapped = snap.snap_to_grid(&cursor);
    info!(
        "Cursor ({}, {}) snaps to ({}, {}), on grid: {}",
        cursor.x,
        cursor.y,
        snapped.x,
        snapped.y,
        snap.is_near_grid_point(&cursor, settings.hit_tolerance)
    );

    let service = SelectionService::new(settings.selection_hit_radius);
    if let Some(entity) = service.find_entity_at(&drawing, &cursor) {
        info!(
            "Entity near ({}, {}): {} (precise hit: {})",
            cursor.x,
            cursor.y,
            entity.id,
            entity.hit_test(&cursor, settings.hit_tolerance)
        );
    }

    let view = settings.view(800.0, 600.0);
    let mut renderer = RecordingRenderer::new();
    renderer.push_transform(view.world_to_screen_transform());
    if settings.grid_visible {
        GridRenderer::new().draw(&mut renderer, &view.visible_bounds(), settings.grid_spacing, view.zoom());
    }
    drawing.draw(&mut renderer);
    if settings.show_pass_points {
        for entity in drawing.iter() {
            if let Geometry::Curve(curve) = &entity.geometry {
                for p in &curve.pass_points {
                    renderer.fill_circle(*p, 2.0, Color::ORANGE);
                }
            }
        }
    }
    manager.draw_preview(&mut renderer);
    renderer.pop_transform();

    if let Some(tool) = manager.active_tool() {
        info!("Active tool {}: {}", tool.name(), tool.prompt());
    }
    info!(
        "Recorded {} draw commands ({} lines, {} arcs, {} paths, {} texts), balanced={}",
        renderer.commands().len(),
        renderer.count("line"),
        renderer.count("arc"),
        renderer.count("path"),
        renderer.count("text"),
        renderer.is_balanced()
    );
    for text in renderer.texts() {
        info!("  text: {}", text);
    }

    Ok(())
}

fn main() -> Result<()> {
    let settings = load_settings()?;

    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(log_level(&settings.log_level))
            .finish(),
    )?;

    info!("Starting SimpleCAD...");
    run(&settings)
}
