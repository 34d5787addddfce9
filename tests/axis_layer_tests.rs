use chart_viewport::ChartError;
use chart_viewport::core::{Interval, ScaleKind, TickFormatSpec, TickSpec};
use chart_viewport::layers::{
    AxisStyle, BrushLayer, BrushStyle, CanvasLayer, HoverLineLayer, XAxisLayer, YAxisLayer,
    YAxisSpec, render_brush_layer, render_hover_line_layer, render_x_axis_layer,
};
use chart_viewport::render::{Color, DrawCommand, Font, RecordingSurface, TextAlign, TextBaseline};
use chrono::{NaiveDate, TimeZone, Utc};

fn millis(y: i32, m: u32, d: u32) -> f64 {
    let date = NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("valid time"))
        .timestamp_millis() as f64
}

fn linear_axis() -> AxisStyle {
    AxisStyle {
        scale: Some(ScaleKind::Linear),
        ..AxisStyle::default()
    }
}

#[test]
fn x_axis_draws_a_gridline_and_label_per_tick() {
    let layer = XAxisLayer::new(Interval::new(0.0, 100.0)).with_style(linear_axis());
    let mut surface = RecordingSurface::new();
    render_x_axis_layer(&layer, 100, 50, &mut surface).expect("render x axis");

    let color = AxisStyle::default().color;
    let mut expected = vec![
        DrawCommand::Translate { dx: 0.5, dy: -0.5 },
        DrawCommand::BeginPath,
        DrawCommand::TextAlign {
            align: TextAlign::Left,
        },
        DrawCommand::TextBaseline {
            baseline: TextBaseline::Top,
        },
        DrawCommand::FillStyle { color },
        DrawCommand::Font {
            font: Font::default(),
        },
    ];
    for tick in [0.0, 20.0, 40.0, 60.0, 80.0, 100.0] {
        expected.push(DrawCommand::FillText {
            text: format!("{tick}"),
            x: tick + 6.0,
            y: 4.0,
        });
        expected.push(DrawCommand::MoveTo { x: tick, y: 0.0 });
        expected.push(DrawCommand::LineTo { x: tick, y: 50.0 });
    }
    expected.push(DrawCommand::StrokeStyle { color });
    expected.push(DrawCommand::Stroke);

    assert_eq!(surface.commands(), expected.as_slice());
}

#[test]
fn x_axis_defaults_to_time_ticks_with_uppercase_labels() {
    let layer = XAxisLayer::new(Interval::new(millis(2020, 1, 15), millis(2020, 6, 15)));
    let mut surface = RecordingSurface::new();
    render_x_axis_layer(&layer, 500, 50, &mut surface).expect("render x axis");

    let labels: Vec<String> = surface
        .calls_only(&["fillText"])
        .into_iter()
        .filter_map(|command| match command {
            DrawCommand::FillText { text, .. } => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE"]);
}

#[test]
fn x_axis_uses_explicit_values_and_format_function() {
    let style = AxisStyle {
        ticks: Some(TickSpec::Values(vec![25.0, 75.0])),
        tick_format: Some(TickFormatSpec::function(|value| format!("v{value}"))),
        ..linear_axis()
    };
    let layer = XAxisLayer::new(Interval::new(0.0, 100.0)).with_style(style);
    let mut surface = RecordingSurface::new();
    render_x_axis_layer(&layer, 100, 50, &mut surface).expect("render x axis");

    assert_eq!(
        surface.calls_only(&["fillText"]),
        vec![
            DrawCommand::FillText {
                text: "V25".to_owned(),
                x: 31.0,
                y: 4.0,
            },
            DrawCommand::FillText {
                text: "V75".to_owned(),
                x: 81.0,
                y: 4.0,
            },
        ]
    );
}

#[test]
fn x_axis_rejects_a_bad_format_specifier_before_drawing() {
    let style = AxisStyle {
        tick_format: Some(TickFormatSpec::Specifier("%Q".to_owned())),
        ..AxisStyle::default()
    };
    let layer = XAxisLayer::new(Interval::new(0.0, 86_400_000.0)).with_style(style);
    let mut surface = RecordingSurface::new();

    let result = layer.render(100, 50, &mut surface);
    assert!(matches!(result, Err(ChartError::InvalidArgument(_))));
    assert!(surface.commands().is_empty());
}

#[test]
fn y_axis_layout_positions_ticks_from_the_top() {
    let layer = YAxisLayer::new(vec![YAxisSpec::new(Interval::new(0.0, 100.0))]);
    let layouts = layer.layout().expect("layout");

    assert_eq!(layouts.len(), 1);
    let layout = &layouts["0"];
    let positioned: Vec<(f64, f64, &str)> = layout
        .ticks
        .iter()
        .map(|tick| (tick.value, tick.offset_percent, tick.label.as_str()))
        .collect();
    assert_eq!(
        positioned,
        vec![
            (0.0, 100.0, "0"),
            (20.0, 80.0, "20"),
            (40.0, 60.0, "40"),
            (60.0, 40.0, "60"),
            (80.0, 20.0, "80"),
            (100.0, 0.0, "100"),
        ]
    );
    assert_eq!(layout.color, AxisStyle::default().color);
}

#[test]
fn y_axis_layouts_are_keyed_by_id_or_position() {
    let layer = YAxisLayer::new(vec![
        YAxisSpec::new(Interval::new(0.0, 1.0)).with_id("price"),
        YAxisSpec::new(Interval::new(0.0, 10.0)),
        YAxisSpec::new(Interval::new(0.0, 5.0)).with_id(""),
    ]);
    let layouts = layer.layout().expect("layout");

    let keys: Vec<&str> = layouts.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["price", "1", "2"]);
}

#[test]
fn y_axis_with_log_scale_thins_labels() {
    let mut spec = YAxisSpec::new(Interval::new(1.0, 1000.0));
    spec.style.scale = Some(ScaleKind::Log);
    let layouts = YAxisLayer::new(vec![spec]).layout().expect("layout");
    let ticks = &layouts["0"].ticks;

    let labeled: Vec<f64> = ticks
        .iter()
        .filter(|tick| !tick.label.is_empty())
        .map(|tick| tick.value)
        .collect();
    assert_eq!(labeled, vec![1.0, 10.0, 100.0, 1000.0]);
    assert!(ticks.len() > labeled.len());
}

#[test]
fn hover_line_spans_the_full_height() {
    let color = Color::rgb(1.0, 0.0, 0.0);
    let mut layer = HoverLineLayer::new(Some(25.0), Interval::new(0.0, 100.0));
    layer.style.color = color;
    let mut surface = RecordingSurface::new();
    render_hover_line_layer(&layer, 200, 80, &mut surface);

    assert_eq!(
        surface.commands(),
        &[
            DrawCommand::Translate { dx: 0.5, dy: -0.5 },
            DrawCommand::BeginPath,
            DrawCommand::MoveTo { x: 50.0, y: 0.0 },
            DrawCommand::LineTo { x: 50.0, y: 80.0 },
            DrawCommand::StrokeStyle { color },
            DrawCommand::LineWidth { width: 1.0 },
            DrawCommand::Stroke,
        ]
    );
}

#[test]
fn hover_line_without_hover_draws_nothing() {
    let layer = HoverLineLayer::new(None, Interval::new(0.0, 100.0));
    let mut surface = RecordingSurface::new();
    render_hover_line_layer(&layer, 200, 80, &mut surface);
    assert!(surface.commands().is_empty());
}

#[test]
fn brush_fills_and_outlines_the_selection() {
    let style = BrushStyle::default();
    let layer = BrushLayer::new(Some(Interval::new(10.0, 30.0)), Interval::new(0.0, 100.0));
    let mut surface = RecordingSurface::new();
    render_brush_layer(&layer, 100, 40, &mut surface);

    assert_eq!(
        surface.commands(),
        &[
            DrawCommand::Translate { dx: 0.5, dy: -0.5 },
            DrawCommand::BeginPath,
            DrawCommand::Rect {
                x: 10.0,
                y: 0.0,
                width: 20.0,
                height: 40.0,
            },
            DrawCommand::FillStyle { color: style.fill },
            DrawCommand::Fill,
            DrawCommand::StrokeStyle {
                color: style.stroke,
            },
            DrawCommand::LineWidth { width: 1.0 },
            DrawCommand::Stroke,
        ]
    );
}

#[test]
fn brush_without_selection_draws_nothing() {
    let layer = BrushLayer::new(None, Interval::new(0.0, 100.0));
    let mut surface = RecordingSurface::new();
    render_brush_layer(&layer, 100, 40, &mut surface);
    assert!(surface.commands().is_empty());
}
