#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chart_viewport::ChartError;
use chart_viewport::core::{Interval, PointDatum};
use chart_viewport::layers::{CanvasLayer, LineLayer, XAxisLayer};
use chart_viewport::render::CairoSurface;

#[test]
fn image_surface_rejects_empty_size() {
    let err = CairoSurface::image(0, 480).expect_err("zero width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn line_layer_paints_pixels_on_an_external_context() {
    let mut image = ImageSurface::create(Format::ARgb32, 120, 80).expect("image surface");
    {
        let context = Context::new(&image).expect("context");
        let mut surface = CairoSurface::new(context);
        let data = [PointDatum::new(0.0, 0.0), PointDatum::new(100.0, 100.0)];
        let layer = LineLayer::new(&data, Interval::new(0.0, 100.0), Interval::new(0.0, 100.0));
        layer.render(120, 80, &mut surface).expect("render line");
    }

    image.flush();
    let pixels = image.data().expect("exclusive image data");
    assert!(pixels.iter().any(|&byte| byte != 0));
}

#[test]
fn axis_text_renders_through_pango() {
    let mut surface = CairoSurface::image(400, 60).expect("image surface");
    let layer = XAxisLayer::new(Interval::new(0.0, 86_400_000.0));
    layer.render(400, 60, &mut surface).expect("render axis");
}
