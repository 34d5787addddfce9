use approx::assert_relative_eq;
use chart_viewport::core::Interval;
use chart_viewport::{ChartConfig, ChartError};
use chart_viewport::interaction::{
    ElementBounds, InteractionCapture, InteractionConfig, InteractionPolicy, MouseCapture,
    PointerEvent, ViewState, ViewportAction, WheelEvent,
};

const BOUNDS: ElementBounds = ElementBounds::new(0.0, 0.0, 200.0, 100.0);

fn domain() -> Interval {
    Interval::new(0.0, 100.0)
}

fn drag(
    mouse: &mut MouseCapture,
    capture: &mut InteractionCapture<impl InteractionPolicy>,
    from: PointerEvent,
    to_x: f64,
) {
    mouse.mouse_down(&from, BOUNDS, capture);
    let to = PointerEvent {
        client_x: to_x,
        ..from
    };
    mouse.mouse_move(&to, BOUNDS, capture);
    mouse.mouse_up(&to, BOUNDS, capture);
}

#[test]
fn defaults_enable_pan_and_zoom_only() {
    let config = InteractionConfig::default();
    assert!(config.enable_pan);
    assert!(config.enable_zoom);
    assert!(!config.enable_hover);
    assert!(!config.enable_brush);
}

#[test]
fn dragging_right_pans_toward_earlier_values() {
    let mut mouse = MouseCapture::new();
    let mut capture = InteractionCapture::new(InteractionConfig::default(), domain());

    drag(&mut mouse, &mut capture, PointerEvent::primary(50.0, 50.0), 100.0);

    assert_eq!(
        capture.take_actions(),
        vec![ViewportAction::SetXDomain(Interval::new(-25.0, 75.0))]
    );
    assert_eq!(capture.x_domain(), Interval::new(-25.0, 75.0));
    assert!(capture.take_actions().is_empty());
}

#[test]
fn pan_disabled_ignores_drags() {
    let config = InteractionConfig {
        enable_pan: false,
        ..InteractionConfig::default()
    };
    let mut mouse = MouseCapture::new();
    let mut capture = InteractionCapture::new(config, domain());

    drag(&mut mouse, &mut capture, PointerEvent::primary(50.0, 50.0), 100.0);

    assert!(capture.take_actions().is_empty());
    assert_eq!(capture.x_domain(), domain());
}

#[test]
fn wheel_zooms_around_the_pointer() {
    let mut mouse = MouseCapture::new();
    let mut capture = InteractionCapture::new(InteractionConfig::default(), domain());
    let event = WheelEvent {
        client_x: 50.0,
        client_y: 50.0,
        delta_x: 0.0,
        delta_y: 20.0,
        shift_key: false,
    };

    mouse.wheel(&event, BOUNDS, &mut capture);

    let actions = capture.take_actions();
    let [ViewportAction::SetXDomain(zoomed)] = actions.as_slice() else {
        panic!("expected one domain change, got {actions:?}");
    };
    let factor = (-1.0f64).exp();
    // The pointer sits a quarter of the way in; that value stays put.
    assert_relative_eq!(zoomed.min, 25.0 - 25.0 * factor, epsilon = 1e-9);
    assert_relative_eq!(zoomed.width(), 100.0 * factor, epsilon = 1e-9);
}

#[test]
fn configured_zoom_speed_drives_the_wheel_factor() {
    let config = ChartConfig::from_json_str(r#"{"interaction":{"zoom_speed":1.0}}"#)
        .expect("valid config")
        .interaction;
    let mut mouse = MouseCapture::from_config(&config).expect("finite zoom speed");
    let mut capture = InteractionCapture::new(config, domain());
    let event = WheelEvent {
        client_x: 100.0,
        client_y: 50.0,
        delta_x: 0.0,
        delta_y: 1.0,
        shift_key: false,
    };

    mouse.wheel(&event, BOUNDS, &mut capture);

    let actions = capture.take_actions();
    let [ViewportAction::SetXDomain(zoomed)] = actions.as_slice() else {
        panic!("expected one domain change, got {actions:?}");
    };
    assert_relative_eq!(zoomed.width(), 100.0 * (-1.0f64).exp(), epsilon = 1e-9);
    assert_relative_eq!(zoomed.min + zoomed.width() / 2.0, 50.0, epsilon = 1e-9);
}

#[test]
fn non_finite_configured_zoom_speed_is_rejected() {
    let config = InteractionConfig {
        zoom_speed: f64::NAN,
        ..InteractionConfig::default()
    };
    assert!(matches!(
        MouseCapture::from_config(&config),
        Err(ChartError::InvalidArgument(_))
    ));
}

#[test]
fn zoom_disabled_ignores_the_wheel() {
    let config = InteractionConfig {
        enable_zoom: false,
        ..InteractionConfig::default()
    };
    let mut mouse = MouseCapture::new();
    let mut capture = InteractionCapture::new(config, domain());
    let event = WheelEvent {
        delta_y: 5.0,
        ..WheelEvent::default()
    };

    mouse.wheel(&event, BOUNDS, &mut capture);
    assert!(capture.take_actions().is_empty());
}

#[test]
fn shift_drag_brushes_a_selection_when_enabled() {
    let config = InteractionConfig {
        enable_brush: true,
        ..InteractionConfig::default()
    };
    let mut mouse = MouseCapture::new();
    let mut capture = InteractionCapture::new(config, domain());

    drag(
        &mut mouse,
        &mut capture,
        PointerEvent::primary(150.0, 50.0).with_shift(),
        50.0,
    );

    let selection = Some(Interval::new(25.0, 75.0));
    assert_eq!(
        capture.take_actions(),
        vec![
            ViewportAction::SetSelection(selection),
            ViewportAction::SetSelection(selection),
        ]
    );
    assert_eq!(capture.x_domain(), domain());
}

#[test]
fn click_clears_the_selection_when_brushing_is_enabled() {
    let config = InteractionConfig {
        enable_brush: true,
        enable_pan: false,
        ..InteractionConfig::default()
    };
    let mut mouse = MouseCapture::new();
    let mut capture = InteractionCapture::new(config, domain());
    let event = PointerEvent::primary(80.0, 20.0);

    mouse.mouse_down(&event, BOUNDS, &mut capture);
    mouse.mouse_up(&event, BOUNDS, &mut capture);

    assert_eq!(
        capture.take_actions(),
        vec![ViewportAction::SetSelection(None)]
    );
}

#[test]
fn hover_reports_the_domain_value_under_the_pointer() {
    let config = InteractionConfig {
        enable_hover: true,
        ..InteractionConfig::default()
    };
    let mut mouse = MouseCapture::new();
    let mut capture = InteractionCapture::new(config, domain());

    mouse.mouse_move(&PointerEvent::primary(50.0, 10.0), BOUNDS, &mut capture);
    mouse.mouse_leave(&PointerEvent::primary(250.0, 10.0), BOUNDS, &mut capture);

    assert_eq!(
        capture.take_actions(),
        vec![
            ViewportAction::SetHover(Some(25.0)),
            ViewportAction::SetHover(None),
        ]
    );
}

#[test]
fn custom_policy_can_veto_gestures() {
    struct NoZoom;

    impl InteractionPolicy for NoZoom {
        fn should_zoom(&self, _event: &WheelEvent) -> bool {
            false
        }
    }

    let mut mouse = MouseCapture::new();
    let mut capture =
        InteractionCapture::with_policy(InteractionConfig::default(), domain(), NoZoom);
    let event = WheelEvent {
        delta_y: 5.0,
        ..WheelEvent::default()
    };

    mouse.wheel(&event, BOUNDS, &mut capture);
    assert!(capture.take_actions().is_empty());

    drag(&mut mouse, &mut capture, PointerEvent::primary(100.0, 50.0), 0.0);
    assert_eq!(
        capture.take_actions(),
        vec![ViewportAction::SetXDomain(Interval::new(50.0, 150.0))]
    );
}

#[test]
fn view_state_folds_actions() {
    let state = ViewState::new(domain()).apply_all([
        ViewportAction::SetXDomain(Interval::new(10.0, 20.0)),
        ViewportAction::SetSelection(Some(Interval::new(12.0, 14.0))),
        ViewportAction::SetHover(Some(13.0)),
        ViewportAction::SetHover(None),
    ]);

    assert_eq!(state.x_domain, Interval::new(10.0, 20.0));
    assert_eq!(state.selection, Some(Interval::new(12.0, 14.0)));
    assert_eq!(state.hover, None);
}

#[test]
fn actions_serialize_with_a_type_tag() {
    let json = serde_json::to_value(ViewportAction::SetHover(Some(2.5))).expect("serialize");
    assert_eq!(json, serde_json::json!({ "type": "set_hover", "value": 2.5 }));

    let parsed: ViewportAction =
        serde_json::from_value(serde_json::json!({ "type": "set_selection", "value": null }))
            .expect("parse");
    assert_eq!(parsed, ViewportAction::SetSelection(None));
}
