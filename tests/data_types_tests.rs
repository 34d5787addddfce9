use chart_viewport::ChartError;
use chart_viewport::core::{BucketDatum, PointDatum, SpanDatum, XSpanDatum};
use chart_viewport::render::Color;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn decimal_samples_convert_to_epoch_millis() {
    let time = Utc
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .expect("valid time");
    let value = Decimal::from_str("42.125").expect("valid decimal");

    let datum = PointDatum::from_decimal_time(time, value).expect("convert");
    assert_eq!(datum.x_value, 1_704_164_645_000.0);
    assert_eq!(datum.y_value, 42.125);
}

#[test]
fn data_uses_camel_case_json() {
    let point: PointDatum = serde_json::from_str(r#"{ "xValue": 1, "yValue": 2 }"#).expect("point");
    assert_eq!(point, PointDatum::new(1.0, 2.0));

    let span: SpanDatum =
        serde_json::from_str(r#"{ "minXValue": 1, "maxXValue": 2, "yValue": 3 }"#).expect("span");
    assert_eq!(span, SpanDatum::new(1.0, 2.0, 3.0));

    let bucket: BucketDatum = serde_json::from_str(
        r#"{ "minXValue": 0, "maxXValue": 1, "minYValue": 2, "maxYValue": 3,
             "firstYValue": 2.5, "lastYValue": 2.75 }"#,
    )
    .expect("bucket");
    assert_eq!(bucket, BucketDatum::new(0.0, 1.0, 2.0, 3.0, 2.5, 2.75));
}

#[test]
fn x_span_color_is_optional() {
    let plain: XSpanDatum =
        serde_json::from_str(r#"{ "minXValue": 1, "maxXValue": 2 }"#).expect("plain span");
    assert_eq!(plain.color, None);
    assert!(!serde_json::to_string(&plain).expect("serialize").contains("color"));

    let colored: XSpanDatum =
        serde_json::from_str(r##"{ "minXValue": 1, "maxXValue": 2, "color": "#f00" }"##)
            .expect("colored span");
    assert_eq!(colored.color, Some(Color::rgb(1.0, 0.0, 0.0)));
}

#[test]
fn unparseable_colors_are_invalid_arguments() {
    let result = "rgba(0, 0, 0)".parse::<Color>();
    assert!(matches!(result, Err(ChartError::InvalidArgument(_))));
}
