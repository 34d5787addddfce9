use chart_viewport::core::{
    BucketDatum, IndexBounds, Interval, PointDatum, SpanDatum, XSpanDatum,
    index_bounds_for_point_data, index_bounds_for_point_data_by, index_bounds_for_span_data,
};
use proptest::prelude::*;

fn points(xs: &[f64]) -> Vec<PointDatum> {
    xs.iter().map(|&x| PointDatum::new(x, 0.0)).collect()
}

fn spans(ranges: &[(f64, f64)]) -> Vec<SpanDatum> {
    ranges
        .iter()
        .map(|&(min, max)| SpanDatum::new(min, max, 0.0))
        .collect()
}

#[test]
fn point_bounds_keep_one_neighbor_on_each_side() {
    let data = points(&[-10.0, -5.0, 50.0, 105.0, 110.0]);
    let bounds = index_bounds_for_point_data(&data, Interval::new(0.0, 100.0));
    assert_eq!(bounds, IndexBounds::new(1, 4));
    assert_eq!(bounds.len(), 3);
}

#[test]
fn point_bounds_clamp_to_the_series() {
    let data = points(&[10.0, 20.0, 30.0]);
    let bounds = index_bounds_for_point_data(&data, Interval::new(0.0, 100.0));
    assert_eq!(bounds, IndexBounds::new(0, 3));
}

#[test]
fn point_bounds_are_empty_when_the_series_is_out_of_view() {
    let before = points(&[-30.0, -20.0, -10.0]);
    assert!(index_bounds_for_point_data(&before, Interval::new(0.0, 100.0)).is_empty());

    let after = points(&[110.0, 120.0]);
    assert!(index_bounds_for_point_data(&after, Interval::new(0.0, 100.0)).is_empty());
}

#[test]
fn point_bounds_cover_a_gap_straddling_the_view() {
    let data = points(&[-50.0, 150.0]);
    let bounds = index_bounds_for_point_data(&data, Interval::new(0.0, 100.0));
    assert_eq!(bounds, IndexBounds::new(0, 2));
}

#[test]
fn duplicate_x_values_stay_together() {
    let data = points(&[0.0, 5.0, 5.0, 5.0, 10.0]);
    let bounds = index_bounds_for_point_data(&data, Interval::new(5.0, 5.0));
    assert_eq!(bounds, IndexBounds::new(0, 5));
}

#[test]
fn custom_selector_searches_any_field() {
    let data = [(1.0, 'a'), (2.0, 'b'), (3.0, 'c'), (4.0, 'd')];
    let bounds = index_bounds_for_point_data_by(&data, Interval::new(2.5, 3.5), |d| d.0);
    assert_eq!(bounds, IndexBounds::new(1, 4));
}

#[test]
fn span_bounds_include_spans_overlapping_the_start() {
    let data = spans(&[(0.0, 10.0), (20.0, 60.0), (70.0, 80.0), (120.0, 130.0), (140.0, 150.0)]);
    let bounds = index_bounds_for_span_data(&data, Interval::new(50.0, 100.0));
    // (20, 60) reaches into view; one extra span on each side.
    assert_eq!(bounds, IndexBounds::new(0, 4));
}

#[test]
fn span_bounds_are_empty_when_every_span_starts_after_the_view() {
    let data = spans(&[(200.0, 210.0), (220.0, 230.0)]);
    assert!(index_bounds_for_span_data(&data, Interval::new(0.0, 100.0)).is_empty());
}

#[test]
fn span_bounds_are_empty_when_every_span_ends_before_the_view() {
    let data = spans(&[(0.0, 10.0), (20.0, 30.0)]);
    let bounds = index_bounds_for_span_data(&data, Interval::new(50.0, 100.0));
    assert!(bounds.is_empty());
}

#[test]
fn span_bounds_work_for_every_span_shaped_datum() {
    let x_spans = [XSpanDatum::new(0.0, 10.0), XSpanDatum::new(40.0, 60.0)];
    let buckets = [
        BucketDatum::new(0.0, 10.0, 0.0, 1.0, 0.0, 1.0),
        BucketDatum::new(40.0, 60.0, 0.0, 1.0, 0.0, 1.0),
    ];
    let view = Interval::new(50.0, 100.0);
    assert_eq!(index_bounds_for_span_data(&x_spans, view), IndexBounds::new(0, 2));
    assert_eq!(index_bounds_for_span_data(&buckets, view), IndexBounds::new(0, 2));
}

#[test]
fn empty_series_yields_empty_bounds() {
    let data: Vec<SpanDatum> = Vec::new();
    let bounds = index_bounds_for_span_data(&data, Interval::new(0.0, 1.0));
    assert!(bounds.is_empty());
    assert_eq!(bounds.range(), 0..0);
}

proptest! {
    #[test]
    fn point_bounds_contain_every_visible_point(
        mut xs in prop::collection::vec(-1_000.0f64..1_000.0, 0..200),
        a in -1_200.0f64..1_200.0,
        b in -1_200.0f64..1_200.0
    ) {
        xs.sort_by(f64::total_cmp);
        let data = points(&xs);
        let view = Interval::new(a.min(b), a.max(b));
        let bounds = index_bounds_for_point_data(&data, view);

        prop_assert!(bounds.last_index <= data.len());
        for (index, datum) in data.iter().enumerate() {
            if view.contains(datum.x_value) {
                prop_assert!(bounds.range().contains(&index));
            }
        }

        // Linear-scan reference: first x >= min, first x > max, then one
        // neighbor on each side unless nothing survives the widening.
        let lower = xs.iter().position(|&x| x >= view.min).unwrap_or(xs.len());
        let upper = xs.iter().position(|&x| x > view.max).unwrap_or(xs.len());
        let expected = if lower == xs.len() || upper == 0 {
            IndexBounds::new(lower, upper)
        } else {
            IndexBounds::new(lower.saturating_sub(1), (upper + 1).min(xs.len()))
        };
        prop_assert_eq!(bounds, expected);
    }

    #[test]
    fn span_bounds_contain_every_overlapping_span(
        mut starts in prop::collection::vec(-1_000.0f64..1_000.0, 0..200),
        lengths in prop::collection::vec(0.0f64..50.0, 200),
        a in -1_200.0f64..1_200.0,
        b in -1_200.0f64..1_200.0
    ) {
        starts.sort_by(f64::total_cmp);
        let data: Vec<SpanDatum> = starts
            .iter()
            .zip(&lengths)
            .map(|(&start, &length)| SpanDatum::new(start, start + length, 0.0))
            .collect();
        let view = Interval::new(a.min(b), a.max(b));
        let bounds = index_bounds_for_span_data(&data, view);

        prop_assert!(bounds.last_index <= data.len());
        for (index, datum) in data.iter().enumerate() {
            if datum.max_x_value >= view.min && datum.min_x_value <= view.max {
                prop_assert!(bounds.range().contains(&index));
            }
        }
    }
}
