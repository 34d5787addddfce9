pub mod interval;
pub mod log_scale;
pub mod number_format;
pub mod primitives;
pub mod scale;
pub mod ticks;
pub mod time_scale;
pub mod types;
pub mod windowing;

pub use interval::{Interval, pan_interval, zoom_factor_from_wheel_delta, zoom_interval};
pub use log_scale::LogScale;
pub use number_format::{FormatSpecifier, FormatType, SignMode, format_number};
pub use scale::{ContinuousScale, LinearScale, Scale, ScaleKind};
pub use ticks::{
    ComputedTicks, DEFAULT_TICK_COUNT, TickFormatSpec, TickFormatter, TickSpec, compute_ticks,
};
pub use time_scale::TimeScale;
pub use types::{BucketDatum, PointDatum, SpanDatum, Viewport, XSpanDatum};
pub use windowing::{
    IndexBounds, XPoint, XSpan, index_bounds_for_point_data, index_bounds_for_point_data_by,
    index_bounds_for_span_data, index_bounds_for_span_data_by,
};
