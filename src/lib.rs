//! chart-viewport: viewport-windowed canvas rendering for time-series charts.
//!
//! Layers rasterize only the slice of a sorted series that falls inside the
//! visible X domain, through a backend-neutral [`render::DrawingSurface`].
//! Interaction capture converts pointer and wheel input into pan, zoom,
//! brush and hover updates of that domain.

pub mod config;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layers;
pub mod render;
pub mod telemetry;

pub use config::ChartConfig;
pub use error::{ChartError, ChartResult};
