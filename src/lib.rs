//! HistoView — live RGB / luminance histogram overlay for egui.
//!
//! Two components, consumed in sequence:
//! * [`histogram`] — per-channel 256-bin pixel-value counting with optional
//!   bin coalescing (the Histogram Computer).
//! * [`curve`] — conversion of one frequency array into a closed,
//!   orientation-aware silhouette in a target rectangle (the Curve Builder).
//!
//! [`view::HistogramView`] ties the two together as an egui widget that
//! fills and strokes the silhouettes. The demo binary shows the overlay on
//! top of a loaded image.

pub mod curve;
pub mod histogram;
pub mod logger;
pub mod view;

pub use curve::{CurveStyle, Orientation, channel_polygon, interpolation_points};
pub use histogram::{BINS, ChannelMode, HistogramData, luminance_histogram, rgb_histogram};
pub use view::HistogramView;
