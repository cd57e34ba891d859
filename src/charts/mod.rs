//! Canvas chart renderers: bar, scatter, histogram, Gaussian curve.
//!
//! Every chart owns a [`Frame`] (canvas + camera + pan input) and
//! renders one frame per [`tick`](BarChart::tick). The host drives the
//! tick at [`Frame::tick_interval`]; `destroy()` stops the loop so a
//! late tick can never draw into a torn-down chart.

mod bar;
mod frame;
mod gauss;
mod histogram;
mod hooks;
mod scatter;

pub use bar::{BarChart, BarConfig, ScaleIncrement};
pub use frame::{Frame, FrameOptions};
pub use gauss::{GaussChart, GaussConfig};
pub use histogram::{HistogramChart, HistogramConfig};
pub use hooks::ChartHooks;
pub use scatter::{PointKind, ScatterChart, ScatterConfig};
