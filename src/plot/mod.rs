//! Minimal plot object model.
//!
//! Provides a matplotlib-like API (`Axes::plot`, `Axes::errorbar`) that
//! produces handles to lines and error-bar groups. Nothing is rendered;
//! the handles expose the coordinates and styling needed to store a plot
//! and to draw it again.

mod axes;
mod color;
mod data;
mod errorbar;
mod handle;
mod line;
mod style;

pub use axes::{Axes, ErrorbarBuilder, Figure, LineBuilder};
pub use color::{cycle_color, Color};
pub use data::IntoPlotData;
pub use errorbar::{ErrorAxis, ErrorBars, ErrorbarContainer};
pub(crate) use errorbar::stack_bounds;
pub use handle::Handle;
pub use line::{Line2D, LineCollection, Segment};
pub use style::{LineStyle, Marker};

/// Version of the plot object model.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
