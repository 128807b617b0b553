//! Plotstore - persist plot elements in hierarchical data containers.
//!
//! Plotstore stores the numeric data behind a plotted line or error-bar
//! group in a netCDF-4 (HDF5) file or a JSON-backed mapping, and can
//! redraw stored elements onto an axes later.
//!
//! # Features
//!
//! - A small plot model: lines, error-bar groups, axes and figures
//! - Error magnitudes recovered from the drawn bar geometry
//! - NetCDF-4 / HDF5 and JSON backends behind one [`store::Store`] trait
//! - Tree listing of stored records
//!
//! # Example
//!
//! ```ignore
//! use plotstore::plot::Axes;
//! use plotstore::store::Container;
//! use std::path::Path;
//!
//! let mut ax = Axes::new();
//! let line = ax.plot(vec![0.0, 1.0, 2.0], vec![1.0, 0.5, 0.25]).label("decay").build()?;
//!
//! let mut container = Container::create(Path::new("plot.nc"))?;
//! plotstore::dump(&mut container, "fig/decay", &line)?;
//! let restored = plotstore::restore(&container, "fig/decay", &mut ax)?;
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod data;
pub mod error;
pub mod plot;
pub mod serialize;
pub mod store;
pub mod util;

pub use error::{PlotStoreError, Result};
pub use serialize::{dump, dump_with, info, restore, restore_current};
