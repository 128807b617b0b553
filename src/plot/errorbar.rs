//! Error-bar groups.

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::error::{PlotStoreError, Result};
use crate::plot::color::Color;
use crate::plot::line::{Line2D, LineCollection, Segment};
use crate::plot::style::{LineStyle, Marker};

/// Error magnitudes for one direction.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBars {
    /// Same extent below and above each point, shape (N,).
    Symmetric(Array1<f64>),
    /// Separate lower (row 0) and upper (row 1) extents, shape (2, N).
    Asymmetric(Array2<f64>),
}

impl ErrorBars {
    /// Number of points covered.
    pub fn len(&self) -> usize {
        match self {
            ErrorBars::Symmetric(err) => err.len(),
            ErrorBars::Asymmetric(err) => err.ncols(),
        }
    }

    /// Whether no points are covered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extent below each point.
    pub fn lower(&self) -> ArrayView1<'_, f64> {
        match self {
            ErrorBars::Symmetric(err) => err.view(),
            ErrorBars::Asymmetric(err) => err.row(0),
        }
    }

    /// Extent above each point.
    pub fn upper(&self) -> ArrayView1<'_, f64> {
        match self {
            ErrorBars::Symmetric(err) => err.view(),
            ErrorBars::Asymmetric(err) => err.row(1),
        }
    }

    /// Check the shape against `n` points and reject negative extents.
    pub fn validate(&self, n: usize) -> Result<()> {
        if let ErrorBars::Asymmetric(err) = self {
            if err.nrows() != 2 {
                return Err(PlotStoreError::data(format!(
                    "Asymmetric error bars must have shape (2, N), got {:?}",
                    err.shape()
                )));
            }
        }
        if self.len() != n {
            return Err(PlotStoreError::data(format!(
                "Error bars cover {} points, data has {}",
                self.len(),
                n
            )));
        }
        if self.lower().iter().chain(self.upper().iter()).any(|&v| v < 0.0) {
            return Err(PlotStoreError::data("Error bar extents must be non-negative"));
        }
        Ok(())
    }
}

impl From<Array1<f64>> for ErrorBars {
    fn from(err: Array1<f64>) -> Self {
        ErrorBars::Symmetric(err)
    }
}

impl From<Vec<f64>> for ErrorBars {
    fn from(err: Vec<f64>) -> Self {
        ErrorBars::Symmetric(Array1::from(err))
    }
}

impl From<Array2<f64>> for ErrorBars {
    fn from(err: Array2<f64>) -> Self {
        ErrorBars::Asymmetric(err)
    }
}

/// Direction of a set of error bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAxis {
    /// Horizontal bars, errors in x.
    X,
    /// Vertical bars, errors in y.
    Y,
}

/// The artists drawn by one error-bar call.
///
/// Bar line collections are kept in creation order: x-errors first, then
/// y-errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorbarContainer {
    data_line: Line2D,
    caplines: Vec<Line2D>,
    barlinecols: Vec<LineCollection>,
    has_xerr: bool,
    has_yerr: bool,
    label: Option<String>,
}

impl ErrorbarContainer {
    /// Build the bar segments and caps around `data_line`.
    ///
    /// Errors must already be validated against the line length.
    pub(crate) fn new(
        data_line: Line2D,
        xerr: Option<&ErrorBars>,
        yerr: Option<&ErrorBars>,
        capsize: f64,
    ) -> Self {
        let color = data_line.color().clone();
        let label = data_line.label().map(str::to_string);
        let mut caplines = Vec::new();
        let mut barlinecols = Vec::new();

        for (axis, err) in [(ErrorAxis::X, xerr), (ErrorAxis::Y, yerr)] {
            let Some(err) = err else { continue };
            let (segments, low, high) = bar_segments(&data_line, err, axis);
            barlinecols.push(LineCollection::new(segments, color.clone()));

            if capsize > 0.0 {
                let marker = match axis {
                    ErrorAxis::X => Marker::VLine,
                    ErrorAxis::Y => Marker::HLine,
                };
                for ends in [low, high] {
                    let (x, y) = match axis {
                        ErrorAxis::X => (ends, data_line.ydata().clone()),
                        ErrorAxis::Y => (data_line.xdata().clone(), ends),
                    };
                    caplines.push(
                        Line2D::new(x, y)
                            .with_color(color.clone())
                            .with_linestyle(LineStyle::None)
                            .with_marker(marker),
                    );
                }
            }
        }

        Self {
            data_line,
            caplines,
            barlinecols,
            has_xerr: xerr.is_some(),
            has_yerr: yerr.is_some(),
            label,
        }
    }

    /// Line through the data points.
    pub fn data_line(&self) -> &Line2D {
        &self.data_line
    }

    /// Cap markers at the ends of the bars (empty when capsize is zero).
    pub fn caplines(&self) -> &[Line2D] {
        &self.caplines
    }

    /// One collection of bar segments per error direction.
    pub fn barlinecols(&self) -> &[LineCollection] {
        &self.barlinecols
    }

    /// Whether x-errors were drawn.
    pub fn has_xerr(&self) -> bool {
        self.has_xerr
    }

    /// Whether y-errors were drawn.
    pub fn has_yerr(&self) -> bool {
        self.has_yerr
    }

    /// Legend label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Line color.
    pub fn color(&self) -> &Color {
        self.data_line.color()
    }
}

/// Segments running from `centre - lower` to `centre + upper` along `axis`,
/// plus the two end coordinates.
fn bar_segments(
    line: &Line2D,
    err: &ErrorBars,
    axis: ErrorAxis,
) -> (Vec<Segment>, Array1<f64>, Array1<f64>) {
    let centre = match axis {
        ErrorAxis::X => line.xdata(),
        ErrorAxis::Y => line.ydata(),
    };
    let low = centre - &err.lower();
    let high = centre + &err.upper();

    let segments = line
        .xdata()
        .iter()
        .zip(line.ydata().iter())
        .zip(low.iter().zip(high.iter()))
        .map(|((&x, &y), (&lo, &hi))| match axis {
            ErrorAxis::X => [[lo, y], [hi, y]],
            ErrorAxis::Y => [[x, lo], [x, hi]],
        })
        .collect();

    (segments, low, high)
}

/// Stack lower and upper extents into a (2, N) array.
pub(crate) fn stack_bounds(lower: &Array1<f64>, upper: &Array1<f64>) -> Result<Array2<f64>> {
    Ok(ndarray::stack(Axis(0), &[lower.view(), upper.view()])?)
}
