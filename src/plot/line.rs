//! Line artists.

use ndarray::{Array1, Array2};

use crate::plot::color::Color;
use crate::plot::style::{LineStyle, Marker};

/// A line connecting data points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line2D {
    x: Array1<f64>,
    y: Array1<f64>,
    color: Color,
    linestyle: LineStyle,
    marker: Marker,
    label: Option<String>,
}

impl Line2D {
    /// Create a new line from x and y data of equal length.
    pub(crate) fn new(x: Array1<f64>, y: Array1<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Line2D {
            x,
            y,
            color: Color::default(),
            linestyle: LineStyle::Solid,
            marker: Marker::None,
            label: None,
        }
    }

    /// Set the line color.
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the line style.
    pub fn with_linestyle(mut self, linestyle: LineStyle) -> Self {
        self.linestyle = linestyle;
        self
    }

    /// Set the marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    /// Set the legend label.
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    /// X coordinates.
    pub fn xdata(&self) -> &Array1<f64> {
        &self.x
    }

    /// Y coordinates.
    pub fn ydata(&self) -> &Array1<f64> {
        &self.y
    }

    /// Coordinates as an (N, 2) array, one `[x, y]` row per point.
    pub fn xydata(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.x.len(), 2), |(i, j)| if j == 0 { self.x[i] } else { self.y[i] })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the line has no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Line color.
    pub fn color(&self) -> &Color {
        &self.color
    }

    /// Line style.
    pub fn linestyle(&self) -> LineStyle {
        self.linestyle
    }

    /// Marker.
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Legend label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A two-point segment `[[x0, y0], [x1, y1]]`.
pub type Segment = [[f64; 2]; 2];

/// A set of unconnected line segments sharing one color.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCollection {
    segments: Vec<Segment>,
    color: Color,
}

impl LineCollection {
    /// Create a collection from its segments.
    pub fn new(segments: Vec<Segment>, color: impl Into<Color>) -> Self {
        Self {
            segments,
            color: color.into(),
        }
    }

    /// The segments, in creation order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Collection color.
    pub fn color(&self) -> &Color {
        &self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_xydata_columns() {
        let line = Line2D::new(array![1.0, 2.0, 3.0], array![4.0, 5.0, 6.0]);
        let xy = line.xydata();
        assert_eq!(xy.shape(), &[3, 2]);
        assert_eq!(xy.column(0), array![1.0, 2.0, 3.0]);
        assert_eq!(xy.column(1), array![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_empty_line_has_two_columns() {
        let line = Line2D::new(Array1::zeros(0), Array1::zeros(0));
        assert!(line.is_empty());
        assert_eq!(line.xydata().shape(), &[0, 2]);
    }
}
