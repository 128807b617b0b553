//! Axes and figures: the entry points that create plot elements.

use ndarray::Array1;

use crate::error::{PlotStoreError, Result};
use crate::plot::color::{cycle_color, Color};
use crate::plot::data::IntoPlotData;
use crate::plot::errorbar::{ErrorBars, ErrorbarContainer};
use crate::plot::handle::Handle;
use crate::plot::line::Line2D;
use crate::plot::style::{LineStyle, Marker};

/// A single plot area holding the elements drawn on it.
#[derive(Debug, Default)]
pub struct Axes {
    /// Elements in drawing order
    artists: Vec<Handle>,
    /// Current color cycle index
    color_index: usize,
}

impl Axes {
    /// Create an empty axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a line plot.
    pub fn plot(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> LineBuilder<'_> {
        LineBuilder {
            axes: self,
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            style: StyleOptions::default(),
        }
    }

    /// Start an error-bar plot.
    pub fn errorbar(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> ErrorbarBuilder<'_> {
        ErrorbarBuilder {
            axes: self,
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            xerr: None,
            yerr: None,
            capsize: 0.0,
            style: StyleOptions::default(),
        }
    }

    /// Elements drawn so far.
    pub fn artists(&self) -> &[Handle] {
        &self.artists
    }

    /// Remove all elements and restart the color cycle.
    pub fn clear(&mut self) {
        self.artists.clear();
        self.color_index = 0;
    }

    fn next_color(&mut self) -> Color {
        let color = cycle_color(self.color_index);
        self.color_index += 1;
        color
    }

    fn add(&mut self, handle: Handle) -> Handle {
        self.artists.push(handle.clone());
        handle
    }

    fn styled_line(&mut self, x: Array1<f64>, y: Array1<f64>, style: StyleOptions) -> Result<Line2D> {
        if x.len() != y.len() {
            return Err(PlotStoreError::data(format!(
                "x and y must have the same length, got {} and {}",
                x.len(),
                y.len()
            )));
        }
        let color = match style.color {
            Some(color) => color,
            None => self.next_color(),
        };
        Ok(Line2D::new(x, y)
            .with_color(color)
            .with_linestyle(style.linestyle.unwrap_or_default())
            .with_marker(style.marker.unwrap_or_default())
            .with_label(style.label))
    }
}

#[derive(Debug, Default)]
struct StyleOptions {
    color: Option<Color>,
    linestyle: Option<LineStyle>,
    marker: Option<Marker>,
    label: Option<String>,
}

/// Builder for line plots.
#[derive(Debug)]
pub struct LineBuilder<'a> {
    axes: &'a mut Axes,
    x: Array1<f64>,
    y: Array1<f64>,
    style: StyleOptions,
}

impl<'a> LineBuilder<'a> {
    /// Set the color instead of taking the next one from the cycle.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.style.color = Some(color.into());
        self
    }

    /// Set the line style.
    pub fn linestyle(mut self, linestyle: LineStyle) -> Self {
        self.style.linestyle = Some(linestyle);
        self
    }

    /// Set the marker drawn at each point.
    pub fn marker(mut self, marker: Marker) -> Self {
        self.style.marker = Some(marker);
        self
    }

    /// Set the legend label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.style.label = Some(label.into());
        self
    }

    /// Draw the line. The handle is a group holding the one new line.
    pub fn build(self) -> Result<Handle> {
        let line = self.axes.styled_line(self.x, self.y, self.style)?;
        Ok(self.axes.add(Handle::Group(vec![Handle::Line(line)])))
    }
}

/// Builder for error-bar plots.
#[derive(Debug)]
pub struct ErrorbarBuilder<'a> {
    axes: &'a mut Axes,
    x: Array1<f64>,
    y: Array1<f64>,
    xerr: Option<ErrorBars>,
    yerr: Option<ErrorBars>,
    capsize: f64,
    style: StyleOptions,
}

impl<'a> ErrorbarBuilder<'a> {
    /// Set the x-errors: shape (N,) or (2, N).
    pub fn xerr(mut self, err: impl Into<ErrorBars>) -> Self {
        self.xerr = Some(err.into());
        self
    }

    /// Set the y-errors: shape (N,) or (2, N).
    pub fn yerr(mut self, err: impl Into<ErrorBars>) -> Self {
        self.yerr = Some(err.into());
        self
    }

    /// Length of the bar caps; zero draws none.
    pub fn capsize(mut self, capsize: f64) -> Self {
        self.capsize = capsize;
        self
    }

    /// Set the color instead of taking the next one from the cycle.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.style.color = Some(color.into());
        self
    }

    /// Set the line style.
    pub fn linestyle(mut self, linestyle: LineStyle) -> Self {
        self.style.linestyle = Some(linestyle);
        self
    }

    /// Set the marker drawn at each point.
    pub fn marker(mut self, marker: Marker) -> Self {
        self.style.marker = Some(marker);
        self
    }

    /// Set the legend label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.style.label = Some(label.into());
        self
    }

    /// Draw the data line and its error bars.
    pub fn build(self) -> Result<Handle> {
        let n = self.x.len();
        for err in [&self.xerr, &self.yerr].into_iter().flatten() {
            err.validate(n)?;
        }
        let line = self.axes.styled_line(self.x, self.y, self.style)?;
        let container = ErrorbarContainer::new(
            line,
            self.xerr.as_ref(),
            self.yerr.as_ref(),
            self.capsize,
        );
        Ok(self.axes.add(Handle::Errorbar(container)))
    }
}

/// A figure owning one or more axes, with a current axes.
#[derive(Debug)]
pub struct Figure {
    axes: Vec<Axes>,
    current: usize,
}

impl Figure {
    /// Create a figure with a single axes.
    pub fn new() -> Self {
        Self {
            axes: vec![Axes::new()],
            current: 0,
        }
    }

    /// Get the current axes.
    pub fn gca(&mut self) -> &mut Axes {
        &mut self.axes[self.current]
    }

    /// Add an axes and make it current. Returns its index.
    pub fn add_axes(&mut self) -> usize {
        self.axes.push(Axes::new());
        self.current = self.axes.len() - 1;
        self.current
    }

    /// Make the axes at `index` current.
    pub fn sca(&mut self, index: usize) -> Result<()> {
        if index >= self.axes.len() {
            return Err(PlotStoreError::data(format!(
                "Figure has {} axes, no index {}",
                self.axes.len(),
                index
            )));
        }
        self.current = index;
        Ok(())
    }

    /// All axes, in creation order.
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}
