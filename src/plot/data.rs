//! Conversion of caller data into plot coordinates.

use ndarray::{Array1, ArrayView1};

/// Trait for types that can be converted into plot data.
pub trait IntoPlotData {
    /// Convert into a one-dimensional f64 array.
    fn into_plot_data(self) -> Array1<f64>;
}

impl IntoPlotData for Array1<f64> {
    fn into_plot_data(self) -> Array1<f64> {
        self
    }
}

impl IntoPlotData for &Array1<f64> {
    fn into_plot_data(self) -> Array1<f64> {
        self.clone()
    }
}

impl IntoPlotData for ArrayView1<'_, f64> {
    fn into_plot_data(self) -> Array1<f64> {
        self.to_owned()
    }
}

impl IntoPlotData for Vec<f64> {
    fn into_plot_data(self) -> Array1<f64> {
        Array1::from(self)
    }
}

impl IntoPlotData for &Vec<f64> {
    fn into_plot_data(self) -> Array1<f64> {
        Array1::from(self.clone())
    }
}

impl IntoPlotData for &[f64] {
    fn into_plot_data(self) -> Array1<f64> {
        Array1::from(self.to_vec())
    }
}

impl IntoPlotData for Vec<f32> {
    fn into_plot_data(self) -> Array1<f64> {
        self.into_iter().map(f64::from).collect()
    }
}

impl IntoPlotData for Vec<i32> {
    fn into_plot_data(self) -> Array1<f64> {
        self.into_iter().map(f64::from).collect()
    }
}

impl<const N: usize> IntoPlotData for [f64; N] {
    fn into_plot_data(self) -> Array1<f64> {
        Array1::from(self.to_vec())
    }
}

impl<const N: usize> IntoPlotData for &[f64; N] {
    fn into_plot_data(self) -> Array1<f64> {
        Array1::from(self.to_vec())
    }
}
