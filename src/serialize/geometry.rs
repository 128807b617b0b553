//! Recovery of error magnitudes from drawn error-bar segments.
//!
//! A container draws its bar collections x first, then y, one for each
//! direction it has errors in. Each collection's geometry is checked
//! against that direction: x-bars must be horizontal, y-bars vertical.
//! Zero-length bars fit either. Points with a non-finite coordinate are
//! gaps: they take no part in the checks and recover as NaN.

use ndarray::Array1;

use crate::error::{PlotStoreError, Result};
use crate::plot::{stack_bounds, ErrorAxis, ErrorbarContainer, Line2D, LineCollection, Segment};
use crate::store::AttrValue;

/// Error attributes recovered from a container, per direction.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct RecoveredErrors {
    pub(crate) xerr: Option<AttrValue>,
    pub(crate) yerr: Option<AttrValue>,
}

pub(crate) fn recover_errors(container: &ErrorbarContainer) -> Result<RecoveredErrors> {
    let line = container.data_line();
    let axes: Vec<ErrorAxis> = [
        (container.has_xerr(), ErrorAxis::X),
        (container.has_yerr(), ErrorAxis::Y),
    ]
    .into_iter()
    .filter_map(|(present, axis)| present.then_some(axis))
    .collect();

    let collections = container.barlinecols();
    if collections.len() != axes.len() {
        return Err(PlotStoreError::data(format!(
            "Expected {} sets of error bars, found {}",
            axes.len(),
            collections.len()
        )));
    }

    let mut recovered = RecoveredErrors::default();
    for (collection, axis) in collections.iter().zip(axes) {
        match classify(collection, line.len())? {
            Some(found) if found != axis => {
                return Err(PlotStoreError::data(format!(
                    "{:?} error bars are drawn along {:?}",
                    axis, found
                )));
            }
            _ => {}
        }
        let value = extents(collection, line, axis)?;
        match axis {
            ErrorAxis::X => recovered.xerr = Some(value),
            ErrorAxis::Y => recovered.yerr = Some(value),
        }
    }

    Ok(recovered)
}

/// Direction of a collection; `None` when every finite segment is a single point.
fn classify(collection: &LineCollection, n: usize) -> Result<Option<ErrorAxis>> {
    let segments = collection.segments();
    if segments.len() != n {
        return Err(PlotStoreError::data(format!(
            "Error bars have {} segments for {} data points",
            segments.len(),
            n
        )));
    }

    let finite = || segments.iter().filter(|segment| is_finite(segment));
    let horizontal = finite().all(|[start, end]| start[1] == end[1]);
    let vertical = finite().all(|[start, end]| start[0] == end[0]);

    match (horizontal, vertical) {
        (true, false) => Ok(Some(ErrorAxis::X)),
        (false, true) => Ok(Some(ErrorAxis::Y)),
        (true, true) => Ok(None),
        (false, false) => Err(PlotStoreError::data(
            "Unknown error-bar geometry: segments are neither horizontal nor vertical",
        )),
    }
}

fn is_finite(segment: &Segment) -> bool {
    segment.iter().flatten().all(|v| v.is_finite())
}

/// Lower and upper extents around each data point.
fn extents(collection: &LineCollection, line: &Line2D, axis: ErrorAxis) -> Result<AttrValue> {
    let (along, across) = match axis {
        ErrorAxis::X => (0, 1),
        ErrorAxis::Y => (1, 0),
    };
    let xy = line.xydata();
    let n = line.len();
    let mut lower = Array1::from_elem(n, f64::NAN);
    let mut upper = Array1::from_elem(n, f64::NAN);
    let mut symmetric = true;

    for (i, segment) in collection.segments().iter().enumerate() {
        let [start, end] = segment;
        let (centre, offset) = (xy[[i, along]], xy[[i, across]]);
        if !is_finite(segment) || !centre.is_finite() || !offset.is_finite() {
            continue;
        }
        if start[across] != offset || end[across] != offset {
            return Err(PlotStoreError::data(format!(
                "Error bar {} is not drawn through its data point",
                i
            )));
        }
        let lo = centre - start[along].min(end[along]);
        let hi = start[along].max(end[along]) - centre;
        if lo < 0.0 || hi < 0.0 {
            return Err(PlotStoreError::data(format!(
                "Error bar {} does not span its data point",
                i
            )));
        }
        symmetric &= nearly_equal(lo, hi, centre);
        lower[i] = lo;
        upper[i] = hi;
    }

    if symmetric {
        Ok(AttrValue::Array((&lower + &upper) / 2.0))
    } else {
        Ok(AttrValue::Matrix(stack_bounds(&lower, &upper)?))
    }
}

/// Equal up to the rounding of `centre ± extent`.
fn nearly_equal(lo: f64, hi: f64, centre: f64) -> bool {
    let scale = centre.abs() + lo.abs().max(hi.abs());
    (lo - hi).abs() <= 4.0 * f64::EPSILON * scale
}
