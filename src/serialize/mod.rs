//! Dump plot handles into a store and restore them.
//!
//! A line is stored as its (N, 2) coordinates with `artist`, `color`,
//! `linestyle`, `marker` and `label` attributes. An error-bar group is
//! stored the same way for its data line, plus `xerr` / `yerr` recovered
//! from the drawn bars: shape (N,) when symmetric, (2, N) otherwise.

mod geometry;

use ndarray::Array1;

use crate::error::{PlotStoreError, Result};
use crate::plot::{Axes, ErrorBars, Figure, Handle, Line2D, LineStyle, Marker};
use crate::store::{AttrValue, Attributes, DatasetKey, Record, Store};

/// Attribute naming the kind of stored element.
pub const ATTR_ARTIST: &str = "artist";
/// Attribute holding the line color.
pub const ATTR_COLOR: &str = "color";
/// Attribute holding the line style.
pub const ATTR_LINESTYLE: &str = "linestyle";
/// Attribute holding the marker.
pub const ATTR_MARKER: &str = "marker";
/// Attribute holding the legend label.
pub const ATTR_LABEL: &str = "label";
/// Attribute holding x-errors.
pub const ATTR_XERR: &str = "xerr";
/// Attribute holding y-errors.
pub const ATTR_YERR: &str = "yerr";

/// `artist` value of a stored line.
pub const ARTIST_LINE: &str = "Line2D";
/// `artist` value of a stored error-bar group.
pub const ARTIST_ERRORBAR: &str = "ErrorbarContainer";

const RESERVED: [&str; 7] = [
    ATTR_ARTIST,
    ATTR_COLOR,
    ATTR_LINESTYLE,
    ATTR_MARKER,
    ATTR_LABEL,
    ATTR_XERR,
    ATTR_YERR,
];

/// Library and plot-model version strings.
pub fn info() -> Vec<String> {
    vec![
        format!("{}={}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        format!("plot={}", crate::plot::VERSION),
    ]
}

/// Store the data behind `handle` under `key`.
pub fn dump<S: Store + ?Sized>(store: &mut S, key: &str, handle: &Handle) -> Result<()> {
    dump_with(store, key, handle, &Attributes::new())
}

/// Store the data behind `handle` under `key`, with extra attributes.
///
/// Extra attributes using a reserved name are ignored.
pub fn dump_with<S: Store + ?Sized>(
    store: &mut S,
    key: &str,
    handle: &Handle,
    extra: &Attributes,
) -> Result<()> {
    DatasetKey::parse(key)?;

    let handle = match handle {
        Handle::Group(items) if items.len() == 1 => &items[0],
        other => other,
    };

    let mut record = match handle {
        Handle::Line(line) => line_record(line, line.label())?,
        Handle::Errorbar(container) => {
            let mut record = line_record(container.data_line(), container.label())?;
            record.set(ATTR_ARTIST, ARTIST_ERRORBAR);
            let errors = geometry::recover_errors(container)?;
            if let Some(xerr) = errors.xerr {
                record.set(ATTR_XERR, xerr);
            }
            if let Some(yerr) = errors.yerr {
                record.set(ATTR_YERR, yerr);
            }
            record
        }
        other => return Err(PlotStoreError::unsupported(other.kind())),
    };

    for (name, value) in extra {
        if RESERVED.contains(&name.as_str()) {
            tracing::warn!("Ignoring extra attribute '{}': the name is reserved", name);
            continue;
        }
        record.set(name.clone(), value.clone());
    }

    tracing::debug!("Dumping {} as {}", key, handle.kind());
    store.write_record(key, &record)
}

fn line_record(line: &Line2D, label: Option<&str>) -> Result<Record> {
    let mut record = Record::new(line.xydata())?;
    record.set(ATTR_ARTIST, ARTIST_LINE);
    record.set(ATTR_COLOR, line.color().to_string());
    record.set(ATTR_LINESTYLE, line.linestyle().as_str());
    record.set(ATTR_MARKER, line.marker().as_str());
    if let Some(label) = label {
        record.set(ATTR_LABEL, label);
    }
    Ok(record)
}

/// Redraw the element stored under `key` on `axes`.
pub fn restore<S: Store + ?Sized>(store: &S, key: &str, axes: &mut Axes) -> Result<Handle> {
    let record = store.read_record(key)?;
    let x = record.data.column(0).to_owned();
    let y = record.data.column(1).to_owned();
    let style = Style::from_record(&record)?;

    match record.get_str(ATTR_ARTIST) {
        Some(ARTIST_LINE) => {
            let mut builder = axes.plot(x, y);
            if let Some(color) = style.color {
                builder = builder.color(color);
            }
            if let Some(linestyle) = style.linestyle {
                builder = builder.linestyle(linestyle);
            }
            if let Some(marker) = style.marker {
                builder = builder.marker(marker);
            }
            if let Some(label) = style.label {
                builder = builder.label(label);
            }
            builder.build()
        }
        Some(ARTIST_ERRORBAR) => {
            let mut builder = axes.errorbar(x, y);
            if let Some(xerr) = error_bars(&record, ATTR_XERR)? {
                builder = builder.xerr(xerr);
            }
            if let Some(yerr) = error_bars(&record, ATTR_YERR)? {
                builder = builder.yerr(yerr);
            }
            if let Some(color) = style.color {
                builder = builder.color(color);
            }
            if let Some(linestyle) = style.linestyle {
                builder = builder.linestyle(linestyle);
            }
            if let Some(marker) = style.marker {
                builder = builder.marker(marker);
            }
            if let Some(label) = style.label {
                builder = builder.label(label);
            }
            builder.build()
        }
        _ => Err(PlotStoreError::data(format!(
            "Data-set '{}' not interpretable. Please consider filing a bug-report",
            key
        ))),
    }
}

/// Redraw the element stored under `key` on the figure's current axes.
pub fn restore_current<S: Store + ?Sized>(store: &S, key: &str, figure: &mut Figure) -> Result<Handle> {
    restore(store, key, figure.gca())
}

struct Style {
    color: Option<String>,
    linestyle: Option<LineStyle>,
    marker: Option<Marker>,
    label: Option<String>,
}

impl Style {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            color: record.get_str(ATTR_COLOR).map(str::to_string),
            linestyle: record.get_str(ATTR_LINESTYLE).map(str::parse::<LineStyle>).transpose()?,
            marker: record.get_str(ATTR_MARKER).map(str::parse::<Marker>).transpose()?,
            label: record.get_str(ATTR_LABEL).map(str::to_string),
        })
    }
}

fn error_bars(record: &Record, name: &str) -> Result<Option<ErrorBars>> {
    match record.get(name) {
        None => Ok(None),
        Some(AttrValue::Array(err)) => Ok(Some(ErrorBars::Symmetric(err.clone()))),
        Some(AttrValue::Matrix(err)) => Ok(Some(ErrorBars::Asymmetric(err.clone()))),
        Some(AttrValue::Float(err)) => Ok(Some(ErrorBars::Symmetric(Array1::from_elem(
            record.len(),
            *err,
        )))),
        Some(other) => Err(PlotStoreError::data(format!(
            "Attribute '{}' must be numeric, got {}",
            name,
            other.type_name()
        ))),
    }
}
