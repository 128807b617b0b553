//! Handles returned by plotting calls.

use crate::plot::errorbar::ErrorbarContainer;
use crate::plot::line::{Line2D, LineCollection};

/// A reference to a plotted element.
#[derive(Debug, Clone, PartialEq)]
pub enum Handle {
    /// A single line.
    Line(Line2D),
    /// The artists of one error-bar call.
    Errorbar(ErrorbarContainer),
    /// A bare set of segments.
    Collection(LineCollection),
    /// Several handles, as returned by [`Axes::plot`](crate::plot::Axes::plot).
    Group(Vec<Handle>),
}

impl Handle {
    /// Human-readable kind, used in error messages.
    pub fn kind(&self) -> String {
        match self {
            Handle::Line(_) => "Line2D".to_string(),
            Handle::Errorbar(_) => "ErrorbarContainer".to_string(),
            Handle::Collection(_) => "LineCollection".to_string(),
            Handle::Group(items) => format!("group of {} handles", items.len()),
        }
    }

    /// The line, when this handle is one (or a group holding only one).
    pub fn as_line(&self) -> Option<&Line2D> {
        match self {
            Handle::Line(line) => Some(line),
            Handle::Group(items) if items.len() == 1 => items[0].as_line(),
            _ => None,
        }
    }

    /// The error-bar container, when this handle is one (or a group holding only one).
    pub fn as_errorbar(&self) -> Option<&ErrorbarContainer> {
        match self {
            Handle::Errorbar(container) => Some(container),
            Handle::Group(items) if items.len() == 1 => items[0].as_errorbar(),
            _ => None,
        }
    }
}

impl From<Line2D> for Handle {
    fn from(line: Line2D) -> Self {
        Handle::Line(line)
    }
}

impl From<ErrorbarContainer> for Handle {
    fn from(container: ErrorbarContainer) -> Self {
        Handle::Errorbar(container)
    }
}

impl From<LineCollection> for Handle {
    fn from(collection: LineCollection) -> Self {
        Handle::Collection(collection)
    }
}
