//! Line styles and markers, spelled the way matplotlib spells them.

use std::fmt;
use std::str::FromStr;

use crate::error::PlotStoreError;

/// Dash pattern of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// Solid line (`-`)
    #[default]
    Solid,
    /// Dashed line (`--`)
    Dashed,
    /// Alternating dash-dot pattern (`-.`)
    DashDot,
    /// Dotted line (`:`)
    Dotted,
    /// No line drawn (`None`)
    None,
}

impl LineStyle {
    /// Short format string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::DashDot => "-.",
            LineStyle::Dotted => ":",
            LineStyle::None => "None",
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineStyle {
    type Err = PlotStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            "-." | "dashdot" => Ok(LineStyle::DashDot),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "None" | "none" | "" | " " => Ok(LineStyle::None),
            other => Err(PlotStoreError::data(format!("Unknown line style '{}'", other))),
        }
    }
}

/// Marker drawn at each data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    /// No marker
    #[default]
    None,
    /// Point marker (`.`)
    Point,
    /// Circle marker (`o`)
    Circle,
    /// Square marker (`s`)
    Square,
    /// Upward-pointing triangle (`^`)
    Triangle,
    /// Downward-pointing triangle (`v`)
    TriangleDown,
    /// Diamond marker (`D`)
    Diamond,
    /// Plus sign (`+`)
    Plus,
    /// X/Cross marker (`x`)
    Cross,
    /// Star marker (`*`)
    Star,
    /// Pentagon marker (`p`)
    Pentagon,
    /// Hexagon marker (`h`)
    Hexagon,
    /// Vertical line (`|`), used for x-error caps
    VLine,
    /// Horizontal line (`_`), used for y-error caps
    HLine,
}

impl Marker {
    /// Short format string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::None => "None",
            Marker::Point => ".",
            Marker::Circle => "o",
            Marker::Square => "s",
            Marker::Triangle => "^",
            Marker::TriangleDown => "v",
            Marker::Diamond => "D",
            Marker::Plus => "+",
            Marker::Cross => "x",
            Marker::Star => "*",
            Marker::Pentagon => "p",
            Marker::Hexagon => "h",
            Marker::VLine => "|",
            Marker::HLine => "_",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Marker {
    type Err = PlotStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" | "none" | "" | " " => Ok(Marker::None),
            "." => Ok(Marker::Point),
            "o" => Ok(Marker::Circle),
            "s" => Ok(Marker::Square),
            "^" => Ok(Marker::Triangle),
            "v" => Ok(Marker::TriangleDown),
            "D" | "d" => Ok(Marker::Diamond),
            "+" => Ok(Marker::Plus),
            "x" | "X" => Ok(Marker::Cross),
            "*" => Ok(Marker::Star),
            "p" => Ok(Marker::Pentagon),
            "h" | "H" => Ok(Marker::Hexagon),
            "|" => Ok(Marker::VLine),
            "_" => Ok(Marker::HLine),
            other => Err(PlotStoreError::data(format!("Unknown marker '{}'", other))),
        }
    }
}
