//! Color definitions.

use std::fmt;

/// Color of a plot element.
///
/// The `Display` form is the string stored alongside the plot data:
/// `#rrggbb`, `#rrggbbaa`, or the name as given.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// RGB color with values 0-255
    Rgb(u8, u8, u8),
    /// RGBA color with alpha 0.0-1.0
    Rgba(u8, u8, u8, f64),
    /// Named color (e.g., "red", "r", "C0")
    Named(String),
}

/// Default color cycle (C0-C9).
const CYCLE: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

impl Color {
    /// Create a new RGB color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    /// Create a new RGBA color.
    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color::Rgba(r, g, b, a.clamp(0.0, 1.0))
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::Rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)? as f64 / 255.0,
            )),
            _ => None,
        }
    }

    /// Get the alpha value (opacity) of the color.
    pub fn alpha(&self) -> f64 {
        match self {
            Color::Rgba(_, _, _, a) => *a,
            Color::Rgb(..) | Color::Named(_) => 1.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        cycle_color(0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Color::Rgba(r, g, b, a) => {
                let a = (a.clamp(0.0, 1.0) * 255.0).round() as u8;
                write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
            }
            Color::Named(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            Color::from_hex(s).unwrap_or_else(|| Color::Named(s.to_string()))
        } else {
            Color::Named(s.to_string())
        }
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color::from(s.as_str())
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::Rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, f64)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, f64)) -> Self {
        Color::rgba(r, g, b, a)
    }
}

/// Get a color from the default color cycle by index.
pub fn cycle_color(index: usize) -> Color {
    let (r, g, b) = CYCLE[index % CYCLE.len()];
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_display_parses_back() {
        let color = Color::rgb(0x1f, 0x77, 0xb4);
        assert_eq!(color.to_string(), "#1f77b4");
        assert_eq!(Color::from(color.to_string()), color);
    }

    #[test]
    fn test_named_color_kept_verbatim() {
        assert_eq!(Color::from("r"), Color::Named("r".to_string()));
        assert_eq!(Color::from("tab:blue").to_string(), "tab:blue");
    }

    #[test]
    fn test_rgba_from_hex() {
        let color = Color::from("#ff000080");
        assert!(matches!(color, Color::Rgba(255, 0, 0, _)));
        assert!((color.alpha() - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(color.to_string(), "#ff000080");
    }

    #[test]
    fn test_invalid_hex_becomes_name() {
        assert_eq!(Color::from("#zz"), Color::Named("#zz".to_string()));
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle_color(0), cycle_color(10));
        assert_eq!(cycle_color(3).to_string(), "#d62728");
    }
}
