//! The persisted form of a plot element.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{PlotStoreError, Result};

/// Attribute mapping attached to a record.
pub type Attributes = BTreeMap<String, AttrValue>;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAttr", into = "RawAttr")]
pub enum AttrValue {
    /// Text.
    Str(String),
    /// Scalar number.
    Float(f64),
    /// List of text values.
    Strings(Vec<String>),
    /// One-dimensional array, shape (N,).
    Array(Array1<f64>),
    /// Two-dimensional array, e.g. shape (2, N) for asymmetric errors.
    Matrix(Array2<f64>),
}

impl AttrValue {
    /// The text, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is a `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Shape of the value as stored (empty for scalars).
    pub fn shape(&self) -> Vec<usize> {
        match self {
            AttrValue::Str(_) | AttrValue::Float(_) => Vec::new(),
            AttrValue::Strings(v) => vec![v.len()],
            AttrValue::Array(a) => vec![a.len()],
            AttrValue::Matrix(m) => m.shape().to_vec(),
        }
    }

    /// Short type name, for listings.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Str(_) => "str",
            AttrValue::Float(_) => "float",
            AttrValue::Strings(_) => "str[]",
            AttrValue::Array(_) => "float[]",
            AttrValue::Matrix(_) => "float[][]",
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(v: Vec<String>) -> Self {
        AttrValue::Strings(v)
    }
}

impl From<Array1<f64>> for AttrValue {
    fn from(a: Array1<f64>) -> Self {
        AttrValue::Array(a)
    }
}

impl From<Array2<f64>> for AttrValue {
    fn from(m: Array2<f64>) -> Self {
        AttrValue::Matrix(m)
    }
}

/// Plain JSON shape of an attribute. Variant order decides how untagged
/// values are matched. JSON has no NaN or infinity; serde_json writes them
/// as `null`, which reads back as NaN.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawAttr {
    Float(Option<f64>),
    Str(String),
    Array(Vec<Option<f64>>),
    Strings(Vec<String>),
    Matrix(Vec<Vec<Option<f64>>>),
}

fn or_nan(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

impl TryFrom<RawAttr> for AttrValue {
    type Error = String;

    fn try_from(raw: RawAttr) -> std::result::Result<Self, Self::Error> {
        Ok(match raw {
            RawAttr::Float(v) => AttrValue::Float(or_nan(v)),
            RawAttr::Str(s) => AttrValue::Str(s),
            RawAttr::Array(v) => AttrValue::Array(v.into_iter().map(or_nan).collect()),
            RawAttr::Strings(v) => AttrValue::Strings(v),
            RawAttr::Matrix(rows) => {
                let nrows = rows.len();
                let ncols = rows.first().map_or(0, Vec::len);
                if rows.iter().any(|row| row.len() != ncols) {
                    return Err("matrix attribute has rows of different lengths".to_string());
                }
                let flat: Vec<f64> = rows.into_iter().flatten().map(or_nan).collect();
                let matrix = Array2::from_shape_vec((nrows, ncols), flat).map_err(|e| e.to_string())?;
                AttrValue::Matrix(matrix)
            }
        })
    }
}

impl From<AttrValue> for RawAttr {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Float(v) => RawAttr::Float(Some(v)),
            AttrValue::Str(s) => RawAttr::Str(s),
            AttrValue::Array(a) => RawAttr::Array(a.iter().copied().map(Some).collect()),
            AttrValue::Strings(v) => RawAttr::Strings(v),
            AttrValue::Matrix(m) => RawAttr::Matrix(
                m.outer_iter()
                    .map(|row| row.iter().copied().map(Some).collect())
                    .collect(),
            ),
        }
    }
}

/// Coordinates plus attributes: one stored plot element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    /// Coordinates, shape (N, 2).
    #[serde(with = "coords")]
    pub data: Array2<f64>,
    /// Styling and error attributes.
    #[serde(default)]
    pub attrs: Attributes,
}

impl Record {
    /// Create a record with no attributes. The array must have two columns.
    pub fn new(data: Array2<f64>) -> Result<Self> {
        if data.ncols() != 2 {
            return Err(PlotStoreError::data(format!(
                "Record data must have shape (N, 2), got {:?}",
                data.shape()
            )));
        }
        Ok(Self {
            data,
            attrs: Attributes::new(),
        })
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Get an attribute.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Get a text attribute.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(AttrValue::as_str)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    /// Whether the record has no points.
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }
}

/// (N, 2) arrays as a list of `[x, y]` pairs. `null` coordinates read as NaN.
mod coords {
    use ndarray::Array2;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(super) fn serialize<S: Serializer>(data: &Array2<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        let pairs: Vec<[f64; 2]> = data.outer_iter().map(|row| [row[0], row[1]]).collect();
        pairs.serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Array2<f64>, D::Error> {
        let pairs = Vec::<[Option<f64>; 2]>::deserialize(deserializer)?;
        let n = pairs.len();
        let flat: Vec<f64> = pairs
            .into_iter()
            .flatten()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Array2::from_shape_vec((n, 2), flat).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_record_requires_two_columns() {
        assert!(Record::new(Array2::zeros((3, 2))).is_ok());
        assert!(matches!(
            Record::new(Array2::zeros((3, 3))),
            Err(PlotStoreError::Data(_))
        ));
    }

    #[test]
    fn test_json_layout() {
        let mut record = Record::new(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        record.set("color", "r");
        record.set("yerr", array![[0.5, 0.5], [1.0, 1.0]]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["data"], serde_json::json!([[1.0, 2.0], [3.0, 4.0]]));
        assert_eq!(json["attrs"]["color"], "r");
        assert_eq!(json["attrs"]["yerr"], serde_json::json!([[0.5, 0.5], [1.0, 1.0]]));
    }

    #[test]
    fn test_attr_kinds_from_json() {
        let attrs: Attributes = serde_json::from_str(
            r#"{"a": 1.5, "b": "text", "c": [1.0, 2.0], "d": ["x", "y"], "e": [[1.0], [2.0]], "f": []}"#,
        )
        .unwrap();
        assert_eq!(attrs["a"], AttrValue::Float(1.5));
        assert_eq!(attrs["b"], AttrValue::from("text"));
        assert_eq!(attrs["c"], AttrValue::Array(array![1.0, 2.0]));
        assert_eq!(attrs["d"], AttrValue::Strings(vec!["x".into(), "y".into()]));
        assert_eq!(attrs["e"], AttrValue::Matrix(array![[1.0], [2.0]]));
        assert_eq!(attrs["f"].shape(), vec![0]);
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let result: std::result::Result<AttrValue, _> = serde_json::from_str("[[1.0, 2.0], [3.0]]");
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_values_read_back_as_nan() {
        let mut record = Record::new(array![[0.0, f64::NAN], [f64::INFINITY, 1.0]]).unwrap();
        record.set("yerr", array![0.5, f64::NAN]);
        record.set("offset", f64::NAN);
        record.set("bounds", array![[0.1, f64::NAN], [0.2, 0.3]]);

        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();

        assert_eq!(back.data[[0, 0]], 0.0);
        assert!(back.data[[0, 1]].is_nan());
        assert!(back.data[[1, 0]].is_nan());
        assert_eq!(back.data[[1, 1]], 1.0);
        match back.get("yerr") {
            Some(AttrValue::Array(a)) => {
                assert_eq!(a[0], 0.5);
                assert!(a[1].is_nan());
            }
            other => panic!("expected array, got {:?}", other),
        }
        assert!(back.get("offset").and_then(AttrValue::as_f64).unwrap().is_nan());
        match back.get("bounds") {
            Some(AttrValue::Matrix(m)) => {
                assert_eq!(m.shape(), &[2, 2]);
                assert!(m[[0, 1]].is_nan());
                assert_eq!(m[[1, 1]], 0.3);
            }
            other => panic!("expected matrix, got {:?}", other),
        }
    }
}
