//! NetCDF-4 (HDF5) file store.
//!
//! A key `a/b/curve` is stored as the f64 variable `curve` in group `a/b`,
//! with dimensions `curve_points` and `curve_xy`. Record attributes become
//! variable attributes. NetCDF attributes are one-dimensional, so a matrix
//! attribute `m` is written flattened (row-major) next to an int attribute
//! `m_shape` holding its dimensions, and reassembled on read.

use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2};
use netcdf::AttributeValue;

use super::{AttrValue, Attributes, DatasetKey, Record, Store};
use crate::error::{PlotStoreError, Result};

const SHAPE_SUFFIX: &str = "_shape";

enum FileHandle {
    Read(netcdf::File),
    Write(netcdf::FileMut),
}

/// Records stored in a netCDF-4 file.
pub struct NcStore {
    file: FileHandle,
    path: PathBuf,
}

impl std::fmt::Debug for NcStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NcStore")
            .field("path", &self.path)
            .field("writable", &matches!(self.file, FileHandle::Write(_)))
            .finish()
    }
}

impl NcStore {
    /// Create a new file, replacing any existing one.
    pub fn create(path: &Path) -> Result<Self> {
        let file = netcdf::create(path)?;
        tracing::info!("Created {}", path.display());
        Ok(Self {
            file: FileHandle::Write(file),
            path: path.to_path_buf(),
        })
    }

    /// Open an existing file for reading and writing.
    pub fn open(path: &Path) -> Result<Self> {
        let file = netcdf::append(path)?;
        Ok(Self {
            file: FileHandle::Write(file),
            path: path.to_path_buf(),
        })
    }

    /// Open an existing file read-only.
    pub fn open_read(path: &Path) -> Result<Self> {
        let file = netcdf::open(path)?;
        Ok(Self {
            file: FileHandle::Read(file),
            path: path.to_path_buf(),
        })
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reader(&self) -> &netcdf::File {
        match &self.file {
            FileHandle::Read(file) => file,
            FileHandle::Write(file) => &**file,
        }
    }

    fn writer(&mut self, key: &DatasetKey) -> Result<&mut netcdf::FileMut> {
        match &mut self.file {
            FileHandle::Write(file) => Ok(file),
            FileHandle::Read(_) => Err(PlotStoreError::invalid_target(
                key.to_string(),
                format!("{} is open read-only", self.path.display()),
            )),
        }
    }
}

impl Store for NcStore {
    fn write_record(&mut self, key: &str, record: &Record) -> Result<()> {
        let key = DatasetKey::parse(key)?;
        let path = key.path();
        let location = self.path.display().to_string();
        let file = self.writer(&key)?;

        // Lookups under a missing parent group are absent, not errors.
        let group_exists = file.group(&path).ok().flatten().is_some();
        if file.variable(&path).is_some() || group_exists {
            return Err(PlotStoreError::invalid_target(
                key.to_string(),
                "Dataset already exists",
            ));
        }

        // Intermediate groups, outermost first
        for depth in 1..=key.parents().len() {
            let group_path = key.parents()[..depth].join("/");
            if file.variable(&group_path).is_some() {
                return Err(PlotStoreError::invalid_target(
                    key.to_string(),
                    format!("'{}' is a record, not a group", key.parents()[depth - 1]),
                ));
            }
            if file.group(&group_path)?.is_none() {
                file.add_group(&group_path)?;
            }
        }

        let name = key.name();
        let points_dim = format!("{}_points", name);
        let xy_dim = format!("{}_xy", name);
        let in_group = |dim: &str| match key.parent_path() {
            Some(parent) => format!("{}/{}", parent, dim),
            None => dim.to_string(),
        };
        file.add_dimension(&in_group(&points_dim), record.len())?;
        file.add_dimension(&in_group(&xy_dim), 2)?;

        let mut var = file.add_variable::<f64>(&path, &[points_dim.as_str(), xy_dim.as_str()])?;
        if !record.is_empty() {
            let values: Vec<f64> = record.data.iter().copied().collect();
            var.put_values(&values, ..)?;
        }

        for (attr_name, value) in &record.attrs {
            match value {
                AttrValue::Str(s) => {
                    var.put_attribute(attr_name, AttributeValue::Str(s.clone()))?;
                }
                AttrValue::Float(v) => {
                    var.put_attribute(attr_name, AttributeValue::Double(*v))?;
                }
                AttrValue::Strings(v) => {
                    var.put_attribute(attr_name, AttributeValue::Strs(v.clone()))?;
                }
                AttrValue::Array(a) => {
                    var.put_attribute(attr_name, AttributeValue::Doubles(a.to_vec()))?;
                }
                AttrValue::Matrix(m) => {
                    let flat: Vec<f64> = m.iter().copied().collect();
                    let shape: Vec<i32> = m.shape().iter().map(|&d| d as i32).collect();
                    var.put_attribute(attr_name, AttributeValue::Doubles(flat))?;
                    var.put_attribute(
                        &format!("{}{}", attr_name, SHAPE_SUFFIX),
                        AttributeValue::Ints(shape),
                    )?;
                }
            }
        }

        tracing::debug!("Wrote {} ({} points) to {}", key, record.len(), location);
        Ok(())
    }

    fn read_record(&self, key: &str) -> Result<Record> {
        let key = DatasetKey::parse(key)?;
        let var = self
            .reader()
            .variable(&key.path())
            .ok_or_else(|| PlotStoreError::not_found(key.to_string()))?;

        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        if shape.len() != 2 || shape[1] != 2 {
            return Err(PlotStoreError::data(format!(
                "{} has shape {:?}, expected (N, 2)",
                key, shape
            )));
        }

        let values: Vec<f64> = if shape[0] == 0 {
            Vec::new()
        } else {
            var.get_values::<f64, _>(..)?
        };
        let mut record = Record::new(Array2::from_shape_vec((shape[0], 2), values)?)?;

        let mut raw = Vec::new();
        for attr in var.attributes() {
            raw.push((attr.name().to_string(), attr.value()?));
        }
        record.attrs = decode_attributes(raw)?;

        tracing::debug!("Read {} ({} points) from {}", key, record.len(), self.path.display());
        Ok(record)
    }

    fn contains(&self, key: &str) -> bool {
        DatasetKey::parse(key)
            .map(|key| self.reader().variable(&key.path()).is_some())
            .unwrap_or(false)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let file = self.reader();
        let mut keys: Vec<String> = file.variables().map(|var| format!("/{}", var.name())).collect();
        for group in file.groups()? {
            collect_group_keys(&group, "", &mut keys);
        }
        Ok(keys)
    }
}

fn collect_group_keys(group: &netcdf::Group<'_>, parent_path: &str, keys: &mut Vec<String>) {
    let group_path = format!("{}/{}", parent_path, group.name());
    for var in group.variables() {
        keys.push(format!("{}/{}", group_path, var.name()));
    }
    for child in group.groups() {
        collect_group_keys(&child, &group_path, keys);
    }
}

/// Convert netCDF attributes, folding `<name>_shape` companions back into matrices.
fn decode_attributes(raw: Vec<(String, AttributeValue)>) -> Result<Attributes> {
    let mut shapes = std::collections::HashMap::new();
    for (name, value) in &raw {
        if let (Some(base), AttributeValue::Ints(dims)) = (name.strip_suffix(SHAPE_SUFFIX), value) {
            shapes.insert(base.to_string(), (name.clone(), dims.clone()));
        }
    }

    let mut attrs = Attributes::new();
    let mut folded = Vec::new();
    for (name, value) in raw {
        if let (AttributeValue::Doubles(values), Some((companion, dims))) = (&value, shapes.get(&name)) {
            // A companion that does not describe this array leaves both as-is.
            if dims.len() == 2 && dims.iter().all(|&d| d >= 0) {
                let (rows, cols) = (dims[0] as usize, dims[1] as usize);
                if rows * cols == values.len() {
                    let matrix = Array2::from_shape_vec((rows, cols), values.clone())?;
                    folded.push(companion.clone());
                    attrs.insert(name, AttrValue::Matrix(matrix));
                    continue;
                }
            }
        }
        attrs.insert(name, attr_value(value));
    }

    for companion in folded {
        attrs.remove(&companion);
    }
    Ok(attrs)
}

fn attr_value(value: AttributeValue) -> AttrValue {
    fn array<T: Into<f64>>(values: Vec<T>) -> AttrValue {
        AttrValue::Array(values.into_iter().map(Into::into).collect::<Array1<f64>>())
    }

    match value {
        AttributeValue::Str(v) => AttrValue::Str(v),
        AttributeValue::Strs(v) => AttrValue::Strings(v),
        AttributeValue::Double(v) => AttrValue::Float(v),
        AttributeValue::Float(v) => AttrValue::Float(v.into()),
        AttributeValue::Uchar(v) => AttrValue::Float(v.into()),
        AttributeValue::Schar(v) => AttrValue::Float(v.into()),
        AttributeValue::Ushort(v) => AttrValue::Float(v.into()),
        AttributeValue::Short(v) => AttrValue::Float(v.into()),
        AttributeValue::Uint(v) => AttrValue::Float(v.into()),
        AttributeValue::Int(v) => AttrValue::Float(v.into()),
        AttributeValue::Ulonglong(v) => AttrValue::Float(v as f64),
        AttributeValue::Longlong(v) => AttrValue::Float(v as f64),
        AttributeValue::Doubles(v) => AttrValue::Array(Array1::from(v)),
        AttributeValue::Floats(v) => array(v),
        AttributeValue::Uchars(v) => array(v),
        AttributeValue::Schars(v) => array(v),
        AttributeValue::Ushorts(v) => array(v),
        AttributeValue::Shorts(v) => array(v),
        AttributeValue::Uints(v) => array(v),
        AttributeValue::Ints(v) => array(v),
        AttributeValue::Ulonglongs(v) => AttrValue::Array(v.into_iter().map(|x| x as f64).collect()),
        AttributeValue::Longlongs(v) => AttrValue::Array(v.into_iter().map(|x| x as f64).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_shape_companion_folds_into_matrix() {
        let raw = vec![
            ("xerr".to_string(), AttributeValue::Doubles(vec![1.0, 2.0, 3.0, 4.0])),
            ("xerr_shape".to_string(), AttributeValue::Ints(vec![2, 2])),
            ("color".to_string(), AttributeValue::Str("r".to_string())),
        ];
        let attrs = decode_attributes(raw).unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["xerr"], AttrValue::Matrix(array![[1.0, 2.0], [3.0, 4.0]]));
        assert_eq!(attrs["color"], AttrValue::from("r"));
    }

    #[test]
    fn test_mismatched_companion_kept() {
        let raw = vec![
            ("m".to_string(), AttributeValue::Doubles(vec![1.0, 2.0, 3.0])),
            ("m_shape".to_string(), AttributeValue::Ints(vec![2, 2])),
        ];
        let attrs = decode_attributes(raw).unwrap();
        assert_eq!(attrs["m"], AttrValue::Array(array![1.0, 2.0, 3.0]));
        assert_eq!(attrs["m_shape"], AttrValue::Array(array![2.0, 2.0]));
    }

    #[test]
    fn test_integer_attributes_widen() {
        assert_eq!(attr_value(AttributeValue::Int(3)), AttrValue::Float(3.0));
        assert_eq!(
            attr_value(AttributeValue::Shorts(vec![1, 2])),
            AttrValue::Array(array![1.0, 2.0])
        );
    }
}
