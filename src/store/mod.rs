//! Storage containers for records.
//!
//! Two backends implement [`Store`]: [`NcStore`] writes netCDF-4 files
//! (HDF5 on disk) and [`MemoryStore`] keeps a nested mapping that can be
//! persisted as JSON. [`Container`] picks one of them.

mod file;
mod key;
mod memory;
mod record;

pub use file::NcStore;
pub use key::DatasetKey;
pub use memory::{MemoryStore, Node};
pub use record::{AttrValue, Attributes, Record};

use std::path::{Path, PathBuf};

use crate::error::Result;

/// A hierarchical container of records addressed by slash-separated keys.
pub trait Store {
    /// Store `record` under `key`. The key must not be the root or an existing entry.
    fn write_record(&mut self, key: &str, record: &Record) -> Result<()>;

    /// Read the record stored under `key`.
    fn read_record(&self, key: &str) -> Result<Record>;

    /// Whether a record is stored under `key`.
    fn contains(&self, key: &str) -> bool;

    /// Paths of all records, each starting with `/`.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Storage backend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// NetCDF-4 / HDF5 file.
    File,
    /// Nested mapping, persisted as JSON.
    Memory,
}

impl Backend {
    /// Choose a backend from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension.to_ascii_lowercase().as_str() {
            "json" => Backend::Memory,
            "nc" | "nc4" | "netcdf" | "h5" | "hdf5" => Backend::File,
            _ => Backend::File,
        }
    }
}

/// A store chosen at runtime.
#[derive(Debug)]
pub enum Container {
    /// File-backed store.
    File(NcStore),
    /// Nested mapping, with the JSON file it is saved to (if any).
    Memory {
        /// The records.
        store: MemoryStore,
        /// Where [`Container::save`] writes.
        path: Option<PathBuf>,
    },
}

impl Container {
    /// An empty nested mapping that is never written to disk.
    pub fn in_memory() -> Self {
        Container::Memory {
            store: MemoryStore::new(),
            path: None,
        }
    }

    /// Create an empty container at `path`, replacing any existing file.
    pub fn create(path: &Path) -> Result<Self> {
        match Backend::from_path(path) {
            Backend::File => Ok(Container::File(NcStore::create(path)?)),
            Backend::Memory => Ok(Container::Memory {
                store: MemoryStore::new(),
                path: Some(path.to_path_buf()),
            }),
        }
    }

    /// Open an existing container at `path` for reading and writing.
    pub fn open(path: &Path) -> Result<Self> {
        match Backend::from_path(path) {
            Backend::File => Ok(Container::File(NcStore::open(path)?)),
            Backend::Memory => Ok(Container::Memory {
                store: MemoryStore::load(path)?,
                path: Some(path.to_path_buf()),
            }),
        }
    }

    /// Open an existing container at `path` for reading only.
    pub fn open_read(path: &Path) -> Result<Self> {
        match Backend::from_path(path) {
            Backend::File => Ok(Container::File(NcStore::open_read(path)?)),
            Backend::Memory => Ok(Container::Memory {
                store: MemoryStore::load(path)?,
                path: None,
            }),
        }
    }

    /// Which backend holds the records.
    pub fn backend(&self) -> Backend {
        match self {
            Container::File(_) => Backend::File,
            Container::Memory { .. } => Backend::Memory,
        }
    }

    /// Persist pending changes. File stores write through, so only a
    /// nested mapping with a path has anything to do.
    pub fn save(&self) -> Result<()> {
        match self {
            Container::Memory {
                store,
                path: Some(path),
            } => store.save(path),
            _ => Ok(()),
        }
    }

    fn inner(&self) -> &dyn Store {
        match self {
            Container::File(store) => store,
            Container::Memory { store, .. } => store,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Store {
        match self {
            Container::File(store) => store,
            Container::Memory { store, .. } => store,
        }
    }
}

impl Store for Container {
    fn write_record(&mut self, key: &str, record: &Record) -> Result<()> {
        self.inner_mut().write_record(key, record)
    }

    fn read_record(&self, key: &str) -> Result<Record> {
        self.inner().read_record(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.inner().contains(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.inner().keys()
    }
}
