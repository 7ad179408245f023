//! Loose object storage: read and write zlib-compressed objects.
//!
//! Each loose object lives at `<objects>/XX/YYYY...` where `XX` is the first
//! byte of the id in hex and `YYYY...` is the remaining 38 hex characters.
//! The file content is the zlib-compressed framed object
//! `"<type> <size>\0<payload>"`.
//!
//! # Consistency
//!
//! Writes are content-addressed and therefore idempotent. A new object is
//! written to a temporary file in the objects directory and renamed into
//! place, so readers see either no file or the complete file. Two writers
//! racing on the same id both succeed: whichever rename lands second finds
//! the object already present and discards its temporary file. No locks are
//! taken.

pub mod compress;
mod prefix;
mod read;
mod write;

pub use compress::CompressError;
pub use prefix::MIN_PREFIX_LEN;

use std::path::{Path, PathBuf};

use bstr::{BString, ByteSlice};
use tinygit_hash::ObjectId;
use tinygit_object::{Object, ObjectError, ObjectType};

/// Interface to a loose object directory.
#[derive(Debug, Clone)]
pub struct LooseObjectStore {
    /// Path to the objects directory.
    objects_dir: PathBuf,
    /// Zlib compression level for new objects.
    compression_level: flate2::Compression,
}

impl LooseObjectStore {
    /// Open the loose object store rooted at `objects_dir`.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
            compression_level: flate2::Compression::default(),
        }
    }

    /// Set the zlib compression level (0–9; higher values are clamped).
    pub fn set_compression_level(&mut self, level: u32) {
        self.compression_level = flate2::Compression::new(level.min(9));
    }

    pub fn compression_level(&self) -> u32 {
        self.compression_level.level()
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Get the file path for a given id.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.loose_path())
    }
}

/// An object as stored: its type token and payload, not yet interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    pub kind: BString,
    pub data: Vec<u8>,
}

impl RawObject {
    /// The typed kind, if this store models it.
    pub fn object_type(&self) -> Result<ObjectType, ObjectError> {
        ObjectType::from_bytes(self.kind.as_bytes())
    }

    /// Decode into a blob or tree.
    pub fn into_object(self) -> Result<Object, ObjectError> {
        Object::parse_content(self.object_type()?, &self.data)
    }
}

/// Type and size from an object header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub kind: BString,
    pub size: usize,
}

/// Errors from loose object operations.
#[derive(Debug, thiserror::Error)]
pub enum LooseError {
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("corrupt zlib stream in object {oid}: {source}")]
    CorruptStream {
        oid: ObjectId,
        #[source]
        source: CompressError,
    },

    #[error("object store unavailable at {path}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("hash mismatch for {path}: expected {expected}, got {actual}")]
    HashMismatch {
        path: PathBuf,
        expected: ObjectId,
        actual: ObjectId,
    },

    #[error("ambiguous object name: prefix '{0}' matches multiple objects")]
    AmbiguousPrefix(String),

    #[error("not a valid object name: '{0}'")]
    InvalidName(String),

    #[error(transparent)]
    Object(#[from] ObjectError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_path_uses_fanout() {
        let store = LooseObjectStore::open("/tmp/objects");
        let oid = ObjectId::from_hex("e69de29bb2d1d6434b8b29ae775ad8c2e48c5391").unwrap();
        assert_eq!(
            store.object_path(&oid),
            PathBuf::from("/tmp/objects/e6/9de29bb2d1d6434b8b29ae775ad8c2e48c5391")
        );
    }

    #[test]
    fn compression_level_is_clamped() {
        let mut store = LooseObjectStore::open("/tmp/objects");
        assert_eq!(store.compression_level(), 6);
        store.set_compression_level(1);
        assert_eq!(store.compression_level(), 1);
        store.set_compression_level(42);
        assert_eq!(store.compression_level(), 9);
    }

    #[test]
    fn raw_object_typing() {
        let raw = RawObject {
            kind: "tree".into(),
            data: Vec::new(),
        };
        assert_eq!(raw.object_type().unwrap(), ObjectType::Tree);
        assert!(matches!(
            raw.into_object().unwrap(),
            Object::Tree(t) if t.is_empty()
        ));

        let raw = RawObject {
            kind: "commit".into(),
            data: Vec::new(),
        };
        assert!(matches!(
            raw.into_object(),
            Err(ObjectError::UnknownType(_))
        ));
    }
}
