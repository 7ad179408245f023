//! Object model for the tinygit store: framing, blobs and trees.
//!
//! An object is framed as `"<type> <size>\0<payload>"` before it is hashed
//! and compressed. [`header`] owns that framing; [`Tree`] and
//! [`TreeEntries`] decode tree payloads. Only `blob` and `tree` objects have
//! typed representations.

mod blob;
pub mod header;
mod tree;

pub use blob::Blob;
pub use tree::{EntryField, FileMode, Tree, TreeEntries, TreeEntry};

use bstr::{BString, ByteSlice};
use tinygit_hash::{HashError, Hasher, ObjectId};

/// Errors produced by object operations.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    /// A type token that cannot be framed.
    #[error("invalid object type: {0:?}")]
    InvalidType(BString),

    /// A well-formed type token this store has no model for.
    #[error("unsupported object type: {0}")]
    UnknownType(BString),

    #[error("malformed object header: {0}")]
    MalformedHeader(String),

    #[error("object length mismatch: header declares {declared} bytes, payload has {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("truncated tree entry at offset {offset}: payload ended while reading {field}")]
    TruncatedEntry { offset: usize, field: EntryField },

    #[error("invalid tree entry at offset {offset}: {reason}")]
    InvalidTreeEntry { offset: usize, reason: &'static str },

    #[error("invalid file mode: {0:?}")]
    InvalidFileMode(BString),

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// The object types this store models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
}

impl ObjectType {
    /// Parse from the type token in object headers.
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"blob" => Ok(Self::Blob),
            b"tree" => Ok(Self::Tree),
            _ => Err(ObjectError::UnknownType(BString::from(s))),
        }
    }

    /// The canonical type token.
    pub fn as_bytes(&self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = ObjectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

/// A decoded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
}

impl Object {
    /// Parse from framed bytes (header + payload).
    pub fn parse(data: &[u8]) -> Result<Self, ObjectError> {
        let (kind, payload) = header::unframe(data)?;
        Self::parse_content(ObjectType::from_bytes(kind.as_bytes())?, payload)
    }

    /// Parse a payload whose type is already known.
    pub fn parse_content(obj_type: ObjectType, content: &[u8]) -> Result<Self, ObjectError> {
        match obj_type {
            ObjectType::Blob => Ok(Self::Blob(Blob::parse(content))),
            ObjectType::Tree => Ok(Self::Tree(Tree::parse(content)?)),
        }
    }

    /// Framed form: header + payload.
    pub fn serialize(&self) -> Vec<u8> {
        let content = self.serialize_content();
        let mut out = format!("{} {}\0", self.object_type(), content.len()).into_bytes();
        out.extend_from_slice(&content);
        out
    }

    /// Payload only.
    pub fn serialize_content(&self) -> Vec<u8> {
        match self {
            Self::Blob(b) => b.serialize_content().to_vec(),
            Self::Tree(t) => t.serialize_content(),
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Blob(_) => ObjectType::Blob,
            Self::Tree(_) => ObjectType::Tree,
        }
    }

    /// The id this object would be stored under.
    pub fn compute_oid(&self) -> ObjectId {
        Hasher::hash_object(self.object_type().as_bytes(), &self.serialize_content())
    }
}
