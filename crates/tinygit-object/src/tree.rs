use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use bstr::{BStr, BString, ByteSlice};
use tinygit_hash::{ObjectId, DIGEST_LEN};

use crate::ObjectError;

/// File mode for tree entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileMode {
    /// Regular file (100644)
    Regular,
    /// Executable file (100755)
    Executable,
    /// Symbolic link (120000)
    Symlink,
    /// Submodule link (160000)
    Gitlink,
    /// Subdirectory (40000)
    Tree,
    /// Any other octal mode
    Unknown(u32),
}

impl FileMode {
    /// Parse from octal ASCII bytes (e.g., `b"100644"`).
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        let raw = parse_octal(s)
            .ok_or_else(|| ObjectError::InvalidFileMode(BString::from(s)))?;
        Ok(Self::from_raw(raw))
    }

    /// Create from the raw numeric value.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0o100644 => Self::Regular,
            0o100755 => Self::Executable,
            0o120000 => Self::Symlink,
            0o160000 => Self::Gitlink,
            0o040000 => Self::Tree,
            other => Self::Unknown(other),
        }
    }

    /// Canonical octal form, without leading zeros (`40000` for trees).
    pub fn as_bytes(&self) -> BString {
        BString::from(format!("{:o}", self.raw()))
    }

    pub fn raw(&self) -> u32 {
        match self {
            Self::Regular => 0o100644,
            Self::Executable => 0o100755,
            Self::Symlink => 0o120000,
            Self::Gitlink => 0o160000,
            Self::Tree => 0o40000,
            Self::Unknown(v) => *v,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree)
    }

    pub fn is_gitlink(&self) -> bool {
        matches!(self, Self::Gitlink)
    }
}

fn parse_octal(s: &[u8]) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    s.iter().try_fold(0u32, |val, &b| {
        if !(b'0'..=b'7').contains(&b) {
            return None;
        }
        val.checked_mul(8)?.checked_add(u32::from(b - b'0'))
    })
}

/// The field a tree entry was being read into when the payload ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Mode,
    Name,
    Hash,
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mode => "mode",
            Self::Name => "name",
            Self::Hash => "hash",
        })
    }
}

/// A single entry in a tree object.
///
/// `mode` holds the exact bytes from the encoding so that unusual modes
/// (including zero-padded ones like `040000`) are written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: BString,
    pub name: BString,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn new(mode: FileMode, name: impl Into<BString>, oid: ObjectId) -> Self {
        Self {
            mode: mode.as_bytes(),
            name: name.into(),
            oid,
        }
    }

    /// Typed view of the mode, if it is valid octal.
    pub fn file_mode(&self) -> Option<FileMode> {
        FileMode::from_bytes(&self.mode).ok()
    }

    /// Whether this entry names a subdirectory.
    pub fn is_tree(&self) -> bool {
        self.file_mode().is_some_and(|m| m.is_tree())
    }

    /// Compare entries using the canonical tree order.
    ///
    /// Directories sort as if they have a trailing '/'. This means
    /// "foo" (dir) sorts after "foo.c" and "foo-bar" but before "foo0".
    pub fn cmp_entries(a: &TreeEntry, b: &TreeEntry) -> Ordering {
        base_name_compare(&a.name, a.is_tree(), &b.name, b.is_tree())
    }
}

/// After the common prefix, a directory name continues with an implicit '/'
/// and a file name with an implicit NUL.
fn base_name_compare(name1: &[u8], is_dir1: bool, name2: &[u8], is_dir2: bool) -> Ordering {
    let min_len = name1.len().min(name2.len());
    let cmp = name1[..min_len].cmp(&name2[..min_len]);
    if cmp != Ordering::Equal {
        return cmp;
    }
    let next = |name: &[u8], is_dir: bool| match name.get(min_len) {
        Some(&c) => c,
        None if is_dir => b'/',
        None => 0,
    };
    next(name1, is_dir1).cmp(&next(name2, is_dir2))
}

/// Lazy decoder over the entries of a tree payload.
///
/// Each entry is `<mode> SP <name> NUL <20 raw hash bytes>`. Entries are
/// yielded in payload order. After the first error the iterator is
/// exhausted.
#[derive(Debug, Clone)]
pub struct TreeEntries<'a> {
    data: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> TreeEntries<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            failed: false,
        }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn next_entry(&mut self) -> Result<TreeEntry, ObjectError> {
        let start = self.pos;
        let rest = &self.data[start..];

        let mode_len = rest.find_byte(b' ').ok_or(ObjectError::TruncatedEntry {
            offset: start,
            field: EntryField::Mode,
        })?;
        if mode_len == 0 {
            return Err(ObjectError::InvalidTreeEntry {
                offset: start,
                reason: "empty mode",
            });
        }
        let mode = &rest[..mode_len];

        let name_start = mode_len + 1;
        let name_len = rest[name_start..]
            .find_byte(0)
            .ok_or(ObjectError::TruncatedEntry {
                offset: start + name_start,
                field: EntryField::Name,
            })?;
        if name_len == 0 {
            return Err(ObjectError::InvalidTreeEntry {
                offset: start + name_start,
                reason: "empty name",
            });
        }
        let name = &rest[name_start..name_start + name_len];

        let oid_start = name_start + name_len + 1;
        let oid_bytes = rest
            .get(oid_start..oid_start + DIGEST_LEN)
            .ok_or(ObjectError::TruncatedEntry {
                offset: start + oid_start,
                field: EntryField::Hash,
            })?;

        self.pos = start + oid_start + DIGEST_LEN;
        Ok(TreeEntry {
            mode: BString::from(mode),
            name: BString::from(name),
            oid: ObjectId::from_bytes(oid_bytes)?,
        })
    }
}

impl Iterator for TreeEntries<'_> {
    type Item = Result<TreeEntry, ObjectError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.data.len() {
            return None;
        }
        let entry = self.next_entry();
        self.failed = entry.is_err();
        Some(entry)
    }
}

impl FusedIterator for TreeEntries<'_> {}

/// A tree object: a directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every entry of a tree payload, keeping payload order.
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let entries = TreeEntries::new(content).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Encode the tree, writing entries in canonical order.
    pub fn serialize_content(&self) -> Vec<u8> {
        let mut sorted: Vec<&TreeEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| TreeEntry::cmp_entries(a, b));

        let mut out = Vec::new();
        for entry in sorted {
            out.extend_from_slice(&entry.mode);
            out.push(b' ');
            out.extend_from_slice(&entry.name);
            out.push(0);
            out.extend_from_slice(entry.oid.as_bytes());
        }
        out
    }

    /// Sort entries in canonical order.
    pub fn sort(&mut self) {
        self.entries.sort_by(TreeEntry::cmp_entries);
    }

    /// First entry with the given name.
    pub fn find(&self, name: &BStr) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name.as_bstr() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
