//! Resolution of abbreviated object ids.

use std::fs;
use std::io;

use tinygit_hash::{hex, ObjectId, HEX_LEN};

use crate::{LooseError, LooseObjectStore};

/// Shortest abbreviation accepted by [`LooseObjectStore::resolve_prefix`].
pub const MIN_PREFIX_LEN: usize = 4;

impl LooseObjectStore {
    /// Expand a hex prefix into the unique stored id it names.
    ///
    /// A full 40-character id must exist. Shorter prefixes are matched by
    /// scanning the single fan-out directory they fall in.
    pub fn resolve_prefix(&self, prefix: &str) -> Result<ObjectId, LooseError> {
        if prefix.len() < MIN_PREFIX_LEN || !hex::is_hex_prefix(prefix) {
            return Err(LooseError::InvalidName(prefix.to_owned()));
        }

        if prefix.len() == HEX_LEN {
            let oid = ObjectId::from_hex(prefix)
                .map_err(|_| LooseError::InvalidName(prefix.to_owned()))?;
            return if self.contains(&oid) {
                Ok(oid)
            } else {
                Err(LooseError::ObjectNotFound(prefix.to_owned()))
            };
        }

        let lower = prefix.to_ascii_lowercase();
        let (dir_name, rest) = lower.split_at(2);
        let fanout = self.objects_dir.join(dir_name);

        let entries = match fs::read_dir(&fanout) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LooseError::ObjectNotFound(prefix.to_owned()));
            }
            Err(e) => return Err(LooseError::Io(e)),
        };

        let mut found: Option<ObjectId> = None;
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            // Temp files and other strays never parse as ids.
            if name.len() != HEX_LEN - 2 || !name.starts_with(rest) {
                continue;
            }
            let Ok(oid) = ObjectId::from_hex(&format!("{dir_name}{name}")) else {
                continue;
            };
            if found.replace(oid).is_some() {
                return Err(LooseError::AmbiguousPrefix(prefix.to_owned()));
            }
        }

        tracing::trace!(prefix, resolved = ?found, "resolved abbreviated id");
        found.ok_or_else(|| LooseError::ObjectNotFound(prefix.to_owned()))
    }
}
