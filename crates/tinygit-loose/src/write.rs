use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tinygit_hash::{Hasher, ObjectId};
use tinygit_object::{header, Object};

use crate::compress;
use crate::{LooseError, LooseObjectStore};

impl LooseObjectStore {
    /// Write an object to the loose store. Returns the id.
    pub fn write(&self, obj: &Object) -> Result<ObjectId, LooseError> {
        self.put(obj.object_type().as_bytes(), &obj.serialize_content())
    }

    /// Frame, hash, compress and store a payload under `kind`. Returns the id.
    ///
    /// No-op if the object already exists. The file appears atomically: it is
    /// written to a temp file next to the fan-out directories and linked into
    /// place without overwriting.
    pub fn put(&self, kind: &[u8], payload: &[u8]) -> Result<ObjectId, LooseError> {
        let framed = header::frame(kind, payload)?;
        let oid = Hasher::digest(&framed);

        if self.contains(&oid) {
            tracing::debug!(%oid, "object already stored");
            return Ok(oid);
        }

        let final_path = self.object_path(&oid);
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent).map_err(|source| LooseError::StoreUnavailable {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let compressed = compress::compress(&framed, self.compression_level)?;
        let tmp = write_to_temp(&self.objects_dir, &compressed)?;

        match tmp.persist_noclobber(&final_path) {
            Ok(_) => {
                tracing::debug!(%oid, size = payload.len(), "wrote loose object");
                Ok(oid)
            }
            // Another writer got there first with identical content.
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!(%oid, "lost write race; object already stored");
                Ok(oid)
            }
            Err(e) => Err(LooseError::StoreUnavailable {
                path: final_path,
                source: e.error,
            }),
        }
    }
}

/// Write compressed bytes into a fresh temp file under `objects_dir`.
fn write_to_temp(
    objects_dir: &Path,
    compressed: &[u8],
) -> Result<tempfile::NamedTempFile, LooseError> {
    let unavailable = |source| LooseError::StoreUnavailable {
        path: objects_dir.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix("tmp_obj_")
        .tempfile_in(objects_dir)
        .map_err(unavailable)?;
    tmp.write_all(compressed).map_err(unavailable)?;
    tmp.as_file().sync_all().map_err(unavailable)?;

    // Stored objects are immutable.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o444))
            .map_err(unavailable)?;
    }

    Ok(tmp)
}
