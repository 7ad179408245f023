use std::fs;
use std::io::{self, Read};
use std::path::Path;

use flate2::read::ZlibDecoder;
use tinygit_hash::{Hasher, ObjectId};
use tinygit_object::{header, Object};

use crate::compress::{self, CompressError};
use crate::{LooseError, LooseObjectStore, ObjectInfo, RawObject};

/// Object headers are tiny; anything longer than this is not a header.
const MAX_HEADER_LEN: usize = 64;

impl LooseObjectStore {
    /// Check if a loose object exists.
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Read an object by id, returning its type token and payload.
    ///
    /// The payload length must match the header exactly.
    pub fn get(&self, oid: &ObjectId) -> Result<RawObject, LooseError> {
        let framed = self.read_framed(oid)?;
        let (kind, payload) = header::unframe(&framed)?;
        Ok(RawObject {
            kind: kind.to_owned(),
            data: payload.to_vec(),
        })
    }

    /// Read an object and decode it as a blob or tree.
    pub fn read_object(&self, oid: &ObjectId) -> Result<Object, LooseError> {
        Ok(Object::parse(&self.read_framed(oid)?)?)
    }

    /// Read an object and check that its content actually hashes to `oid`.
    pub fn read_verified(&self, oid: &ObjectId) -> Result<RawObject, LooseError> {
        let framed = self.read_framed(oid)?;
        let actual = Hasher::digest(&framed);
        if actual != *oid {
            return Err(LooseError::HashMismatch {
                path: self.object_path(oid),
                expected: *oid,
                actual,
            });
        }
        let (kind, payload) = header::unframe(&framed)?;
        Ok(RawObject {
            kind: kind.to_owned(),
            data: payload.to_vec(),
        })
    }

    /// Read just the header (type + size) without inflating the payload.
    pub fn read_header(&self, oid: &ObjectId) -> Result<ObjectInfo, LooseError> {
        let path = self.object_path(oid);
        let file = open_object(&path, oid)?;

        let corrupt = |source| LooseError::CorruptStream { oid: *oid, source };
        let mut decoder = ZlibDecoder::new(file);
        let mut buf = [0u8; MAX_HEADER_LEN];
        let mut filled = 0;

        while !buf[..filled].contains(&0) {
            if filled == buf.len() {
                return Err(LooseError::Object(
                    tinygit_object::ObjectError::MalformedHeader(format!(
                        "header exceeds {MAX_HEADER_LEN} bytes"
                    )),
                ));
            }
            let n = decoder
                .read(&mut buf[filled..])
                .map_err(|e| corrupt(CompressError::Read(e)))?;
            if n == 0 {
                // Either the stream is cut short or the header has no NUL;
                // let the header parser report the latter.
                break;
            }
            filled += n;
        }

        let hdr = header::parse_header(&buf[..filled])?;
        Ok(ObjectInfo {
            kind: hdr.kind.to_owned(),
            size: hdr.size,
        })
    }

    /// Read and inflate the framed bytes of an object.
    fn read_framed(&self, oid: &ObjectId) -> Result<Vec<u8>, LooseError> {
        let path = self.object_path(oid);
        tracing::trace!(%oid, path = %path.display(), "reading loose object");

        let mut compressed = Vec::new();
        open_object(&path, oid)?.read_to_end(&mut compressed)?;
        compress::decompress(&compressed)
            .map_err(|source| LooseError::CorruptStream { oid: *oid, source })
    }
}

fn open_object(path: &Path, oid: &ObjectId) -> Result<fs::File, LooseError> {
    match fs::File::open(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(LooseError::ObjectNotFound(oid.to_hex()))
        }
        Err(e) => Err(LooseError::Io(e)),
    }
}
