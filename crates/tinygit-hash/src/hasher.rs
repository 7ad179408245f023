use digest::Digest;

use crate::ObjectId;

/// Streaming SHA-1 computation producing an [`ObjectId`].
///
/// Data can be fed incrementally with [`update`](Hasher::update) or through
/// the [`std::io::Write`] implementation. Any byte sequence, including the
/// empty one, is valid input.
#[derive(Clone, Default)]
pub struct Hasher {
    inner: sha1::Sha1,
}

impl Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed data into the hasher.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalize and return the ObjectId.
    pub fn finalize(self) -> ObjectId {
        let mut bytes = [0u8; crate::DIGEST_LEN];
        bytes.copy_from_slice(self.inner.finalize().as_slice());
        ObjectId::new(bytes)
    }

    /// Hash `data` in one call.
    ///
    /// For object ids, `data` must be the framed bytes
    /// (`"<type> <len>\0<payload>"`), not the bare payload.
    pub fn digest(data: &[u8]) -> ObjectId {
        let mut h = Self::new();
        h.update(data);
        h.finalize()
    }

    /// Hash an object without materializing its framed form:
    /// `"{type} {len}\0{payload}"`.
    pub fn hash_object(obj_type: &[u8], payload: &[u8]) -> ObjectId {
        let mut h = Self::new();
        h.update(obj_type);
        h.update(format!(" {}\0", payload.len()).as_bytes());
        h.update(payload);
        h.finalize()
    }
}

impl std::io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
