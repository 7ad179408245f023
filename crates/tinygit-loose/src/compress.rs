//! Zlib compression for loose object files.

use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

/// Errors from inflating a loose object.
#[derive(Debug, thiserror::Error)]
pub enum CompressError {
    #[error("invalid zlib data: {0}")]
    Invalid(#[from] flate2::DecompressError),

    #[error("zlib stream ends early after {consumed} of {total} bytes")]
    Truncated { consumed: usize, total: usize },

    #[error("{0} bytes of garbage after the end of the zlib stream")]
    TrailingData(usize),

    #[error("zlib read failed: {0}")]
    Read(#[source] io::Error),
}

/// Deflate `data` into a zlib stream.
///
/// Only fails if the in-memory writer does, which in practice means never.
pub fn compress(data: &[u8], level: Compression) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2 + 64), level);
    encoder.write_all(data)?;
    encoder.finish()
}

/// Inflate a complete zlib stream.
///
/// The whole input must be exactly one stream: a stream that ends before
/// its trailer, or bytes after it, are both errors.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len() * 2 + 64);

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity().max(64));
        }
        let (in_before, out_before) = (inflater.total_in(), inflater.total_out());
        let consumed = in_before as usize;
        let status = inflater.decompress_vec(&data[consumed..], &mut out, FlushDecompress::None)?;

        if status == Status::StreamEnd {
            let consumed = inflater.total_in() as usize;
            if consumed != data.len() {
                return Err(CompressError::TrailingData(data.len() - consumed));
            }
            return Ok(out);
        }
        // Room in the output and no progress: the input ran out mid-stream.
        if inflater.total_in() == in_before && inflater.total_out() == out_before {
            return Err(CompressError::Truncated {
                consumed,
                total: data.len(),
            });
        }
    }
}
