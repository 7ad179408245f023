//! Object framing: `"<type> <size>\0<payload>"`.
//!
//! The framed form is what gets hashed and compressed. Everything after the
//! first NUL is payload and is never inspected here.

use bstr::{BStr, ByteSlice};

use crate::ObjectError;

/// A parsed object header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    /// The type token, e.g. `blob`.
    pub kind: &'a BStr,
    /// The payload length declared in the header.
    pub size: usize,
    /// Length of the header itself, including the NUL terminator.
    pub len: usize,
}

/// Check that `kind` is usable as a type token: non-empty ASCII without
/// spaces or NULs.
pub fn validate_type(kind: &[u8]) -> Result<(), ObjectError> {
    let ok = !kind.is_empty()
        && kind
            .iter()
            .all(|&b| b.is_ascii() && b != b' ' && b != 0);
    if ok {
        Ok(())
    } else {
        Err(ObjectError::InvalidType(kind.into()))
    }
}

/// Write an object header: `"<type> <size>\0"`.
pub fn write_header(kind: &[u8], size: usize) -> Result<Vec<u8>, ObjectError> {
    validate_type(kind)?;
    let size = size.to_string();
    let mut hdr = Vec::with_capacity(kind.len() + size.len() + 2);
    hdr.extend_from_slice(kind);
    hdr.push(b' ');
    hdr.extend_from_slice(size.as_bytes());
    hdr.push(0);
    Ok(hdr)
}

/// Frame `payload` with its header.
pub fn frame(kind: &[u8], payload: &[u8]) -> Result<Vec<u8>, ObjectError> {
    let mut out = write_header(kind, payload.len())?;
    out.extend_from_slice(payload);
    Ok(out)
}

/// Parse the header at the start of `data`.
///
/// Only the header is validated; the declared size is not compared with
/// whatever follows. Use [`unframe`] for the strict check.
pub fn parse_header(data: &[u8]) -> Result<Header<'_>, ObjectError> {
    let null_pos = data
        .find_byte(0)
        .ok_or_else(|| ObjectError::MalformedHeader("missing null terminator".into()))?;
    let header = &data[..null_pos];

    let space_pos = header
        .find_byte(b' ')
        .ok_or_else(|| ObjectError::MalformedHeader("missing space in header".into()))?;
    let kind = &header[..space_pos];
    if kind.is_empty() {
        return Err(ObjectError::MalformedHeader("empty object type".into()));
    }
    if !kind.is_ascii() {
        return Err(ObjectError::MalformedHeader("non-ASCII object type".into()));
    }

    let size = parse_size(&header[space_pos + 1..])?;
    Ok(Header {
        kind: kind.as_bstr(),
        size,
        len: null_pos + 1,
    })
}

/// Split framed bytes into type and payload, requiring the payload length to
/// match the header exactly.
pub fn unframe(data: &[u8]) -> Result<(&BStr, &[u8]), ObjectError> {
    let hdr = parse_header(data)?;
    let payload = &data[hdr.len..];
    if payload.len() != hdr.size {
        return Err(ObjectError::LengthMismatch {
            declared: hdr.size,
            actual: payload.len(),
        });
    }
    Ok((hdr.kind, payload))
}

/// Plain decimal digits only: no sign, no whitespace, no empty string.
fn parse_size(digits: &[u8]) -> Result<usize, ObjectError> {
    let invalid = || ObjectError::MalformedHeader(format!("invalid size: {:?}", digits.as_bstr()));
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    digits.iter().try_fold(0usize, |acc, &d| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(usize::from(d - b'0')))
            .ok_or_else(invalid)
    })
}
