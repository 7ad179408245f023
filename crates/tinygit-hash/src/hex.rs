use crate::HashError;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Value of a single ASCII hex digit, accepting either case.
fn nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Lowercase hex encoding of `bytes`.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}

/// Decode `hex` into `out`; `hex` must be exactly `out.len() * 2` characters.
pub fn decode_into(hex: &str, out: &mut [u8]) -> Result<(), HashError> {
    let raw = hex.as_bytes();
    if raw.len() != out.len() * 2 {
        return Err(HashError::InvalidHexLength {
            expected: out.len() * 2,
            actual: raw.len(),
        });
    }
    for (i, pair) in raw.chunks_exact(2).enumerate() {
        let hi = nibble(pair[0]).ok_or(HashError::InvalidHex {
            position: i * 2,
            character: pair[0] as char,
        })?;
        let lo = nibble(pair[1]).ok_or(HashError::InvalidHex {
            position: i * 2 + 1,
            character: pair[1] as char,
        })?;
        out[i] = (hi << 4) | lo;
    }
    Ok(())
}

/// Check that `s` is a non-empty run of hex digits no longer than a full id.
///
/// Odd lengths are allowed: abbreviated ids are matched on characters, not
/// bytes.
pub fn is_hex_prefix(s: &str) -> bool {
    !s.is_empty() && s.len() <= crate::HEX_LEN && s.bytes().all(|b| nibble(b).is_some())
}
