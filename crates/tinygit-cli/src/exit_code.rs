//! Process exit codes, one per store error kind.

use tinygit_loose::LooseError;
use tinygit_object::ObjectError;
use tinygit_repository::RepoError;

/// Bad command-line usage.
pub const USAGE: i32 = 129;
/// Any failure without a dedicated code.
pub const OTHER: i32 = 128;

pub const INVALID_TYPE: i32 = 3;
pub const MALFORMED_HEADER: i32 = 4;
pub const LENGTH_MISMATCH: i32 = 5;
pub const CORRUPT_STREAM: i32 = 6;
pub const OBJECT_NOT_FOUND: i32 = 7;
pub const STORE_UNAVAILABLE: i32 = 8;
pub const TRUNCATED_ENTRY: i32 = 9;

/// Argument combinations clap cannot express.
#[derive(Debug, thiserror::Error)]
#[error("usage: {0}")]
pub struct UsageError(pub &'static str);

/// Pick the exit code for the first error in the chain that has one.
pub fn for_error(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| {
            if cause.is::<UsageError>() {
                Some(USAGE)
            } else if let Some(e) = cause.downcast_ref::<RepoError>() {
                repo_code(e)
            } else if let Some(e) = cause.downcast_ref::<LooseError>() {
                loose_code(e)
            } else if let Some(e) = cause.downcast_ref::<ObjectError>() {
                object_code(e)
            } else {
                None
            }
        })
        .unwrap_or(OTHER)
}

// Transparent variants forward `source()` past the wrapped error, so nested
// errors are unpacked here rather than found in the chain.
fn repo_code(err: &RepoError) -> Option<i32> {
    match err {
        RepoError::Loose(e) => loose_code(e),
        _ => None,
    }
}

fn loose_code(err: &LooseError) -> Option<i32> {
    match err {
        LooseError::ObjectNotFound(_) => Some(OBJECT_NOT_FOUND),
        LooseError::CorruptStream { .. } => Some(CORRUPT_STREAM),
        LooseError::StoreUnavailable { .. } => Some(STORE_UNAVAILABLE),
        LooseError::Object(e) => object_code(e),
        _ => None,
    }
}

fn object_code(err: &ObjectError) -> Option<i32> {
    match err {
        ObjectError::InvalidType(_) | ObjectError::UnknownType(_) => Some(INVALID_TYPE),
        ObjectError::MalformedHeader(_) => Some(MALFORMED_HEADER),
        ObjectError::LengthMismatch { .. } => Some(LENGTH_MISMATCH),
        ObjectError::TruncatedEntry { .. } | ObjectError::InvalidTreeEntry { .. } => {
            Some(TRUNCATED_ENTRY)
        }
        _ => None,
    }
}
