//! Object identity for the tinygit object store.
//!
//! Provides the 20-byte SHA-1 `ObjectId`, the streaming `Hasher` that
//! produces it, and the hex helpers used to print and parse ids.

mod error;
pub mod hasher;
pub mod hex;
mod oid;

pub use error::HashError;
pub use hasher::Hasher;
pub use oid::ObjectId;

/// Length of a raw object id in bytes.
pub const DIGEST_LEN: usize = 20;

/// Length of an object id in hex characters.
pub const HEX_LEN: usize = DIGEST_LEN * 2;
