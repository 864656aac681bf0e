//! Common utilities for rwtxd.
//!
//! This crate provides the foundational byte-level types used across all
//! rwtxd crates:
//!
//! - [`BinaryReader`] - Little-endian cursor reading from a byte slice
//! - [`BinaryWriter`] - Little-endian writing into a growable buffer
//! - [`endian`] - Byte-swap helpers
//!
//! Everything on disk in a texture dictionary is little-endian; these types
//! keep the byte-order handling in one place so the codec crates never
//! touch raw `from_le_bytes` calls themselves.

mod error;
mod reader;
mod writer;

pub mod endian;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use writer::BinaryWriter;

/// Re-export zerocopy traits for fixed-layout wire structs
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Re-export memchr for terminator scanning in fixed name slots
pub use memchr;
