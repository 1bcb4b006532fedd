#![no_std]
#![deny(missing_docs)]
//! # onewire-core
//! A no-std implementation of the 1-Wire bus protocol.
//!
//! This crate provides a trait-based interface for 1-Wire communication, allowing the
//! protocol to be driven over any hardware that can pull a shared open-drain line low
//! and sample it. The [OneWire] trait defines the bus primitives (reset, bit and byte
//! transfers) together with the standard ROM commands ([select](OneWire::select) and
//! [skip](OneWire::skip)).
//!
//! On top of the bus trait, [RomSearch] implements the resumable binary-tree search
//! algorithm that enumerates every device sharing the line, and the [crc8]/[crc16]
//! functions implement the Dallas checksums used to validate ROM codes and device data.

pub mod consts;
mod crc;
mod error;
mod rom;
mod search;
mod traits;

pub use crc::{Crc8, crc8};
#[cfg(feature = "crc16")]
pub use crc::{check_crc16, crc16};
pub use error::OneWireError;
pub use rom::Rom;
pub use search::{RomSearch, SearchKind};
pub use traits::{OneWire, OneWireStatus};

/// Result type for 1-Wire operations.
pub type OneWireResult<T, E> = Result<T, OneWireError<E>>;
