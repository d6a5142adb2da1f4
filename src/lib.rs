//! Uecc-fixtures is a bit-exact Curve25519 arithmetic engine with a
//! conformance fixture generator.
//!
//! The engine reproduces, word for word, the field and group arithmetic
//! of the libuecc library: field elements modulo p = 2^255 - 19 are held
//! in an unreduced radix-2^8 representation (32 words of 32 bits, see
//! `field`), points are kept in extended twisted Edwards coordinates
//! (`point`), and packed 32-byte values (secret scalars, compressed
//! points) are handled by `int256`, which also implements arithmetic
//! modulo the group order.
//!
//! Because intermediate values are not normalized, two correct
//! implementations of the same formulas agree on residues but not
//! necessarily on raw words. The fixture generator captures the exact
//! words produced by each operation of a fixed catalog of cases
//! (`catalog`), encodes them with a fixed-width byte layout (`codec`)
//! and persists each under its own name in a fixture directory
//! (`driver`). Ports of the engine to other languages are validated by
//! comparing their own outputs against these files, byte for byte.
//!
//! # Usage
//!
//! The arithmetic modules (`field`, `int256`, `point`, `codec`) are
//! `no_std`. The catalog, the generation driver and the `uecc-gen`
//! command-line tool require the default `std` feature.
//!
//! # Conventions
//!
//! Functions that handle potentially secret values are constant-time.
//! As in the engine, Booleans are `u32` values: 1 means "true", 0 means
//! "false", and no other value may be used. Functions that modify the
//! object on which they are called have a name in `set_*()` (e.g.
//! `P.set_double()` doubles `P` in place, while `P.double()` returns a
//! new point); arithmetic operators (`+`, `-`, `*`) accept both values
//! and references.
//!
//! Preconditions of the engine (e.g. "the subtrahend must be squeezed")
//! are documented per function and are not checked: violating them is
//! precisely what some fixtures capture.

#![no_std]

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

#[cfg(feature = "std")]
pub(crate) use std::{boxed::Box, string::String, vec::Vec};

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

pub mod field;
pub mod int256;
pub mod point;
pub mod codec;

#[cfg(feature = "std")]
pub mod error;
#[cfg(feature = "std")]
pub mod catalog;
#[cfg(feature = "std")]
pub mod driver;

pub use field::GF25519;
pub use int256::Int256;
pub use point::WorkPoint;

#[cfg(feature = "std")]
pub use error::{Error, Result};
