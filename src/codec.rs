//! Fixed-width serialization of field elements, work points and packed
//! values.
//!
//! Layouts are independent of the host byte order:
//!
//!  - field element: the 32 raw words, each as 4 bytes little-endian,
//!    in word order (128 bytes);
//!  - work point: X, Y, Z and T encoded as field elements, in that order
//!    (512 bytes);
//!  - packed value: the 32 bytes verbatim.
//!
//! There is no framing, length prefix or version tag. Field elements are
//! encoded without any reduction, so that unsqueezed intermediate values
//! are captured exactly.

#![allow(non_snake_case)]

use super::field::GF25519;
use super::int256::Int256;
use super::point::WorkPoint;

/// Encoded length of a field element.
pub const FIELD_LEN: usize = 128;

/// Encoded length of a work point.
pub const POINT_LEN: usize = 4 * FIELD_LEN;

/// Encoded length of a packed value.
pub const PACKED_LEN: usize = 32;

pub fn encode_field(a: &GF25519) -> [u8; FIELD_LEN] {
    let mut r = [0u8; FIELD_LEN];
    for (dst, w) in r.chunks_exact_mut(4).zip(a.words().iter()) {
        dst.copy_from_slice(&w.to_le_bytes());
    }
    r
}

pub fn encode_point(P: &WorkPoint) -> [u8; POINT_LEN] {
    let mut r = [0u8; POINT_LEN];
    for (dst, c) in r.chunks_exact_mut(FIELD_LEN).zip(P.coordinates()) {
        dst.copy_from_slice(&encode_field(c));
    }
    r
}

#[inline(always)]
pub fn encode_packed(k: &Int256) -> [u8; PACKED_LEN] {
    k.to_bytes()
}

/// Decodes a field element; the source must have length exactly
/// `FIELD_LEN`. Words are taken verbatim.
pub fn decode_field(buf: &[u8]) -> Option<GF25519> {
    if buf.len() != FIELD_LEN {
        return None;
    }
    let mut w = [0u32; 32];
    for (d, src) in w.iter_mut().zip(buf.chunks_exact(4)) {
        *d = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
    }
    Some(GF25519::from_words(w))
}

/// Decodes a work point; the source must have length exactly
/// `POINT_LEN`. No curve check is performed.
pub fn decode_point(buf: &[u8]) -> Option<WorkPoint> {
    if buf.len() != POINT_LEN {
        return None;
    }
    let X = decode_field(&buf[..FIELD_LEN])?;
    let Y = decode_field(&buf[FIELD_LEN..2 * FIELD_LEN])?;
    let Z = decode_field(&buf[2 * FIELD_LEN..3 * FIELD_LEN])?;
    let T = decode_field(&buf[3 * FIELD_LEN..])?;
    Some(WorkPoint::from_coordinates(X, Y, Z, T))
}

#[inline(always)]
pub fn decode_packed(buf: &[u8]) -> Option<Int256> {
    Int256::decode(buf)
}

// ========================================================================
