//! Group operations on Curve25519, in extended twisted Edwards
//! coordinates.
//!
//! Internally, points live on the twisted Edwards curve of equation
//! `-x^2 + y^2 = 1 + d*x^2*y^2` (edwards25519, with `d` =
//! -121665/121666), represented in extended coordinates (X:Y:Z:T) with
//! `x = X/Z`, `y = Y/Z` and `x*y = T/Z`. The identity point is (0:1:1:0).
//!
//! Two external packed formats are supported:
//!
//!  - The "legacy" format describes the point on the isomorphic curve
//!    `486664*x^2 + y^2 = 1 + 486660*x^2*y^2`. The 32 bytes contain the
//!    canonical legacy `x` coordinate, with bit 255 set to the parity of
//!    `y`. The conversion between the two curves is a multiplication of
//!    `x` by a constant; the internal `y` is shared.
//!
//!  - The Ed25519 format of RFC 8032: the canonical `y` coordinate, with
//!    bit 255 set to the parity of `x`. The internal `x` coordinate is the
//!    opposite of the Ed25519 `x`, which is why `BASE_ED25519` is the
//!    negation of `BASE_LEGACY` and not the same point.
//!
//! Point addition and doubling use formulas where all curve constants are
//! scaled by 60833, so that only multiplications by small integers
//! (`mul_int()`) are needed. Every intermediate value is exactly what the
//! reference engine computes, so that fixture bytes match bit for bit.
//!
//! Booleans are `u32` values equal to 0 or 1, as in the `field` module.

#![allow(non_snake_case)]

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use super::field::GF25519;
use super::int256::Int256;

/// A group element in extended coordinates (X:Y:Z:T).
#[derive(Clone, Copy, Debug)]
pub struct WorkPoint {
    pub(crate) X: GF25519,
    pub(crate) Y: GF25519,
    pub(crate) Z: GF25519,
    pub(crate) T: GF25519,
}

impl WorkPoint {

    /// The group identity (0:1:1:0).
    pub const IDENTITY: Self = Self {
        X: GF25519::ZERO,
        Y: GF25519::ONE,
        Z: GF25519::ONE,
        T: GF25519::ZERO,
    };

    /// The base point of the legacy packed format.
    pub const BASE_LEGACY: Self = Self {
        X: GF25519::w8le([
            0x1A, 0xD5, 0x25, 0x8F, 0x60, 0x2D, 0x56, 0xC9,
            0xB2, 0xA7, 0x25, 0x95, 0x60, 0xC7, 0x2C, 0x69,
            0x5C, 0xDC, 0xD6, 0xFD, 0x31, 0xE2, 0xA4, 0xC0,
            0xFE, 0x53, 0x6E, 0xCD, 0xD3, 0x36, 0x69, 0x21,
        ]),
        Y: GF25519::w8le([
            0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
            0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
            0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
            0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        ]),
        Z: GF25519::ONE,
        T: GF25519::w8le([
            0xA3, 0xDD, 0xB7, 0xA5, 0xB3, 0x8A, 0xDE, 0x6D,
            0xF5, 0x52, 0x51, 0x77, 0x80, 0x9F, 0xF0, 0x20,
            0x7D, 0xE3, 0xAB, 0x64, 0x8E, 0x4E, 0xEA, 0x66,
            0x65, 0x76, 0x8B, 0xD7, 0x0F, 0x5F, 0x87, 0x67,
        ]),
    };

    /// The conventional Ed25519 base point (encodes as `5866...66`).
    pub const BASE_ED25519: Self = Self {
        X: GF25519::w8le([
            0xD3, 0x2A, 0xDA, 0x70, 0x9F, 0xD2, 0xA9, 0x36,
            0x4D, 0x58, 0xDA, 0x6A, 0x9F, 0x38, 0xD3, 0x96,
            0xA3, 0x23, 0x29, 0x02, 0xCE, 0x1D, 0x5B, 0x3F,
            0x01, 0xAC, 0x91, 0x32, 0x2C, 0xC9, 0x96, 0x5E,
        ]),
        Y: GF25519::w8le([
            0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
            0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
            0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
            0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        ]),
        Z: GF25519::ONE,
        T: GF25519::w8le([
            0x4A, 0x22, 0x48, 0x5A, 0x4C, 0x75, 0x21, 0x92,
            0x0A, 0xAD, 0xAE, 0x88, 0x7F, 0x60, 0x0F, 0xDF,
            0x82, 0x1C, 0x54, 0x9B, 0x71, 0xB1, 0x15, 0x99,
            0x9A, 0x89, 0x74, 0x28, 0xF0, 0xA0, 0x78, 0x18,
        ]),
    };

    // d = -121665/121666
    const D: GF25519 = GF25519::w8le([
        0xA3, 0x78, 0x59, 0x13, 0xCA, 0x4D, 0xEB, 0x75,
        0xAB, 0xD8, 0x41, 0x41, 0x4D, 0x0A, 0x70, 0x00,
        0x98, 0xE8, 0x79, 0x77, 0x79, 0x40, 0xC7, 0x8C,
        0x73, 0xFE, 0x6F, 0x2B, 0xEE, 0x6C, 0x03, 0x52,
    ]);

    // Factor from legacy x to internal X.
    const LEGACY_TO_ED25519: GF25519 = GF25519::w8le([
        0xE7, 0x81, 0xBA, 0x00, 0x55, 0xFB, 0x91, 0x33,
        0x7D, 0xE5, 0x82, 0xB4, 0x2E, 0x2C, 0x5E, 0x3A,
        0x81, 0xB0, 0x03, 0xFC, 0x23, 0xF7, 0x84, 0x2D,
        0x44, 0xF9, 0x5F, 0x9F, 0x0B, 0x12, 0xD9, 0x70,
    ]);

    // Factor from internal X to legacy x (inverse of the above).
    const ED25519_TO_LEGACY: GF25519 = GF25519::w8le([
        0xE9, 0x68, 0x42, 0xDB, 0xAF, 0x04, 0xB4, 0x40,
        0xA1, 0xD5, 0x43, 0xF2, 0xF9, 0x38, 0x31, 0x28,
        0x01, 0x17, 0x05, 0x67, 0x9B, 0x81, 0x61, 0xF8,
        0xA9, 0x5B, 0x3E, 0x6A, 0x20, 0x67, 0x4B, 0x24,
    ]);

    /// Builds a point from raw extended coordinates, without any check.
    pub const fn from_coordinates(X: GF25519, Y: GF25519, Z: GF25519, T: GF25519) -> Self {
        Self { X, Y, Z, T }
    }

    /// Gets the raw extended coordinates (X, Y, Z, T).
    pub fn coordinates(&self) -> [&GF25519; 4] {
        [&self.X, &self.Y, &self.Z, &self.T]
    }

    // Final step shared by addition and doubling.
    #[inline(always)]
    fn set_efgh(&mut self, E: &GF25519, F: &GF25519, G: &GF25519, H: &GF25519) {
        self.X = E * F;
        self.Y = G * H;
        self.Z = F * G;
        self.T = E * H;
    }

    /// Doubles this point (in place).
    pub fn set_double(&mut self) {
        let A = self.X.square();
        let B = self.Y.square();
        let C = self.Z.square().mul_int(2);
        let D = -A;
        let E = (self.X + self.Y).square() - A - B;
        let G = D + B;
        let F = G - C;
        let H = D - B;
        self.set_efgh(&E, &F, &G, &H);
    }

    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Adds another point (`rhs`) to this point.
    fn set_add(&mut self, rhs: &Self) {
        let A = (self.Y - self.X).mul_int(60833) * (rhs.Y - rhs.X);
        let B = (self.Y + self.X).mul_int(60833) * (rhs.Y + rhs.X);
        let C = self.T * rhs.T.mul_int(121665);
        let D = self.Z * rhs.Z.mul_int(121666);
        let E = B - A;
        let F = D + C;
        let G = D - C;
        let H = B + A;
        self.set_efgh(&E, &F, &G, &H);
    }

    /// Negates this point (in place).
    pub fn set_neg(&mut self) {
        self.X = -self.X;
        self.T = -self.T;
    }

    fn set_sub(&mut self, rhs: &Self) {
        self.set_add(&-rhs);
    }

    /// Copies `P` into this point if `ctl` is 1, keeps this point
    /// unchanged if `ctl` is 0.
    #[inline]
    pub fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.X.set_cond(&P.X, ctl);
        self.Y.set_cond(&P.Y, ctl);
        self.Z.set_cond(&P.Z, ctl);
        self.T.set_cond(&P.T, ctl);
    }

    /// Returns `P0` if `ctl` is 0, `P1` if `ctl` is 1.
    #[inline(always)]
    pub fn select(P0: &Self, P1: &Self, ctl: u32) -> Self {
        let mut P = *P0;
        P.set_cond(P1, ctl);
        P
    }

    /// Returns 1 if this point is the identity, 0 otherwise.
    pub fn is_identity(self) -> u32 {
        // The identity is the only point with x = 0 and y = 1.
        self.X.squeeze().iszero() & (self.Y - self.Z).squeeze().iszero()
    }

    /// Compares this point with another; returns 1 if they represent the
    /// same group element, 0 otherwise.
    pub fn equals(self, rhs: Self) -> u32 {
        (self.X * rhs.Z).freeze().equals((rhs.X * self.Z).freeze())
        & (self.Y * rhs.Z).freeze().equals((rhs.Y * self.Z).freeze())
    }

    /// Multiplies this point by the low `bits` bits of `n` (`bits` is
    /// clamped to 256).
    ///
    /// This is a double-and-add loop, most significant bit first, with a
    /// constant-time selection at each step; the execution time depends
    /// only on `bits`.
    pub fn set_scalarmult_bits(&mut self, n: &Int256, bits: usize) {
        let bits = core::cmp::min(bits, 256);
        let base = *self;
        let mut cur = Self::IDENTITY;
        for pos in (0..bits).rev() {
            let Q2 = cur.double();
            let Q2P = Q2 + base;
            cur = Self::select(&Q2, &Q2P, n.bit(pos));
        }
        *self = cur;
    }

    #[inline(always)]
    pub fn scalarmult_bits(self, n: &Int256, bits: usize) -> Self {
        let mut r = self;
        r.set_scalarmult_bits(n, bits);
        r
    }

    /// Multiplies this point by the full 256-bit value `n`.
    #[inline(always)]
    pub fn scalarmult(self, n: &Int256) -> Self {
        self.scalarmult_bits(n, 256)
    }

    // Checks the curve equation on affine (X, Y); returns 1 or 0.
    fn on_curve(X: &GF25519, Y: &GF25519) -> u32 {
        let X2 = X.square();
        let Y2 = Y.square();
        let e = Y2 - X2 - GF25519::ONE - Self::D * (X2 * Y2);
        e.squeeze().iszero()
    }

    // Affine coordinates (X/Z, Y/Z), both squeezed.
    fn affine(&self) -> (GF25519, GF25519) {
        let iZ = self.Z.invert();
        (iZ * self.X, iZ * self.Y)
    }

    /// Decodes a point from the legacy packed format (in place).
    ///
    /// Returned value is 1 on success, 0 if the bytes do not encode a
    /// curve point; on failure, this point is set to the identity.
    pub fn set_load_packed_legacy(&mut self, k: &Int256) -> u32 {
        let kb = k.as_bytes();
        let mut xb = *kb;
        xb[31] &= 0x7F;
        let xl = GF25519::decode32(&xb);

        // y^2 = (1 - 486664*x^2) / (1 - 486660*x^2)
        let X2 = xl.square();
        let num = GF25519::ONE - X2.mul_int(486664);
        let den = GF25519::ONE - X2.mul_int(486660);
        let (y, ok) = (num * den.invert()).sqrt();

        let neg = ((kb[31] >> 7) as u32) ^ y.parity();
        let Y = GF25519::select(&y, &-y, neg);
        let X = xl * Self::LEGACY_TO_ED25519;
        let P = Self { X, Y, Z: GF25519::ONE, T: X * Y };
        *self = Self::select(&Self::IDENTITY, &P, ok);
        ok
    }

    /// Decodes a point from the legacy packed format.
    pub fn load_packed_legacy(k: &Int256) -> Option<Self> {
        let mut P = Self::IDENTITY;
        if P.set_load_packed_legacy(k) != 0 {
            Some(P)
        } else {
            None
        }
    }

    /// Encodes this point in the legacy packed format.
    pub fn store_packed_legacy(&self) -> Int256 {
        let (x, y) = self.affine();
        let x = (x * Self::ED25519_TO_LEGACY).freeze();
        let y = y.freeze();
        let mut r = x.encode32();
        r[31] |= (y.words()[0] << 7) as u8;
        Int256::from_bytes(r)
    }

    /// Decodes a point from the Ed25519 packed format (in place).
    ///
    /// Returned value is 1 on success, 0 on failure (this point is then
    /// set to the identity). Like the legacy decoder, this does not
    /// check that the `y` coordinate is canonical; it rejects the
    /// encodings where `x` is zero and its sign bit is set.
    pub fn set_load_packed_ed25519(&mut self, k: &Int256) -> u32 {
        let kb = k.as_bytes();
        let sign = (kb[31] >> 7) as u32;
        let mut yb = *kb;
        yb[31] &= 0x7F;
        let Y = GF25519::decode32(&yb);

        // Recover the legacy x, then map it to the internal curve.
        // x_legacy^2 = (1 - y^2) / (486664 - 486660*y^2)
        let Y2 = Y.square();
        let num = GF25519::ONE - Y2;
        let den = GF25519::ONE.mul_int(486664) - Y2.mul_int(486660);
        let (xl, mut ok) = (num * den.invert()).sqrt();
        let Xe = xl * Self::LEGACY_TO_ED25519;
        ok &= !(Xe.iszero() & sign) & 1;

        // Internal X is the opposite of the Ed25519 x.
        let X = GF25519::select(&-Xe, &Xe, sign ^ Xe.parity());
        let P = Self { X, Y, Z: GF25519::ONE, T: X * Y };
        *self = Self::select(&Self::IDENTITY, &P, ok);
        ok
    }

    /// Decodes a point from the Ed25519 packed format.
    pub fn load_packed_ed25519(k: &Int256) -> Option<Self> {
        let mut P = Self::IDENTITY;
        if P.set_load_packed_ed25519(k) != 0 {
            Some(P)
        } else {
            None
        }
    }

    /// Encodes this point in the Ed25519 packed format.
    pub fn store_packed_ed25519(&self) -> Int256 {
        let (x, y) = self.affine();
        let x = (-x).squeeze().freeze();
        let y = y.freeze();
        let mut r = y.encode32();
        r[31] |= (x.words()[0] << 7) as u8;
        Int256::from_bytes(r)
    }

    /// Builds a point from affine legacy coordinates, checking that it is
    /// on the curve. `x` and `y` must be squeezed.
    pub fn load_xy_legacy(x: &GF25519, y: &GF25519) -> Option<Self> {
        let X = x * Self::LEGACY_TO_ED25519;
        Self::from_affine(X, *y)
    }

    /// Builds a point from affine Ed25519 coordinates, checking that it is
    /// on the curve. `x` and `y` must be squeezed.
    pub fn load_xy_ed25519(x: &GF25519, y: &GF25519) -> Option<Self> {
        Self::from_affine(-x, *y)
    }

    fn from_affine(X: GF25519, Y: GF25519) -> Option<Self> {
        if Self::on_curve(&X, &Y) == 0 {
            return None;
        }
        Some(Self { X, Y, Z: GF25519::ONE, T: X * Y })
    }

    /// Returns the canonical (frozen) affine legacy coordinates.
    pub fn store_xy_legacy(&self) -> (GF25519, GF25519) {
        let (x, y) = self.affine();
        ((x * Self::ED25519_TO_LEGACY).freeze(), y.freeze())
    }

    /// Returns the canonical (frozen) affine Ed25519 coordinates.
    pub fn store_xy_ed25519(&self) -> (GF25519, GF25519) {
        let (x, y) = self.affine();
        ((-x).squeeze().freeze(), y.freeze())
    }
}

impl Add<WorkPoint> for WorkPoint {
    type Output = WorkPoint;

    #[inline(always)]
    fn add(self, other: WorkPoint) -> WorkPoint {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Add<&WorkPoint> for WorkPoint {
    type Output = WorkPoint;

    #[inline(always)]
    fn add(self, other: &WorkPoint) -> WorkPoint {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl Add<WorkPoint> for &WorkPoint {
    type Output = WorkPoint;

    #[inline(always)]
    fn add(self, other: WorkPoint) -> WorkPoint {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl Add<&WorkPoint> for &WorkPoint {
    type Output = WorkPoint;

    #[inline(always)]
    fn add(self, other: &WorkPoint) -> WorkPoint {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl AddAssign<WorkPoint> for WorkPoint {
    #[inline(always)]
    fn add_assign(&mut self, other: WorkPoint) {
        self.set_add(&other);
    }
}

impl AddAssign<&WorkPoint> for WorkPoint {
    #[inline(always)]
    fn add_assign(&mut self, other: &WorkPoint) {
        self.set_add(other);
    }
}

impl Neg for WorkPoint {
    type Output = WorkPoint;

    #[inline(always)]
    fn neg(self) -> WorkPoint {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &WorkPoint {
    type Output = WorkPoint;

    #[inline(always)]
    fn neg(self) -> WorkPoint {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl Sub<WorkPoint> for WorkPoint {
    type Output = WorkPoint;

    #[inline(always)]
    fn sub(self, other: WorkPoint) -> WorkPoint {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&WorkPoint> for WorkPoint {
    type Output = WorkPoint;

    #[inline(always)]
    fn sub(self, other: &WorkPoint) -> WorkPoint {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl Sub<WorkPoint> for &WorkPoint {
    type Output = WorkPoint;

    #[inline(always)]
    fn sub(self, other: WorkPoint) -> WorkPoint {
        let mut r = *self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&WorkPoint> for &WorkPoint {
    type Output = WorkPoint;

    #[inline(always)]
    fn sub(self, other: &WorkPoint) -> WorkPoint {
        let mut r = *self;
        r.set_sub(other);
        r
    }
}

impl SubAssign<WorkPoint> for WorkPoint {
    #[inline(always)]
    fn sub_assign(&mut self, other: WorkPoint) {
        self.set_sub(&other);
    }
}

impl SubAssign<&WorkPoint> for WorkPoint {
    #[inline(always)]
    fn sub_assign(&mut self, other: &WorkPoint) {
        self.set_sub(other);
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::WorkPoint;
    use crate::field::GF25519;
    use crate::int256::Int256;

    const KEYS: [&str; 4] = [
        "83369beddca777585167520fb54a7fb059102bf4e0a46dd5fb1c633d83db77a2",
        "b4dbdb0c05dd28204534fa27c5afca4dcda5397d833e3064f7a7281b249dc7c7",
        "346a11a8bd8fcedfcde2e19c996b6e4497d0dafc3f5af7096c915bd0f9fe4fe9",
        "3bac2ada2fbfa1ea75b2cb214490d5d718f1bbe5b226184488c07cf1a551e8d9",
    ];

    const PUBKEYS: [&str; 4] = [
        "052b006c20b8dcc5dcb97cd96a8578f791c549a94971fc933cbe2a2999bf3828",
        "9c993f3d42d456f698e784902e431d467ee5fadbf814c03fbd7cc2fe7743c79a",
        "1d342dcfbe83d50a40fe58f634967d1e9f8c77298751ebaaba386b96130631f9",
        "38af70bd3bb6395eed69a4629bfa41f8b2f63db56930881cbaa026a90b03c19c",
    ];

    fn int(s: &str) -> Int256 {
        let mut b = [0u8; 32];
        hex::decode_to_slice(s, &mut b[..]).unwrap();
        Int256::from_bytes(b)
    }

    #[test]
    fn base_encodings() {
        let B = WorkPoint::BASE_LEGACY;
        assert_eq!(B.store_packed_legacy(),
            int("d46bfe7f39fa8c22e19623eb26b78e6a34748b66d6a326dd195e9f2150437c54"));
        assert_eq!((WorkPoint::IDENTITY + B).store_packed_legacy(),
            B.store_packed_legacy());
        assert_eq!(WorkPoint::BASE_ED25519.store_packed_ed25519(),
            int("5866666666666666666666666666666666666666666666666666666666666666"));
        assert_eq!(B.store_packed_ed25519(),
            int("58666666666666666666666666666666666666666666666666666666666666e6"));
        assert_eq!(WorkPoint::IDENTITY.store_packed_ed25519(),
            int("0100000000000000000000000000000000000000000000000000000000000000"));
        assert_eq!(WorkPoint::IDENTITY.store_packed_legacy(),
            int("0000000000000000000000000000000000000000000000000000000000000080"));
    }

    #[test]
    fn double_add() {
        let B = WorkPoint::BASE_LEGACY;
        let B2 = B.double();
        assert_eq!(B2.store_packed_legacy(),
            int("65285345d933b10921a9bded2eac7b6e827069532ded6e46186fde73ccf97fb7"));
        assert_eq!(B2.X.words(), &[
            87, 10, 48, 24, 76, 134, 186, 122, 91, 98, 113, 250, 221, 193, 110, 136,
            9, 249, 176, 183, 135, 75, 34, 234, 74, 37, 124, 154, 219, 29, 36, 49,
        ]);
        assert_eq!(B2.equals(B + B), 1);
        assert_eq!(B2.equals(B), 0);
        assert_eq!(WorkPoint::BASE_ED25519.double().store_packed_ed25519(),
            int("c9a3f86aae465f0e56513864510f3997561fa2c9e85ea21dc2292309f3cd6022"));

        assert_eq!((B - B).is_identity(), 1);
        assert_eq!((B2 - B).equals(B), 1);
        assert_eq!(B.is_identity(), 0);
        assert_eq!(WorkPoint::IDENTITY.is_identity(), 1);
        assert_eq!(WorkPoint::BASE_ED25519.equals(-B), 1);
    }

    #[test]
    fn scalarmult() {
        let B = WorkPoint::BASE_LEGACY;
        let mut five = [0u8; 32];
        five[0] = 5;
        let five = Int256::from_bytes(five);
        let B5 = B.double().double() + B;
        assert_eq!(B.scalarmult_bits(&five, 8).equals(B5), 1);
        assert_eq!(B.scalarmult_bits(&five, 3).equals(B5), 1);
        // Only the low two bits (01) are used.
        assert_eq!(B.scalarmult_bits(&five, 2).equals(B), 1);
        assert_eq!(B.scalarmult_bits(&five, 0).is_identity(), 1);
        assert_eq!(B.scalarmult(&five).equals(B5), 1);
        assert_eq!(B.scalarmult(&Int256::ORDER).is_identity(), 1);
        assert_eq!(B.scalarmult_bits(&five, 1000).equals(B5), 1);
    }

    #[test]
    fn keys() {
        for i in 0..4 {
            let k = int(KEYS[i]);
            let P = WorkPoint::load_packed_legacy(&k).unwrap();
            assert_eq!(P.store_packed_legacy(), k);
            let Q = WorkPoint::BASE_LEGACY.scalarmult_bits(&k, 256);
            assert_eq!(Q.store_packed_legacy(), int(PUBKEYS[i]));

            // Both packed formats describe the same points.
            let e = Q.store_packed_ed25519();
            let R = WorkPoint::load_packed_ed25519(&e).unwrap();
            assert_eq!(R.equals(Q), 1);
            assert_eq!(R.store_packed_legacy(), int(PUBKEYS[i]));

            let (x, y) = Q.store_xy_legacy();
            assert_eq!(WorkPoint::load_xy_legacy(&x, &y).unwrap().equals(Q), 1);
            let (x, y) = Q.store_xy_ed25519();
            assert_eq!(WorkPoint::load_xy_ed25519(&x, &y).unwrap().equals(Q), 1);
        }
    }

    #[test]
    fn decode_failures() {
        // y = 2 has no matching x on the curve.
        let mut b = [0u8; 32];
        b[0] = 2;
        let mut P = WorkPoint::BASE_LEGACY;
        assert_eq!(P.set_load_packed_ed25519(&Int256::from_bytes(b)), 0);
        assert_eq!(P.is_identity(), 1);

        // x = 0 with the sign bit set.
        b[0] = 1;
        b[31] = 0x80;
        assert!(WorkPoint::load_packed_ed25519(&Int256::from_bytes(b)).is_none());
        b[31] = 0;
        assert!(WorkPoint::load_packed_ed25519(&Int256::from_bytes(b)).is_some());

        assert!(WorkPoint::load_xy_legacy(&GF25519::ONE, &GF25519::ONE).is_none());
        assert!(WorkPoint::load_xy_ed25519(&GF25519::ZERO, &GF25519::ONE).is_some());

        // Legacy decoding fails on about half of all inputs.
        let mut failures = 0;
        for i in 0..16u8 {
            let mut b = [0u8; 32];
            b[0] = i;
            b[5] = 0x33;
            if WorkPoint::load_packed_legacy(&Int256::from_bytes(b)).is_none() {
                failures += 1;
            }
        }
        assert!(failures > 0 && failures < 16);
    }
}
