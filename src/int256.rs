//! 256-bit packed values, and arithmetic modulo the group order.
//!
//! An `Int256` is exactly 32 bytes, little-endian. The same type carries
//! secret scalars, packed point encodings and the fixed test keys; no
//! transformation is ever applied to the bytes unless one of the
//! arithmetic functions below is explicitly called.
//!
//! Arithmetic is performed modulo the prime order of the Curve25519
//! prime-order subgroup:
//!
//! ```text
//! L = 2^252 + 27742317777372353535851937790883648493
//! ```
//!
//! `gf_reduce()` accepts any 256-bit value. The other `gf_*` functions
//! reduce their operands first, and always return the canonical residue
//! (in the 0..L-1 range). Multiplication uses Montgomery reduction with
//! R = 2^256, followed by a product with R^2 mod L to remove the
//! Montgomery factors.

use super::{CryptoRng, RngCore};

/// A 256-bit unsigned integer, stored as 32 bytes in little-endian
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Int256([u8; 32]);

// L (little-endian).
const ORDER: [u8; 32] = [
    0xED, 0xD3, 0xF5, 0x5C, 0x1A, 0x63, 0x12, 0x58,
    0xD6, 0x9C, 0xF7, 0xA2, 0xDE, 0xF9, 0xDE, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

// L - 2 (inversion exponent).
const ORDER_MINUS_2: [u8; 32] = [
    0xEB, 0xD3, 0xF5, 0x5C, 0x1A, 0x63, 0x12, 0x58,
    0xD6, 0x9C, 0xF7, 0xA2, 0xDE, 0xF9, 0xDE, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

// 2^512 mod L.
const R2: [u8; 32] = [
    0x01, 0x0F, 0x9C, 0x44, 0xE3, 0x11, 0x06, 0xA4,
    0x47, 0x93, 0x85, 0x68, 0xA7, 0x1B, 0x0E, 0xD0,
    0x65, 0xBE, 0xF5, 0x17, 0xD2, 0x73, 0xEC, 0xCE,
    0x3D, 0x9A, 0x30, 0x7C, 0x1B, 0x41, 0x99, 0x03,
];

// -1/L mod 2^8.
const M0I: u64 = 27;

impl Int256 {

    pub const ZERO: Self = Self([0; 32]);
    pub const ONE: Self = Self([
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ]);

    /// The group order L itself.
    pub const ORDER: Self = Self(ORDER);

    pub const fn from_bytes(b: [u8; 32]) -> Self {
        Self(b)
    }

    /// Decodes a value from exactly 32 bytes; `None` is returned if the
    /// slice has any other length.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let b: [u8; 32] = buf.try_into().ok()?;
        Some(Self(b))
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[inline(always)]
    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Gets bit `pos` (0 to 255) as 0 or 1.
    #[inline(always)]
    pub fn bit(&self, pos: usize) -> u32 {
        ((self.0[pos >> 3] >> (pos & 7)) & 1) as u32
    }

    /// Reduces this value modulo L.
    ///
    /// The top nibble gives an estimate `q` of the quotient that is
    /// either exact or one too large; both `a - q*L` and `a - (q-1)*L`
    /// are computed and the non-negative one is kept, without branching.
    pub fn gf_reduce(self) -> Self {
        let a = &self.0;
        let nq = (a[31] >> 4) as i64;
        let mut u1 = 0i64;
        let mut u2 = 0i64;
        let mut o1 = [0u8; 32];
        let mut o2 = [0u8; 32];
        for j in 0..32 {
            u1 += a[j] as i64 - nq * ORDER[j] as i64;
            u2 += a[j] as i64 - (nq - 1) * ORDER[j] as i64;
            o1[j] = u1 as u8;
            o2[j] = u2 as u8;
            if j != 31 {
                u1 >>= 8;
                u2 >>= 8;
            }
        }
        let m = (u1 >> 63) as u8;
        let mut r = [0u8; 32];
        for j in 0..32 {
            r[j] = o1[j] ^ (m & (o1[j] ^ o2[j]));
        }
        Self(r)
    }

    // Subtracts L if the value is at least L (the value must be lower
    // than 2*L).
    fn cond_sub_order(a: &[u8; 32]) -> [u8; 32] {
        let mut d = [0u8; 32];
        let mut u = 0i32;
        for j in 0..32 {
            u += a[j] as i32 - ORDER[j] as i32;
            d[j] = u as u8;
            u >>= 8;
        }
        // u is -1 on borrow (a < L), 0 otherwise.
        let m = u as u8;
        let mut r = [0u8; 32];
        for j in 0..32 {
            r[j] = d[j] ^ (m & (a[j] ^ d[j]));
        }
        r
    }

    /// Adds `rhs` to this value, modulo L.
    pub fn gf_add(self, rhs: Self) -> Self {
        let a = self.gf_reduce().0;
        let b = rhs.gf_reduce().0;
        let mut s = [0u8; 32];
        let mut u = 0u32;
        for j in 0..32 {
            u += a[j] as u32 + b[j] as u32;
            s[j] = u as u8;
            u >>= 8;
        }
        Self(Self::cond_sub_order(&s))
    }

    /// Subtracts `rhs` from this value, modulo L.
    pub fn gf_sub(self, rhs: Self) -> Self {
        let a = self.gf_reduce().0;
        let b = rhs.gf_reduce().0;
        let mut d = [0u8; 32];
        let mut u = 0i32;
        for j in 0..32 {
            u += a[j] as i32 - b[j] as i32;
            d[j] = u as u8;
            u >>= 8;
        }
        let m = u as u8;
        let mut r = [0u8; 32];
        let mut c = 0u32;
        for j in 0..32 {
            c += d[j] as u32 + (m & ORDER[j]) as u32;
            r[j] = c as u8;
            c >>= 8;
        }
        Self(r)
    }

    // Montgomery multiplication: returns a*b/2^256 mod L, possibly not
    // fully reduced. Operands must be lower than L.
    fn montymul(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
        let mut d = [0u8; 32];
        for i in 0..32 {
            let ai = a[i] as u64;
            let mut u = d[0] as u64 + ai * b[0] as u64;
            let nq = (u * M0I) & 0xFF;
            u += nq * ORDER[0] as u64;
            for j in 1..32 {
                u += (d[j] as u64 + ai * b[j] as u64 + nq * ORDER[j] as u64) << 8;
                u >>= 8;
                d[j - 1] = u as u8;
            }
            d[31] = (u >> 8) as u8;
        }
        d
    }

    /// Multiplies this value by `rhs`, modulo L.
    pub fn gf_mult(self, rhs: Self) -> Self {
        let a = self.gf_reduce().0;
        let b = rhs.gf_reduce().0;
        let t = Self::montymul(&a, &b);
        Self(Self::montymul(&t, &R2)).gf_reduce()
    }

    /// Inverts this value modulo L (Fermat, exponent L - 2); the
    /// inverse of zero is zero.
    pub fn gf_recip(self) -> Self {
        let a = self.gf_reduce();
        let mut r = Self::ONE;
        for pos in (0..253).rev() {
            r = r.gf_mult(r);
            // The exponent is public; only its bits drive the branch.
            if Self(ORDER_MINUS_2).bit(pos) != 0 {
                r = r.gf_mult(a);
            }
        }
        r
    }

    /// Returns 1 if this value is zero modulo L, 0 otherwise.
    pub fn gf_iszero(self) -> u32 {
        let r = self.gf_reduce();
        let mut acc = 0u8;
        for j in 0..32 {
            acc |= r.0[j];
        }
        (acc as u32).wrapping_sub(1) >> 31
    }

    /// Turns 32 arbitrary bytes into a valid secret scalar: low three
    /// bits and bit 255 cleared, bit 254 set.
    pub fn sanitize_secret(self) -> Self {
        let mut r = self.0;
        r[0] &= 0xF8;
        r[31] &= 0x7F;
        r[31] |= 0x40;
        Self(r)
    }

    /// Generates a new secret scalar from a cryptographically secure
    /// random source.
    pub fn generate_secret<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        let mut b = [0u8; 32];
        rng.fill_bytes(&mut b);
        Self(b).sanitize_secret()
    }
}

impl From<[u8; 32]> for Int256 {
    fn from(b: [u8; 32]) -> Self {
        Self(b)
    }
}

impl AsRef<[u8]> for Int256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ========================================================================
