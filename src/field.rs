//! Field GF(2^255-19), in unreduced radix-2^8 representation.
//!
//! A field element is held as 32 unsigned 32-bit words; word `i` has
//! weight 2^(8*i). Words are not kept within 0..255: additions and
//! subtractions leave carries in place, and only the `squeeze()` pass
//! propagates them (folding everything above bit 255 back into the low
//! word with factor 19, since 2^255 = 19 mod p). Several distinct word
//! sequences therefore represent the same residue; the bytes of a
//! value are canonical only after `freeze()`, and then only the low
//! byte of each word is meaningful.
//!
//! All word arithmetic wraps modulo 2^32. This is part of the contract:
//! fixtures capture the exact words produced by every operation, so an
//! implementation that used wider accumulators would not reproduce
//! them.
//!
//! Preconditions follow the reference engine and are not checked:
//!
//!  - the right operand of a subtraction must be squeezed;
//!
//!  - `freeze()` and `parity()` expect a squeezed operand (on other
//!    inputs they still run, and the produced words are what fixtures
//!    record, but the output is not canonical).
//!
//! Booleans (`parity()`, `equals()`, `iszero()`, and the `ctl` argument
//! of `select()`) are `u32` values equal to 0 or 1.

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// An element of GF(2^255-19) in unreduced radix-2^8 representation.
#[derive(Clone, Copy, Debug)]
pub struct GF25519([u32; 32]);

impl GF25519 {

    pub const ZERO: Self = Self::w8le([0; 32]);
    pub const ONE: Self = Self::w8le([
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ]);

    /// The 256-bit two's complement of p, i.e. 2^256 - p = 2^255 + 19.
    ///
    /// Adding this value and looking at bit 255 of the sum tells whether
    /// the operand was at least p.
    pub const MINUSP: Self = Self::w8le([
        19, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 128,
    ]);

    /// The modulus p = 2^255 - 19 itself (a non-canonical zero).
    pub(crate) const P: Self = Self::w8le([
        0xED, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F,
    ]);

    const MINUS_ONE: Self = Self::w8le([
        0xEC, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F,
    ]);

    // 2^((p-1)/4), a square root of -1.
    const RHO_S: Self = Self::w8le([
        0xB0, 0xA0, 0x0E, 0x4A, 0x27, 0x1B, 0xEE, 0xC4,
        0x78, 0xE4, 0x2F, 0xAD, 0x06, 0x18, 0x43, 0x2F,
        0xA7, 0xD7, 0xFB, 0x3D, 0x99, 0x00, 0x4D, 0x2B,
        0x0B, 0xDF, 0xC1, 0x4F, 0x80, 0x24, 0x83, 0x2B,
    ]);

    // Create an element from 32 bytes (little-endian), one byte per word.
    pub(crate) const fn w8le(b: [u8; 32]) -> Self {
        let mut w = [0u32; 32];
        let mut i = 0;
        while i < 32 {
            w[i] = b[i] as u32;
            i += 1;
        }
        Self(w)
    }

    /// Creates an element from its raw words (low-to-high order).
    ///
    /// No normalization is applied; the words are kept verbatim.
    pub const fn from_words(w: [u32; 32]) -> Self {
        Self(w)
    }

    /// Gets the raw words of this element (low-to-high order).
    #[inline(always)]
    pub fn words(&self) -> &[u32; 32] {
        &self.0
    }

    /// Decodes 32 bytes (little-endian) into an element, one byte per
    /// word.
    ///
    /// No bit is masked out; callers that decode a packed point clear
    /// the top bit themselves.
    pub fn decode32(buf: &[u8; 32]) -> Self {
        Self::w8le(*buf)
    }

    /// Encodes this element as 32 bytes, keeping the low byte of each
    /// word.
    ///
    /// This is lossless only on frozen values.
    pub fn encode32(self) -> [u8; 32] {
        let mut r = [0u8; 32];
        for i in 0..32 {
            r[i] = self.0[i] as u8;
        }
        r
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        let mut u = 0u32;
        for j in 0..31 {
            u = u.wrapping_add(self.0[j]).wrapping_add(rhs.0[j]);
            self.0[j] = u & 0xFF;
            u >>= 8;
        }
        self.0[31] = u.wrapping_add(self.0[31]).wrapping_add(rhs.0[31]);
    }

    // Computes self - rhs + 2*p-ish offset so that no word goes negative
    // (rhs must be squeezed).
    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        let mut u = 218u32;
        for j in 0..31 {
            u = u.wrapping_add(self.0[j])
                .wrapping_add(0xFF00)
                .wrapping_sub(rhs.0[j]);
            self.0[j] = u & 0xFF;
            u >>= 8;
        }
        self.0[31] = u.wrapping_add(self.0[31]).wrapping_sub(rhs.0[31]);
    }

    // Second half of a squeeze: keep bits 248..254 in the top word and
    // fold the excess back into the low words (2^255 = 19 mod p).
    // `top` is the full top word value after the first carry pass.
    #[inline(always)]
    fn fold19(&mut self, top: u32) {
        self.0[31] = top & 0x7F;
        let mut u = 19u32.wrapping_mul(top >> 7);
        for j in 0..31 {
            u = u.wrapping_add(self.0[j]);
            self.0[j] = u & 0xFF;
            u >>= 8;
        }
        self.0[31] = u.wrapping_add(self.0[31]);
    }

    /// Propagates carries and partially reduces this element.
    ///
    /// The result is congruent to the input and significantly smaller
    /// than 2*p, but not necessarily lower than p.
    pub fn set_squeeze(&mut self) {
        let mut u = 0u32;
        for j in 0..31 {
            u = u.wrapping_add(self.0[j]);
            self.0[j] = u & 0xFF;
            u >>= 8;
        }
        let top = u.wrapping_add(self.0[31]);
        self.fold19(top);
    }

    #[inline(always)]
    pub fn squeeze(self) -> Self {
        let mut r = self;
        r.set_squeeze();
        r
    }

    /// Fully reduces this element into the 0..p-1 range.
    ///
    /// The operand must have been squeezed. After this call, only the
    /// low byte of each word is meaningful.
    pub fn set_freeze(&mut self) {
        let orig = *self;
        self.set_add(&Self::MINUSP);
        let negative = ((self.0[31] >> 7) & 1).wrapping_neg();
        for j in 0..32 {
            self.0[j] ^= negative & (orig.0[j] ^ self.0[j]);
        }
    }

    #[inline(always)]
    pub fn freeze(self) -> Self {
        let mut r = self;
        r.set_freeze();
        r
    }

    /// Returns the least significant bit of the fully reduced value
    /// (0 or 1).
    ///
    /// The operand must have been squeezed.
    pub fn parity(self) -> u32 {
        let b = self + Self::MINUSP;
        (self.0[0] ^ (b.0[31] >> 7) ^ 1) & 1
    }

    #[inline]
    fn set_mul(&mut self, rhs: &Self) {
        let a = self.0;
        let b = &rhs.0;
        for i in 0..32 {
            let mut u = 0u32;
            for j in 0..(i + 1) {
                u = u.wrapping_add(a[j].wrapping_mul(b[i - j]));
            }
            for j in (i + 1)..32 {
                u = u.wrapping_add(
                    38u32.wrapping_mul(a[j]).wrapping_mul(b[i + 32 - j]));
            }
            self.0[i] = u;
        }
        self.set_squeeze();
    }

    /// Multiplies this element by a 32-bit integer.
    ///
    /// The result is squeezed. Word products wrap: with a squeezed
    /// operand, `k` must stay below 2^22 for the result to be congruent
    /// to the product (catalog fixtures also record larger factors).
    pub fn set_mul_int(&mut self, k: u32) {
        let mut u = 0u32;
        for j in 0..31 {
            u = u.wrapping_add(k.wrapping_mul(self.0[j]));
            self.0[j] = u & 0xFF;
            u >>= 8;
        }
        let top = u.wrapping_add(k.wrapping_mul(self.0[31]));
        self.fold19(top);
    }

    #[inline(always)]
    pub fn mul_int(self, k: u32) -> Self {
        let mut r = self;
        r.set_mul_int(k);
        r
    }

    /// Squares this element; the result is squeezed.
    pub fn set_square(&mut self) {
        let a = self.0;
        for i in 0..32 {
            let mut u = 0u32;
            for j in 0..((i + 1) >> 1) {
                u = u.wrapping_add(a[j].wrapping_mul(a[i - j]));
            }
            for j in (i + 1)..((i + 33) >> 1) {
                u = u.wrapping_add(
                    38u32.wrapping_mul(a[j]).wrapping_mul(a[i + 32 - j]));
            }
            u = u.wrapping_mul(2);
            if (i & 1) == 0 {
                let h = i >> 1;
                u = u.wrapping_add(a[h].wrapping_mul(a[h]));
                u = u.wrapping_add(
                    38u32.wrapping_mul(a[h + 16]).wrapping_mul(a[h + 16]));
            }
            self.0[i] = u;
        }
        self.set_squeeze();
    }

    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    /// Squares this element `n` times in a row.
    pub fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    #[inline(always)]
    pub fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsquare(n);
        r
    }

    /// Compares the raw words of two elements; returns 1 if they are
    /// identical, 0 otherwise.
    ///
    /// Both operands should be frozen for this to be a comparison of
    /// field values. Execution time does not depend on the operands.
    pub fn equals(self, rhs: Self) -> u32 {
        let mut diff = 0u32;
        for i in 0..32 {
            let t = self.0[i] ^ rhs.0[i];
            diff |= t & 0xFFFF;
            diff |= t >> 16;
        }
        1 & (diff.wrapping_sub(1) >> 16)
    }

    /// Returns 1 if this squeezed element is zero (represented either as
    /// 0 or as p), 0 otherwise.
    pub fn iszero(self) -> u32 {
        self.equals(Self::ZERO) | self.equals(Self::P)
    }

    /// Sets this element to `a` if `ctl` is 1, leaves it unchanged if
    /// `ctl` is 0.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        *self = Self::select(self, a, ctl);
    }

    /// Returns a copy of `a0` if `ctl` is 0, a copy of `a1` if `ctl`
    /// is 1, without any data-dependent branch.
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let m = ctl.wrapping_sub(1);
        let mut r = Self::ZERO;
        for j in 0..32 {
            r.0[j] = a1.0[j] ^ (m & (a0.0[j] ^ a1.0[j]));
        }
        r
    }

    // Raises this element to 2^250 - 1; also returns x^2 and x^11, which
    // both the inversion and square root chains reuse.
    fn pow_2_250_1(self) -> (Self, Self, Self) {
        let x2 = self.square();
        let x9 = x2.xsquare(2) * self;
        let x11 = x9 * x2;
        let x2_5_0 = x11.square() * x9;
        let x2_10_0 = x2_5_0.xsquare(5) * x2_5_0;
        let x2_20_0 = x2_10_0.xsquare(10) * x2_10_0;
        let x2_40_0 = x2_20_0.xsquare(20) * x2_20_0;
        let x2_50_0 = x2_40_0.xsquare(10) * x2_10_0;
        let x2_100_0 = x2_50_0.xsquare(50) * x2_50_0;
        let x2_200_0 = x2_100_0.xsquare(100) * x2_100_0;
        let x2_250_0 = x2_200_0.xsquare(50) * x2_50_0;
        (x2_250_0, x2, x11)
    }

    /// Inverts this element (raises it to p - 2 = 2^255 - 21).
    ///
    /// The inverse of zero is zero. The result is squeezed.
    pub fn set_invert(&mut self) {
        let (t, _, x11) = self.pow_2_250_1();
        *self = t.xsquare(5) * x11;
    }

    #[inline(always)]
    pub fn invert(self) -> Self {
        let mut r = self;
        r.set_invert();
        r
    }

    /// Computes a square root of this squeezed element.
    ///
    /// Returned value is `(r, ok)` with `ok` set to 1 if `r^2` equals
    /// this element, 0 if this element is not a quadratic residue (in
    /// which case `r` is unspecified).
    pub fn sqrt(self) -> (Self, u32) {
        let (t, x2, _) = self.pow_2_250_1();
        let t = t.xsquare(2);                 // 2^252 - 4
        let r0 = t * x2;                      // 2^252 - 2
        let e = t.square() * x2 * self;       // 2^253 - 5
        let r1 = r0 * Self::RHO_S;
        let r = Self::select(&r0, &r1, e.equals(Self::MINUS_ONE));
        let ok = r.square().equals(self);
        (r, ok)
    }
}

impl Add<GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn add(self, other: GF25519) -> GF25519 {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Add<&GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn add(self, other: &GF25519) -> GF25519 {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl Add<GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn add(self, other: GF25519) -> GF25519 {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl Add<&GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn add(self, other: &GF25519) -> GF25519 {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl AddAssign<GF25519> for GF25519 {
    #[inline(always)]
    fn add_assign(&mut self, other: GF25519) {
        self.set_add(&other);
    }
}

impl AddAssign<&GF25519> for GF25519 {
    #[inline(always)]
    fn add_assign(&mut self, other: &GF25519) {
        self.set_add(other);
    }
}

impl Sub<GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn sub(self, other: GF25519) -> GF25519 {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn sub(self, other: &GF25519) -> GF25519 {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl Sub<GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn sub(self, other: GF25519) -> GF25519 {
        let mut r = *self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn sub(self, other: &GF25519) -> GF25519 {
        let mut r = *self;
        r.set_sub(other);
        r
    }
}

impl SubAssign<GF25519> for GF25519 {
    #[inline(always)]
    fn sub_assign(&mut self, other: GF25519) {
        self.set_sub(&other);
    }
}

impl SubAssign<&GF25519> for GF25519 {
    #[inline(always)]
    fn sub_assign(&mut self, other: &GF25519) {
        self.set_sub(other);
    }
}

impl Mul<GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: GF25519) -> GF25519 {
        let mut r = self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: &GF25519) -> GF25519 {
        let mut r = self;
        r.set_mul(other);
        r
    }
}

impl Mul<GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: GF25519) -> GF25519 {
        let mut r = *self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: &GF25519) -> GF25519 {
        let mut r = *self;
        r.set_mul(other);
        r
    }
}

impl MulAssign<GF25519> for GF25519 {
    #[inline(always)]
    fn mul_assign(&mut self, other: GF25519) {
        self.set_mul(&other);
    }
}

impl MulAssign<&GF25519> for GF25519 {
    #[inline(always)]
    fn mul_assign(&mut self, other: &GF25519) {
        self.set_mul(other);
    }
}

/// Negation is a subtraction from zero; the operand must be squeezed,
/// and then the result needs no further squeeze before use as a
/// subtrahend.
impl Neg for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn neg(self) -> GF25519 {
        GF25519::ZERO - self
    }
}

impl Neg for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn neg(self) -> GF25519 {
        GF25519::ZERO - self
    }
}

// ========================================================================
