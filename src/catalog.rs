//! The fixed catalog of named cases.
//!
//! Each entry is either a fixture (a named computation whose result is
//! encoded and persisted) or a check (a named 0/1 value printed on the
//! console and never persisted). Every computation reads only the
//! canonical constants and the fixed test keys, so entries are
//! independent of one another and of any fixture already on disk.
//!
//! Entry order is the order in which the generator reports them.

use super::{Box, String, Vec};
use super::codec;
use super::error::{Error, Result};
use super::field::GF25519;
use super::int256::Int256;
use super::point::WorkPoint;

/// The result of a fixture computation, before encoding.
#[derive(Clone, Copy, Debug)]
pub enum Artifact {
    Field(GF25519),
    Point(WorkPoint),
    Packed(Int256),
}

impl Artifact {

    /// Encodes this artifact into its fixture bytes (128, 512 or 32
    /// bytes).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Artifact::Field(a) => codec::encode_field(a).to_vec(),
            Artifact::Point(p) => codec::encode_point(p).to_vec(),
            Artifact::Packed(k) => codec::encode_packed(k).to_vec(),
        }
    }
}

/// A named computation producing one persisted fixture.
pub struct Case {
    name: String,
    eval: Box<dyn Fn() -> Result<Artifact>>,
}

impl Case {

    pub fn new<F>(name: impl Into<String>, eval: F) -> Self
        where F: Fn() -> Result<Artifact> + 'static
    {
        Self { name: name.into(), eval: Box::new(eval) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the computation.
    pub fn eval(&self) -> Result<Artifact> {
        (self.eval)()
    }
}

/// A named value printed as `name=value`, not persisted.
pub struct Check {
    name: &'static str,
    eval: fn() -> u32,
}

impl Check {

    pub fn new(name: &'static str, eval: fn() -> u32) -> Self {
        Self { name, eval }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn eval(&self) -> u32 {
        (self.eval)()
    }
}

pub enum Entry {
    Fixture(Case),
    Check(Check),
}

impl Entry {

    pub fn name(&self) -> &str {
        match self {
            Entry::Fixture(c) => c.name(),
            Entry::Check(c) => c.name(),
        }
    }
}

/// The four fixed test keys. All of them are valid legacy packed
/// points.
pub const TEST_KEYS: [Int256; 4] = [
    Int256::from_bytes([
        0x83, 0x36, 0x9B, 0xED, 0xDC, 0xA7, 0x77, 0x58,
        0x51, 0x67, 0x52, 0x0F, 0xB5, 0x4A, 0x7F, 0xB0,
        0x59, 0x10, 0x2B, 0xF4, 0xE0, 0xA4, 0x6D, 0xD5,
        0xFB, 0x1C, 0x63, 0x3D, 0x83, 0xDB, 0x77, 0xA2,
    ]),
    Int256::from_bytes([
        0xB4, 0xDB, 0xDB, 0x0C, 0x05, 0xDD, 0x28, 0x20,
        0x45, 0x34, 0xFA, 0x27, 0xC5, 0xAF, 0xCA, 0x4D,
        0xCD, 0xA5, 0x39, 0x7D, 0x83, 0x3E, 0x30, 0x64,
        0xF7, 0xA7, 0x28, 0x1B, 0x24, 0x9D, 0xC7, 0xC7,
    ]),
    Int256::from_bytes([
        0x34, 0x6A, 0x11, 0xA8, 0xBD, 0x8F, 0xCE, 0xDF,
        0xCD, 0xE2, 0xE1, 0x9C, 0x99, 0x6B, 0x6E, 0x44,
        0x97, 0xD0, 0xDA, 0xFC, 0x3F, 0x5A, 0xF7, 0x09,
        0x6C, 0x91, 0x5B, 0xD0, 0xF9, 0xFE, 0x4F, 0xE9,
    ]),
    Int256::from_bytes([
        0x3B, 0xAC, 0x2A, 0xDA, 0x2F, 0xBF, 0xA1, 0xEA,
        0x75, 0xB2, 0xCB, 0x21, 0x44, 0x90, 0xD5, 0xD7,
        0x18, 0xF1, 0xBB, 0xE5, 0xB2, 0x26, 0x18, 0x44,
        0x88, 0xC0, 0x7C, 0xF1, 0xA5, 0x51, 0xE8, 0xD9,
    ]),
];

// Field operands, by the short name used in fixture names.
const OPERANDS: [(&str, GF25519); 3] = [
    ("0", GF25519::ZERO),
    ("1", GF25519::ONE),
    ("minusp", GF25519::MINUSP),
];

// Operand pairs (indices into OPERANDS) for the pairwise add/sub cases.
const PAIRS: [(usize, usize); 6] = [(0, 0), (0, 1), (1, 0), (1, 1), (0, 2), (1, 2)];

// Operand pairs for the select cases.
const SELECT_PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

const MULT_INT_FACTORS: [(&str, u32); 3] = [("0", 0), ("1", 1), ("max", u32::MAX)];

fn field<F>(name: impl Into<String>, f: F) -> Entry
    where F: Fn() -> GF25519 + 'static
{
    Entry::Fixture(Case::new(name, move || Ok(Artifact::Field(f()))))
}

fn point<F>(name: impl Into<String>, f: F) -> Entry
    where F: Fn() -> WorkPoint + 'static
{
    Entry::Fixture(Case::new(name, move || Ok(Artifact::Point(f()))))
}

fn check(name: &'static str, eval: fn() -> u32) -> Entry {
    Entry::Check(Check::new(name, eval))
}

/// Decodes fixed test key `index`; failure is fatal for the run.
pub fn unpack_test_key(index: usize) -> Result<WorkPoint> {
    WorkPoint::load_packed_legacy(&TEST_KEYS[index])
        .ok_or(Error::Unpack { index })
}

fn key_entries(index: usize, out: &mut Vec<Entry>) {
    let key = TEST_KEYS[index];
    out.push(Entry::Fixture(Case::new(format!("ecc_key_{}", index),
        move || Ok(Artifact::Packed(key)))));
    out.push(Entry::Fixture(Case::new(format!("ecc_key_unpacked_{}", index),
        move || unpack_test_key(index).map(Artifact::Point))));
    out.push(Entry::Fixture(Case::new(format!("ecc_key_derived_public_{}", index),
        move || {
            // The key must be a valid point before it is used as a
            // scalar.
            unpack_test_key(index)?;
            let q = WorkPoint::BASE_LEGACY.scalarmult_bits(&key, 256);
            Ok(Artifact::Packed(q.store_packed_legacy()))
        })));
}

/// Builds the complete catalog, in generation order.
pub fn catalog() -> Vec<Entry> {
    let mut v = Vec::new();

    v.push(field("one", || GF25519::ONE));
    v.push(field("zero", || GF25519::ZERO));
    v.push(field("minusp", || GF25519::MINUSP));

    for (i, j) in PAIRS {
        let ((na, a), (nb, b)) = (OPERANDS[i], OPERANDS[j]);
        v.push(field(format!("add_{}_{}", na, nb), move || a + b));
    }
    for (i, j) in PAIRS {
        let ((na, a), (nb, b)) = (OPERANDS[i], OPERANDS[j]);
        v.push(field(format!("sub_{}_{}", na, nb), move || a - b));
    }

    for n in 0..8 {
        let (i, j, k) = ((n >> 2) & 1, (n >> 1) & 1, n & 1);
        let ((na, a), (nb, b), (nc, c)) = (OPERANDS[i], OPERANDS[j], OPERANDS[k]);
        v.push(field(format!("sub_add_{}_{}_{}", na, nb, nc), move || (a + b) - c));
    }
    for n in 0..8 {
        let (i, j, k) = ((n >> 2) & 1, (n >> 1) & 1, n & 1);
        let ((na, a), (nb, b), (nc, c)) = (OPERANDS[i], OPERANDS[j], OPERANDS[k]);
        v.push(field(format!("add_sub_{}_{}_{}", na, nb, nc), move || (a - b) + c));
    }

    v.push(field("squeeze_zero", || GF25519::ZERO.squeeze()));
    v.push(field("squeeze_one", || GF25519::ONE.squeeze()));
    v.push(field("squeeze_sub_0_1", || (GF25519::ZERO - GF25519::ONE).squeeze()));
    v.push(field("freeze_zero", || GF25519::ZERO.freeze()));
    v.push(field("freeze_one", || GF25519::ONE.freeze()));
    // Frozen straight from the subtraction, without a squeeze first.
    v.push(field("freeze_sub_0_1", || (GF25519::ZERO - GF25519::ONE).freeze()));

    v.push(check("parity_zero", || GF25519::ZERO.squeeze().parity()));
    v.push(check("parity_one", || GF25519::ONE.squeeze().parity()));
    v.push(check("parity_minusp", || GF25519::MINUSP.squeeze().parity()));
    v.push(check("parity_sub_0_1", || (GF25519::ZERO - GF25519::ONE).squeeze().parity()));

    for (i, j) in [(0, 0), (0, 1), (1, 0), (1, 1), (2, 2)] {
        let ((na, a), (nb, b)) = (OPERANDS[i], OPERANDS[j]);
        v.push(field(format!("mult_{}_{}", na, nb), move || a * b));
    }

    for (nk, k) in MULT_INT_FACTORS {
        for (na, a) in &OPERANDS[..2] {
            let a = *a;
            v.push(field(format!("mult_int_{}_{}", na, nk), move || a.mul_int(k)));
        }
    }

    for (na, a) in OPERANDS {
        v.push(field(format!("square_{}", na), move || a.square()));
    }

    v.push(check("equal_0_0", || GF25519::ZERO.equals(GF25519::ZERO)));
    v.push(check("equal_0_1", || GF25519::ZERO.equals(GF25519::ONE)));
    v.push(check("equal_1_0", || GF25519::ONE.equals(GF25519::ZERO)));
    v.push(check("equal_1_1", || GF25519::ONE.equals(GF25519::ONE)));
    v.push(check("equal_0_minusp", || GF25519::ZERO.equals(GF25519::MINUSP)));

    for (i, j) in SELECT_PAIRS {
        let ((na, a), (nb, b)) = (OPERANDS[i], OPERANDS[j]);
        for flag in 0..2u32 {
            v.push(field(format!("select_{}_{}_{}", na, nb, flag),
                move || GF25519::select(&a, &b, flag)));
        }
    }

    v.push(point("ecc_point_double", || WorkPoint::BASE_LEGACY.double()));
    v.push(point("ecc_point_add", || WorkPoint::IDENTITY + WorkPoint::BASE_LEGACY));

    for index in 0..TEST_KEYS.len() {
        key_entries(index, &mut v);
    }

    v
}

// ========================================================================
