use std::fs;
use std::io::{self, Write};
use std::path::Path;

use uecc_fixtures::catalog::{catalog, Artifact, Case, Entry, TEST_KEYS};
use uecc_fixtures::codec::{self, FIELD_LEN, PACKED_LEN, POINT_LEN};
use uecc_fixtures::driver::{Generator, Summary};
use uecc_fixtures::{Error, GF25519, WorkPoint};

fn generate(dir: &Path) -> Summary {
    Generator::new(dir)
        .run(&catalog(), &mut io::sink(), &mut io::sink())
        .unwrap()
}

fn read(dir: &Path, name: &str) -> Vec<u8> {
    fs::read(dir.join(name)).unwrap()
}

fn field(dir: &Path, name: &str) -> GF25519 {
    codec::decode_field(&read(dir, name)).unwrap()
}

fn field_words(head: &[u32], fill: u32, top: u32) -> Vec<u8> {
    let mut w = [fill; 32];
    w[..head.len()].copy_from_slice(head);
    w[31] = top;
    codec::encode_field(&GF25519::from_words(w)).to_vec()
}

#[test]
fn creates_every_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let summary = generate(dir.path());
    assert_eq!(summary.created.len(), 71);
    assert_eq!(summary.skipped, 0);

    for name in &summary.created {
        let len = read(dir.path(), name).len();
        if name.starts_with("ecc_point_") || name.starts_with("ecc_key_unpacked_") {
            assert_eq!(len, POINT_LEN, "{}", name);
        } else if name.starts_with("ecc_key_") {
            assert_eq!(len, PACKED_LEN, "{}", name);
        } else {
            assert_eq!(len, FIELD_LEN, "{}", name);
        }
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 71);
}

#[test]
fn determinism() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    let sa = generate(a.path());
    let sb = generate(b.path());
    assert_eq!(sa, sb);
    for name in &sa.created {
        assert_eq!(read(a.path(), name), read(b.path(), name), "{}", name);
    }
}

#[test]
fn idempotence() {
    let dir = tempfile::tempdir().unwrap();
    // A pre-existing fixture is neither recomputed nor overwritten.
    fs::write(dir.path().join("one"), b"kept").unwrap();
    let first = generate(dir.path());
    assert_eq!(first.created.len(), 70);
    assert_eq!(first.skipped, 1);
    assert_eq!(read(dir.path(), "one"), b"kept");

    let mut progress = Vec::new();
    let second = Generator::new(dir.path())
        .run(&catalog(), &mut io::sink(), &mut progress)
        .unwrap();
    assert!(second.created.is_empty());
    assert_eq!(second.skipped, 71);
    assert!(progress.is_empty());
    assert_eq!(second.checks, first.checks);
}

#[test]
fn completes_partial_run() {
    let dir = tempfile::tempdir().unwrap();
    generate(dir.path());
    let before = read(dir.path(), "ecc_key_derived_public_2");
    for name in ["mult_1_1", "ecc_key_derived_public_2"] {
        fs::remove_file(dir.path().join(name)).unwrap();
    }
    let summary = generate(dir.path());
    assert_eq!(summary.created, ["mult_1_1", "ecc_key_derived_public_2"]);
    assert_eq!(read(dir.path(), "ecc_key_derived_public_2"), before);
}

#[test]
fn literal_vectors() {
    let dir = tempfile::tempdir().unwrap();
    generate(dir.path());
    let d = dir.path();

    assert_eq!(read(d, "add_0_0"), vec![0u8; FIELD_LEN]);
    assert_eq!(read(d, "mult_int_1_0"), vec![0u8; FIELD_LEN]);
    assert_eq!(read(d, "mult_int_1_1"), read(d, "one"));
    assert_eq!(read(d, "square_0"), vec![0u8; FIELD_LEN]);

    assert_eq!(read(d, "zero"), vec![0u8; FIELD_LEN]);
    assert_eq!(read(d, "one"), field_words(&[1], 0, 0));
    assert_eq!(read(d, "minusp"), field_words(&[19], 0, 128));
    assert_eq!(read(d, "sub_0_1"), field_words(&[217], 255, 255));
    assert_eq!(read(d, "sub_0_minusp"), field_words(&[199], 255, 127));
    assert_eq!(read(d, "add_1_minusp"), field_words(&[20], 0, 128));
    assert_eq!(read(d, "squeeze_sub_0_1"), field_words(&[236], 255, 127));
    assert_eq!(read(d, "freeze_sub_0_1"), field_words(&[236], 255, 383));
    assert_eq!(read(d, "mult_minusp_minusp"), field_words(&[164, 5], 0, 0));
    assert_eq!(read(d, "square_minusp"), read(d, "mult_minusp_minusp"));
    assert_eq!(read(d, "mult_int_1_max"), field_words(&[255, 255, 255, 255], 0, 0));
    assert_eq!(read(d, "mult_int_0_max"), vec![0u8; FIELD_LEN]);

    let double = codec::decode_point(&read(d, "ecc_point_double")).unwrap();
    assert_eq!(hex::encode(double.store_packed_legacy().to_bytes()),
        "65285345d933b10921a9bded2eac7b6e827069532ded6e46186fde73ccf97fb7");
    let add = codec::decode_point(&read(d, "ecc_point_add")).unwrap();
    assert_eq!(hex::encode(add.store_packed_legacy().to_bytes()),
        "d46bfe7f39fa8c22e19623eb26b78e6a34748b66d6a326dd195e9f2150437c54");

    const PUBKEYS: [&str; 4] = [
        "052b006c20b8dcc5dcb97cd96a8578f791c549a94971fc933cbe2a2999bf3828",
        "9c993f3d42d456f698e784902e431d467ee5fadbf814c03fbd7cc2fe7743c79a",
        "1d342dcfbe83d50a40fe58f634967d1e9f8c77298751ebaaba386b96130631f9",
        "38af70bd3bb6395eed69a4629bfa41f8b2f63db56930881cbaa026a90b03c19c",
    ];
    for i in 0..4 {
        assert_eq!(read(d, &format!("ecc_key_{}", i)), TEST_KEYS[i].to_bytes());
        assert_eq!(hex::encode(read(d, &format!("ecc_key_derived_public_{}", i))),
            PUBKEYS[i]);
        let p = codec::decode_point(&read(d, &format!("ecc_key_unpacked_{}", i))).unwrap();
        assert_eq!(p.store_packed_legacy(), TEST_KEYS[i]);
        let derived = WorkPoint::BASE_LEGACY.scalarmult_bits(&TEST_KEYS[i], 256);
        assert_eq!(read(d, &format!("ecc_key_derived_public_{}", i)),
            derived.store_packed_legacy().to_bytes());
    }
}

#[test]
fn reduction_laws() {
    let dir = tempfile::tempdir().unwrap();
    generate(dir.path());
    let d = dir.path();

    // Identity laws, on canonical values (freeze expects a squeezed input).
    let canon = |a: GF25519| a.squeeze().freeze().encode32();
    for (x, add0) in [("zero", "add_0_0"), ("one", "add_0_1"), ("minusp", "add_0_minusp")] {
        let x = field(d, x);
        assert_eq!(canon(field(d, add0)), canon(x));
        assert_eq!(canon(x - GF25519::ZERO), canon(x));
    }
    assert_eq!(canon(field(d, "sub_0_0")), canon(GF25519::ZERO));
    assert_eq!(canon(field(d, "sub_1_0")), canon(GF25519::ONE));

    // Parity of the frozen constants.
    assert_eq!(field(d, "freeze_one").parity(), 1);
    assert_eq!(field(d, "freeze_zero").parity(), 0);

    // minusp is 2^255 + 19, i.e. 38 modulo p: it does not collapse to
    // zero, and freezing it without a squeeze leaves it unreduced.
    let minusp = field(d, "minusp");
    assert_eq!(minusp.squeeze().freeze().encode32()[0], 38);
    assert_eq!(codec::encode_field(&minusp.freeze()).to_vec(),
        field_words(&[38], 0, 256));
}

#[test]
fn select_correctness() {
    let dir = tempfile::tempdir().unwrap();
    generate(dir.path());
    let d = dir.path();
    for (a, b, na, nb) in [("0", "1", "zero", "one"),
                           ("0", "minusp", "zero", "minusp"),
                           ("1", "minusp", "one", "minusp")] {
        assert_eq!(read(d, &format!("select_{}_{}_0", a, b)), read(d, na));
        assert_eq!(read(d, &format!("select_{}_{}_1", a, b)), read(d, nb));
    }
}

#[test]
fn console_output() {
    let dir = tempfile::tempdir().unwrap();
    let (mut out, mut progress) = (Vec::new(), Vec::new());
    let summary = Generator::new(dir.path())
        .run(&catalog(), &mut out, &mut progress)
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(),
        "generating... \n parity_zero=0 parity_one=1 parity_minusp=0 parity_sub_0_1=0 \
         equal_0_0=1 equal_0_1=0 equal_1_0=0 equal_1_1=1 equal_0_minusp=0\ndone.\n");
    let mut expected = String::new();
    for name in &summary.created {
        expected.push(' ');
        expected.push_str(name);
    }
    assert_eq!(String::from_utf8(progress).unwrap(), expected);
}

#[test]
fn unpack_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let entries = vec![
        Entry::Fixture(Case::new("before", || Ok(Artifact::Packed(TEST_KEYS[0])))),
        Entry::Fixture(Case::new("broken", || Err(Error::Unpack { index: 3 }))),
        Entry::Fixture(Case::new("after", || Ok(Artifact::Packed(TEST_KEYS[1])))),
    ];
    let r = Generator::new(dir.path()).run(&entries, &mut io::sink(), &mut io::sink());
    assert!(matches!(r, Err(Error::Unpack { index: 3 })));
    assert!(dir.path().join("before").exists());
    assert!(!dir.path().join("broken").exists());
    assert!(!dir.path().join("after").exists());
    // Only the completed fixture is on disk, no temporary file.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn persist_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    // The parent of the target does not exist, so the rename fails.
    let entries = vec![
        Entry::Fixture(Case::new("missing/x", || Ok(Artifact::Packed(TEST_KEYS[0])))),
        Entry::Fixture(Case::new("after", || Ok(Artifact::Packed(TEST_KEYS[1])))),
    ];
    let mut progress = Vec::new();
    let r = Generator::new(dir.path()).run(&entries, &mut io::sink(), &mut progress);
    match r {
        Err(Error::Persist { path, .. }) => assert_eq!(path, dir.path().join("missing/x")),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(progress.is_empty());
    // No temporary file is left behind, and the run stopped.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

struct Broken;

impl Write for Broken {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn report_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let r = Generator::new(dir.path()).run(&catalog(), &mut Broken, &mut io::sink());
    assert!(matches!(r, Err(Error::Report { .. })));
    let r = Generator::new(dir.path()).run(&catalog(), &mut io::sink(), &mut Broken);
    assert!(matches!(r, Err(Error::Report { .. })));
}
